//! Raster canvas
//!
//! A thin drawing layer over an [`RgbImage`]. Strokes are hard-edged: a pixel is painted when its
//! center lies within half the stroke width of the shape, so repeated draws of the same scene are
//! pixel-identical.

use image::RgbImage;

use crate::fonts::LabelFont;
use crate::geometry::{Arc, Segment};
use crate::{utils, Color, Point};

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}
impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn draw_line(&mut self, segment: &Segment, color: Color, width: f64) {
        let half = (width / 2.0).max(0.5);
        let (a, b) = (segment.start, segment.end);
        if !(a[0].is_finite() && a[1].is_finite() && b[0].is_finite() && b[1].is_finite()) {
            return;
        }
        let min = Point::new(a[0].min(b[0]) - half, a[1].min(b[1]) - half);
        let max = Point::new(a[0].max(b[0]) + half, a[1].max(b[1]) + half);
        self.fill_where(min, max, color, |p| distance_to_segment(p, a, b) <= half);
    }

    /// Line with an arrowhead at its end
    pub fn draw_arrow(&mut self, segment: &Segment, color: Color, width: f64) {
        self.draw_line(segment, color, width);
        for barb in segment.arrowhead() {
            self.draw_line(&barb, color, width);
        }
    }

    /// Arc stroke lying inside the arc's radius
    pub fn draw_arc(&mut self, arc: &Arc, color: Color, width: f64) {
        let c = arc.center;
        let r = arc.radius;
        let mid = r - width / 2.0;
        let half = (width / 2.0).max(0.5);
        let min = Point::new(c[0] - r, c[1] - r);
        let max = Point::new(c[0] + r, c[1] + r);
        self.fill_where(min, max, color, |p| {
            let d = p - c;
            if (d.norm() - mid).abs() > half {
                return false;
            }
            let angle = d[1].atan2(d[0]).to_degrees();
            [angle, angle - 360.0, angle + 360.0]
                .iter()
                .any(|a| (arc.start_deg..=arc.end_deg).contains(a))
        });
    }

    /// Text with its top-left corner at `anchor`
    pub fn draw_text(
        &mut self,
        anchor: Point,
        text: &str,
        font: &LabelFont,
        size: f32,
        color: Color,
    ) {
        let ox = anchor[0].round() as i64;
        let oy = anchor[1].round() as i64;
        for px in font.rasterize(text, size) {
            let x = ox + px.x as i64;
            let y = oy + px.y as i64;
            if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
                continue;
            }
            let pixel = self.image.get_pixel_mut(x as u32, y as u32);
            *pixel = utils::blend(color, *pixel, px.value);
        }
    }

    /// Paint every pixel inside `[min, max]` whose center satisfies `inside`
    fn fill_where<F>(&mut self, min: Point, max: Point, color: Color, inside: F)
    where
        F: Fn(Point) -> bool,
    {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        let x0 = min[0].floor().max(0.0);
        let y0 = min[1].floor().max(0.0);
        let x1 = max[0].ceil().min((self.width() - 1) as f64);
        let y1 = max[1].ceil().min((self.height() - 1) as f64);
        if x0 > x1 || y0 > y1 {
            return;
        }
        for y in y0 as u32..=y1 as u32 {
            for x in x0 as u32..=x1 as u32 {
                if inside(Point::new(x as f64, y as f64)) {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + t * ab)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{BLACK, RED, WHITE};

    #[test]
    fn test_horizontal_line_width() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        let seg = Segment::new(Point::new(0.0, 10.0), Point::new(20.0, 10.0));
        canvas.draw_line(&seg, BLACK, 3.0);
        let img = canvas.image();
        for x in 0..20 {
            assert_eq!(*img.get_pixel(x, 9), BLACK);
            assert_eq!(*img.get_pixel(x, 10), BLACK);
            assert_eq!(*img.get_pixel(x, 11), BLACK);
            assert_eq!(*img.get_pixel(x, 8), WHITE);
            assert_eq!(*img.get_pixel(x, 12), WHITE);
        }
    }

    #[test]
    fn test_lines_are_clipped_to_canvas() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        let seg = Segment::new(Point::new(-50.0, -50.0), Point::new(60.0, 60.0));
        canvas.draw_line(&seg, RED, 1.0);
        assert_eq!(*canvas.image().get_pixel(0, 0), RED);
        assert_eq!(*canvas.image().get_pixel(9, 9), RED);
        assert_eq!(*canvas.image().get_pixel(9, 0), WHITE);

        let nan = Segment::new(Point::new(f64::NAN, 0.0), Point::new(5.0, 5.0));
        canvas.draw_line(&nan, BLACK, 1.0);
    }

    #[test]
    fn test_arc_respects_angle_range() {
        let mut canvas = Canvas::new(100, 100, WHITE);
        let arc = Arc {
            center: Point::new(50.0, 50.0),
            radius: 40.0,
            start_deg: -120.0,
            end_deg: -90.0,
        };
        canvas.draw_arc(&arc, BLACK, 2.0);
        let img = canvas.image();
        // Straight up from the center lies on the arc, straight right does not
        assert_eq!(*img.get_pixel(50, 11), BLACK);
        assert_eq!(*img.get_pixel(89, 50), WHITE);
        assert_eq!(*img.get_pixel(50, 50), WHITE);
    }

    #[test]
    fn test_text_is_drawn_and_clipped() {
        let mut canvas = Canvas::new(40, 20, WHITE);
        canvas.draw_text(Point::new(30.0, 2.0), "888", &LabelFont::Builtin, 10.0, BLACK);
        let painted = canvas.image().pixels().filter(|p| **p == BLACK).count();
        assert!(painted > 0);
    }
}
