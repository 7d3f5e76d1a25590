//! Scene geometry
//!
//! Pure coordinate computations shared by the still renderer and the animation. All points are
//! in image space: x grows to the right, y grows downward, the origin is the top-left corner.
//! The mirror is the horizontal line through the reflection point, which sits at the canvas
//! center.
//!
//! Nothing here touches pixels, so both consumers get bit-identical endpoints for the same
//! inputs.

use std::f64::consts::FRAC_PI_4;
use std::f64::consts::FRAC_PI_6;

use crate::Point;

/// Distance between successive hatch marks along the mirror
pub const HATCH_SPACING: u32 = 8;
pub const HATCH_LENGTH: f64 = 15.0;
/// Hatches start this far below the mirror line
pub const HATCH_OFFSET: f64 = 5.0;
pub const NORMAL_HALF_LENGTH: f64 = 30.0;
/// Vertical position of the incident ray's start point
pub const INCIDENT_START_Y: f64 = 50.0;
pub const ARC_RADIUS: f64 = 40.0;
pub const ARROW_LENGTH: f64 = 15.0;
pub const ARROW_ANGLE: f64 = FRAC_PI_6;

/// A directed line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}
impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// The two barbs of an arrowhead at `end`, each rotated ±30° from the reversed direction
    /// of travel. Their length does not depend on the segment's length.
    pub fn arrowhead(&self) -> [Segment; 2] {
        let d = self.end - self.start;
        let angle = d[1].atan2(d[0]);
        let barb = |a: f64| {
            Segment::new(
                self.end,
                Point::new(
                    self.end[0] - ARROW_LENGTH * a.cos(),
                    self.end[1] - ARROW_LENGTH * a.sin(),
                ),
            )
        };
        [barb(angle - ARROW_ANGLE), barb(angle + ARROW_ANGLE)]
    }
}

/// Circular arc, angles in degrees, clockwise on screen from the +x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Canvas boundary hit by the reflected ray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub edge: Edge,
    pub point: Point,
    /// Euclidean distance from the reflection point
    pub distance: f64,
}

/// Geometry of a canvas of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGeometry {
    width: f64,
    height: f64,
    reflection_point: Point,
    hatch_count: u32,
}
impl SceneGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            reflection_point: Point::new((width / 2) as f64, (height / 2) as f64),
            hatch_count: width / HATCH_SPACING,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fixed at the canvas center for every scenario
    pub fn reflection_point(&self) -> Point {
        self.reflection_point
    }

    pub fn mirror_y(&self) -> f64 {
        self.reflection_point[1]
    }

    pub fn mirror(&self) -> Segment {
        let y = self.mirror_y();
        Segment::new(Point::new(0.0, y), Point::new(self.width, y))
    }

    /// Decorative hatching under the mirror: a horizontal and a 45° stroke per pitch
    pub fn hatches(&self) -> Vec<Segment> {
        let y = self.mirror_y() + HATCH_OFFSET;
        let starts = (0..self.hatch_count).map(move |i| Point::new((i * HATCH_SPACING) as f64, y));

        let horizontal = starts
            .clone()
            .map(|p| Segment::new(p, Point::new(p[0] + HATCH_LENGTH, p[1])));
        let diagonal = starts.map(|p| {
            Segment::new(
                p,
                Point::new(
                    p[0] + HATCH_LENGTH * FRAC_PI_4.cos(),
                    p[1] + HATCH_LENGTH * FRAC_PI_4.sin(),
                ),
            )
        });
        horizontal.chain(diagonal).collect()
    }

    pub fn normal(&self) -> Segment {
        let c = self.reflection_point;
        Segment::new(
            Point::new(c[0], c[1] - NORMAL_HALF_LENGTH),
            Point::new(c[0], c[1] + NORMAL_HALF_LENGTH),
        )
    }

    /// Incident ray ending exactly at the reflection point
    ///
    /// The start is fixed at [`INCIDENT_START_Y`] and its x is solved backward from the angle.
    pub fn incident_ray(&self, theta_rad: f64) -> Segment {
        let c = self.reflection_point;
        let rise = c[1] - INCIDENT_START_Y;
        Segment::new(
            Point::new(c[0] - rise * theta_rad.tan(), INCIDENT_START_Y),
            c,
        )
    }

    /// Arc between the upward normal and the incident ray
    pub fn incident_arc(&self, theta_deg: f64) -> Arc {
        let normal = -90.0;
        let ray = normal - theta_deg;
        Arc {
            center: self.reflection_point,
            radius: ARC_RADIUS,
            start_deg: ray.min(normal),
            end_deg: ray.max(normal),
        }
    }

    /// Top-left corner of the incident angle label
    pub fn label_anchor(&self) -> Point {
        let c = self.reflection_point;
        Point::new(c[0] + ARC_RADIUS + 10.0, c[1] - ARC_RADIUS)
    }

    /// Every boundary intersection of the reflected ray that lies on the canvas
    ///
    /// The reflected ray leaves the reflection point upward, on the opposite side of the normal
    /// from the incident ray.
    pub fn edge_candidates(&self, theta_rad: f64) -> Vec<EdgeHit> {
        let c = self.reflection_point;
        let tan = theta_rad.tan();
        let mut hits = Vec::with_capacity(2);

        let x_top = c[0] + c[1] * tan;
        if (0.0..=self.width).contains(&x_top) {
            hits.push(self.hit(Edge::Top, Point::new(x_top, 0.0)));
        }

        if theta_rad > 0.0 {
            let y_right = c[1] - (self.width - c[0]) / tan;
            if (0.0..=c[1]).contains(&y_right) {
                hits.push(self.hit(Edge::Right, Point::new(self.width, y_right)));
            }
        }

        if theta_rad < 0.0 {
            // tan < 0 puts this below the mirror, so steep negative angles end up on the
            // clamped top-edge fallback
            let y_left = c[1] - c[0] / tan;
            if (0.0..=c[1]).contains(&y_left) {
                hits.push(self.hit(Edge::Left, Point::new(0.0, y_left)));
            }
        }
        hits
    }

    /// Where the reflected ray leaves the canvas
    ///
    /// Picks the nearest surviving edge candidate. When none survives (tangent singularities),
    /// falls back to the top edge with x clamped onto the canvas.
    pub fn reflected_ray_hit(&self, theta_rad: f64) -> EdgeHit {
        let nearest = self
            .edge_candidates(theta_rad)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance));
        match nearest {
            Some(hit) => hit,
            None => {
                let c = self.reflection_point;
                let x_top = c[0] + c[1] * theta_rad.tan();
                let x_top = if x_top.is_nan() {
                    c[0]
                } else {
                    x_top.clamp(0.0, self.width)
                };
                self.hit(Edge::Top, Point::new(x_top, 0.0))
            }
        }
    }

    pub fn reflected_ray(&self, theta_rad: f64) -> Segment {
        Segment::new(self.reflection_point, self.reflected_ray_hit(theta_rad).point)
    }

    /// Reflected ray grown to `progress` of its full length; `None` before it appears
    pub fn partial_reflected_ray(&self, theta_rad: f64, progress: f64) -> Option<Segment> {
        if progress <= 0.0 {
            return None;
        }
        let full = self.reflected_ray(theta_rad);
        // lerp is exact at both ends, so progress 1.0 lands on the final endpoint
        Some(Segment::new(
            full.start,
            full.start.lerp(&full.end, progress.min(1.0)),
        ))
    }

    fn hit(&self, edge: Edge, point: Point) -> EdgeHit {
        EdgeHit {
            edge,
            point,
            distance: (point - self.reflection_point).norm(),
        }
    }
}
