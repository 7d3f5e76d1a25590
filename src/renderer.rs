//! Scene rendering
//!
//! Draws the mirror scene for a [`Scenario`]. The still images and the animation frames are all
//! produced by [`SceneRenderer::compose`], which only differs in the [`Overlay`] it is given, so
//! the animation's endpoints match the stills pixel for pixel.

use image::RgbImage;

use crate::canvas::Canvas;
use crate::fonts::{FontBook, LabelFont};
use crate::geometry::SceneGeometry;
use crate::scenario::Scenario;
use crate::utils::{self, BLACK, BLUE, RED, WHITE};
use crate::Point;

const MIRROR_WIDTH: f64 = 3.0;
const HATCH_WIDTH: f64 = 1.0;
const NORMAL_WIDTH: f64 = 1.0;
const RAY_WIDTH: f64 = 3.0;
const ARC_WIDTH: f64 = 2.0;
pub const DEFAULT_LABEL_SIZE: f32 = 20.0;

/// Which still to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Incident ray with its angle annotated
    Initial,
    /// Incident and reflected rays
    Final,
}

/// State-specific parts drawn on top of the static scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Fraction of the reflected ray to draw; nothing when `<= 0`
    pub reflected_progress: f64,
    /// Draw the incident angle arc and label
    pub annotate: bool,
}
impl From<SceneState> for Overlay {
    fn from(state: SceneState) -> Self {
        match state {
            SceneState::Initial => Self {
                reflected_progress: 0.0,
                annotate: true,
            },
            SceneState::Final => Self {
                reflected_progress: 1.0,
                annotate: false,
            },
        }
    }
}

pub struct SceneRenderer {
    width: u32,
    height: u32,
    geometry: SceneGeometry,
    font: LabelFont,
    label_size: f32,
}
impl SceneRenderer {
    pub fn new(width: u32, height: u32, font: LabelFont, label_size: f32) -> Self {
        Self {
            width,
            height,
            geometry: SceneGeometry::new(width, height),
            font,
            label_size,
        }
    }

    /// Renderer whose label font comes from the first loadable candidate
    pub fn with_fonts(width: u32, height: u32, fonts: &FontBook, label_size: f32) -> Self {
        Self::new(width, height, fonts.resolve(), label_size)
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn render(&self, scenario: &Scenario, state: SceneState) -> RgbImage {
        self.compose(scenario, state.into())
    }

    pub fn compose(&self, scenario: &Scenario, overlay: Overlay) -> RgbImage {
        let mut canvas = Canvas::new(self.width, self.height, WHITE);
        self.draw_static(&mut canvas, scenario);

        if let Some(ray) = self
            .geometry
            .partial_reflected_ray(scenario.reflected_angle_rad, overlay.reflected_progress)
        {
            canvas.draw_arrow(&ray, RED, RAY_WIDTH);
        }
        if overlay.annotate {
            self.draw_annotation(&mut canvas, scenario);
        }
        canvas.into_image()
    }

    /// Endpoint of the fully grown reflected ray
    pub fn reflected_endpoint(&self, scenario: &Scenario) -> Point {
        self.geometry
            .reflected_ray_hit(scenario.reflected_angle_rad)
            .point
    }

    /// Mirror, hatching, normal and incident ray; identical in every image
    fn draw_static(&self, canvas: &mut Canvas, scenario: &Scenario) {
        let g = &self.geometry;
        canvas.draw_line(&g.mirror(), BLACK, MIRROR_WIDTH);
        for hatch in g.hatches() {
            canvas.draw_line(&hatch, utils::gray(100), HATCH_WIDTH);
        }
        canvas.draw_line(&g.normal(), utils::gray(150), NORMAL_WIDTH);
        canvas.draw_arrow(&g.incident_ray(scenario.incident_angle_rad), BLUE, RAY_WIDTH);
    }

    fn draw_annotation(&self, canvas: &mut Canvas, scenario: &Scenario) {
        let g = &self.geometry;
        canvas.draw_arc(&g.incident_arc(scenario.incident_angle_deg), BLACK, ARC_WIDTH);
        canvas.draw_text(
            g.label_anchor(),
            &angle_label(scenario.incident_angle_deg),
            &self.font,
            self.label_size,
            BLACK,
        );
    }
}

pub fn angle_label(theta_deg: f64) -> String {
    format!("θ = {:.0}°", theta_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(400, 400, LabelFont::Builtin, DEFAULT_LABEL_SIZE)
    }

    #[test]
    fn test_render_is_idempotent() {
        let r = renderer();
        let s = Scenario::new(0.8, 37.5);
        for state in [SceneState::Initial, SceneState::Final] {
            assert_eq!(r.render(&s, state), r.render(&s, state));
        }
    }

    #[test]
    fn test_stills_have_canvas_size() {
        let r = SceneRenderer::new(320, 240, LabelFont::Builtin, DEFAULT_LABEL_SIZE);
        let img = r.render(&Scenario::new(0.8, 30.0), SceneState::Final);
        assert_eq!(img.dimensions(), (320, 240));
    }

    #[test]
    fn test_final_draws_reflected_ray() {
        let r = renderer();
        let s = Scenario::new(0.8, 30.0);
        let initial = r.render(&s, SceneState::Initial);
        let fin = r.render(&s, SceneState::Final);
        assert_ne!(initial, fin);

        // A point along the reflected ray is red only in the final still
        let end = r.reflected_endpoint(&s);
        let mid = (r.geometry().reflection_point() + end) / 2.0;
        let (x, y) = (mid[0].round() as u32, mid[1].round() as u32);
        assert_eq!(*fin.get_pixel(x, y), RED);
        assert_eq!(*initial.get_pixel(x, y), WHITE);
    }

    #[test]
    fn test_incident_ray_and_mirror_in_both_states() {
        let r = renderer();
        let s = Scenario::new(0.8, 30.0);
        let ray = r.geometry().incident_ray(s.incident_angle_rad);
        let mid = (ray.start + ray.end) / 2.0;
        for state in [SceneState::Initial, SceneState::Final] {
            let img = r.render(&s, state);
            assert_eq!(*img.get_pixel(mid[0].round() as u32, mid[1].round() as u32), BLUE);
            assert_eq!(*img.get_pixel(10, 200), BLACK);
        }
    }

    #[test]
    fn test_incident_ray_covers_normal() {
        let r = renderer();
        let img = r.render(&Scenario::new(0.8, 30.0), SceneState::Initial);
        // Just above the reflection point the ray crosses the normal
        assert_eq!(*img.get_pixel(200, 198), BLUE);
        assert_eq!(*img.get_pixel(200, 180), utils::gray(150));
    }

    #[test]
    fn test_label_only_in_initial() {
        let r = renderer();
        let s = Scenario::new(0.8, 30.0);
        let anchor = r.geometry().label_anchor();
        let count_black = |img: &RgbImage| {
            (0..30u32)
                .flat_map(|dy| (0..80u32).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| {
                    *img.get_pixel(anchor[0] as u32 + dx, anchor[1] as u32 + dy) == BLACK
                })
                .count()
        };
        assert!(count_black(&r.render(&s, SceneState::Initial)) > 0);
        assert_eq!(count_black(&r.render(&s, SceneState::Final)), 0);
    }

    #[test]
    fn test_angle_label_rounds() {
        assert_eq!(angle_label(29.6), "θ = 30°");
        assert_eq!(angle_label(45.0), "θ = 45°");
    }
}
