//! Animation frames
//!
//! The animation holds the initial still, grows the reflected ray out of the reflection point
//! towards its final edge hit, then holds the final still.

use image::RgbImage;
use log::debug;

use crate::renderer::{Overlay, SceneRenderer, SceneState};
use crate::scenario::Scenario;
use crate::Point;

/// The angle arc and label disappear once the transition passes this progress
pub const ANNOTATION_CUTOFF: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounts {
    /// Copies of each still at either end
    pub hold: usize,
    pub transition: usize,
}
impl Default for FrameCounts {
    fn default() -> Self {
        Self {
            hold: 5,
            transition: 25,
        }
    }
}
impl FrameCounts {
    pub fn total(&self) -> usize {
        2 * self.hold + self.transition
    }
}

pub struct AnimationSynthesizer<'a> {
    renderer: &'a SceneRenderer,
    counts: FrameCounts,
}
impl<'a> AnimationSynthesizer<'a> {
    pub fn new(renderer: &'a SceneRenderer, counts: FrameCounts) -> Self {
        Self { renderer, counts }
    }

    /// Progress of transition frame `i`, linear in `[0, 1]`
    pub fn progress(&self, i: usize) -> f64 {
        if self.counts.transition > 1 {
            i as f64 / (self.counts.transition - 1) as f64
        } else {
            1.0
        }
    }

    pub fn overlay(&self, progress: f64) -> Overlay {
        Overlay {
            reflected_progress: progress,
            annotate: progress < ANNOTATION_CUTOFF,
        }
    }

    /// End of the reflected ray in transition frame `i`, if it is drawn at all
    pub fn reflected_endpoint(&self, scenario: &Scenario, i: usize) -> Option<Point> {
        self.renderer
            .geometry()
            .partial_reflected_ray(scenario.reflected_angle_rad, self.progress(i))
            .map(|ray| ray.end)
    }

    pub fn transition_frame(&self, scenario: &Scenario, i: usize) -> RgbImage {
        self.renderer
            .compose(scenario, self.overlay(self.progress(i)))
    }

    /// Every frame, in order
    pub fn synthesize(&self, scenario: &Scenario) -> Vec<RgbImage> {
        let mut frames = Vec::with_capacity(self.counts.total());

        let initial = self.renderer.render(scenario, SceneState::Initial);
        frames.extend(std::iter::repeat(initial).take(self.counts.hold));

        for i in 0..self.counts.transition {
            debug!("transition frame {i} at progress {:.3}", self.progress(i));
            frames.push(self.transition_frame(scenario, i));
        }

        let fin = self.renderer.render(scenario, SceneState::Final);
        frames.extend(std::iter::repeat(fin).take(self.counts.hold));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::LabelFont;
    use crate::renderer::DEFAULT_LABEL_SIZE;

    fn renderer(width: u32, height: u32) -> SceneRenderer {
        SceneRenderer::new(width, height, LabelFont::Builtin, DEFAULT_LABEL_SIZE)
    }

    #[test]
    fn test_frame_count_and_order() {
        let r = renderer(200, 200);
        let s = Scenario::new(0.9, 40.0);
        let counts = FrameCounts {
            hold: 3,
            transition: 6,
        };
        let frames = AnimationSynthesizer::new(&r, counts).synthesize(&s);
        assert_eq!(frames.len(), 12);

        let initial = r.render(&s, SceneState::Initial);
        let fin = r.render(&s, SceneState::Final);
        assert!(frames[..3].iter().all(|f| *f == initial));
        assert!(frames[9..].iter().all(|f| *f == fin));
    }

    #[test]
    fn test_transition_endpoints_match_stills() {
        let r = renderer(400, 400);
        for deg in [0.0, 12.5, 30.0, 45.0, 63.2, 80.0, -25.0, -80.0] {
            let s = Scenario::new(0.7, deg);
            let counts = FrameCounts {
                hold: 0,
                transition: 25,
            };
            let frames = AnimationSynthesizer::new(&r, counts).synthesize(&s);
            assert_eq!(frames[0], r.render(&s, SceneState::Initial), "first at {deg}°");
            assert_eq!(frames[24], r.render(&s, SceneState::Final), "last at {deg}°");
        }
    }

    #[test]
    fn test_last_endpoint_agrees_with_edge_extension() {
        for (w, h) in [(400, 400), (640, 360), (257, 513)] {
            let r = renderer(w, h);
            let anim = AnimationSynthesizer::new(&r, FrameCounts::default());
            for deg in [5.0, 30.0, 55.0, 75.0, 89.0] {
                let s = Scenario::new(0.5, deg);
                let last = anim.reflected_endpoint(&s, 24).unwrap();
                let expected = r.reflected_endpoint(&s);
                assert!((last - expected).norm() < 1e-6);
                assert_eq!(last, expected);
            }
        }
    }

    #[test]
    fn test_progress_is_linear() {
        let r = renderer(100, 100);
        let anim = AnimationSynthesizer::new(
            &r,
            FrameCounts {
                hold: 0,
                transition: 5,
            },
        );
        let p: Vec<f64> = (0..5).map(|i| anim.progress(i)).collect();
        assert_eq!(p, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let s = Scenario::new(0.5, 30.0);
        assert!(anim.reflected_endpoint(&s, 0).is_none());
        let half = anim.reflected_endpoint(&s, 2).unwrap();
        let center = r.geometry().reflection_point();
        let end = r.reflected_endpoint(&s);
        assert!((half - (center + end) / 2.0).norm() < 1e-9);
    }

    #[test]
    fn test_annotation_threshold() {
        let r = renderer(100, 100);
        let anim = AnimationSynthesizer::new(&r, FrameCounts::default());
        assert!(anim.overlay(0.0).annotate);
        assert!(anim.overlay(0.29).annotate);
        assert!(!anim.overlay(0.3).annotate);
        assert!(!anim.overlay(1.0).annotate);
    }

    #[test]
    fn test_single_transition_frame_is_final() {
        let r = renderer(200, 200);
        let s = Scenario::new(0.5, 20.0);
        let anim = AnimationSynthesizer::new(
            &r,
            FrameCounts {
                hold: 1,
                transition: 1,
            },
        );
        assert_eq!(anim.progress(0), 1.0);
        let frames = anim.synthesize(&s);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1], r.render(&s, SceneState::Final));
    }

    #[test]
    fn test_no_transition_keeps_holds() {
        let r = renderer(200, 200);
        let s = Scenario::new(0.5, 20.0);
        let frames = AnimationSynthesizer::new(
            &r,
            FrameCounts {
                hold: 2,
                transition: 0,
            },
        )
        .synthesize(&s);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1], r.render(&s, SceneState::Initial));
        assert_eq!(frames[2], r.render(&s, SceneState::Final));
    }
}
