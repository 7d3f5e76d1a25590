//! Mirror Reflection Task Generator
//!
//! Synthesizes labeled examples of light reflecting off a flat mirror: a random scenario, a
//! still of the incident ray before reflection, a still with the reflected ray drawn to the edge
//! of the image, an optional animation between them, and prompt/rubric text.

use image::Rgb;
use nalgebra::Vector2;

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod geometry;
pub mod output;
pub mod prompts;
pub mod renderer;
pub mod scenario;
pub mod utils;
pub mod video;

pub type Vec2 = Vector2<f64>;
/// Image-space position: x to the right, y downward
pub type Point = Vec2;
pub type Color = Rgb<u8>;

/// Prelude
pub mod prelude {
    pub use crate::animation::{AnimationSynthesizer, FrameCounts};
    pub use crate::config::{SampleRange, TaskConfig, VideoFormat};
    pub use crate::error::{Error, Result};
    pub use crate::generator::{TaskGenerator, TaskRecord};
    pub use crate::geometry::{Edge, SceneGeometry};
    pub use crate::renderer::{SceneRenderer, SceneState};
    pub use crate::scenario::{Scenario, ScenarioSampler};
    pub use crate::{Color, Point, Vec2};
}
