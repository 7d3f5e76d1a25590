//! Task generation
//!
//! Ties the pipeline together: sample a scenario, render both stills, optionally animate and
//! encode a video, then attach prompt and rubric text. A task either completes into a full
//! [`TaskRecord`] or fails as a whole.

use std::path::PathBuf;

use image::RgbImage;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{AnimationSynthesizer, FrameCounts};
use crate::config::TaskConfig;
use crate::error::Result;
use crate::fonts::FontBook;
use crate::prompts::{PromptBook, TaskType};
use crate::renderer::{SceneRenderer, SceneState};
use crate::scenario::{Scenario, ScenarioSampler};
use crate::video::{self, Encoder};

/// One generated example. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub domain: String,
    pub task_type: TaskType,
    pub scenario: Scenario,
    pub prompt: String,
    pub rubric: String,
    pub initial_image: RgbImage,
    pub final_image: RgbImage,
    pub video_path: Option<PathBuf>,
}

pub struct TaskGenerator {
    config: TaskConfig,
    renderer: SceneRenderer,
    encoder: Option<Encoder>,
    prompts: PromptBook,
}
impl TaskGenerator {
    pub fn new(config: TaskConfig) -> Result<Self> {
        config.validate()?;
        let fonts = FontBook::new(config.font_candidates.clone());
        let renderer = SceneRenderer::with_fonts(
            config.width(),
            config.height(),
            &fonts,
            config.label_font_size,
        );
        let encoder = if config.generate_videos {
            video::from_format(config.video_format)
        } else {
            None
        };
        Ok(Self {
            config,
            renderer,
            encoder,
            prompts: PromptBook,
        })
    }

    /// Swap the video encoder, e.g. to disable videos or to inject one
    pub fn with_encoder(mut self, encoder: Option<Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn task_id(&self, index: usize) -> String {
        format!("{}_{:04}", self.config.domain, index)
    }

    /// Task `index` of a batch; the same `(seed, index)` always yields the same task
    pub fn generate_indexed(&self, index: usize, seed: u64) -> Result<TaskRecord> {
        let rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
        self.generate_task(&self.task_id(index), rng)
    }

    pub fn generate_task<R: Rng>(&self, task_id: &str, rng: R) -> Result<TaskRecord> {
        let mut sampler =
            ScenarioSampler::new(self.config.reflectivity, self.config.incident_angle, rng)?;
        let scenario = sampler.sample();

        let initial_image = self.renderer.render(&scenario, SceneState::Initial);
        let final_image = self.renderer.render(&scenario, SceneState::Final);

        let video_path = if self.config.generate_videos {
            self.generate_video(task_id, &scenario)?
        } else {
            None
        };

        let task_type = TaskType::default();
        let prompt = self
            .prompts
            .prompt(task_type, Some(&scenario), sampler.rng_mut());
        let rubric = self.prompts.rubric(task_type).to_string();

        info!(
            "generated {task_id}: incident {:.1}°, reflectivity {:.2}{}",
            scenario.incident_angle_deg,
            scenario.reflectivity,
            if video_path.is_some() { ", with video" } else { "" }
        );
        Ok(TaskRecord {
            id: task_id.to_string(),
            domain: self.config.domain.clone(),
            task_type,
            scenario,
            prompt,
            rubric,
            initial_image,
            final_image,
            video_path,
        })
    }

    fn generate_video(&self, task_id: &str, scenario: &Scenario) -> Result<Option<PathBuf>> {
        let Some(encoder) = &self.encoder else {
            return Ok(None);
        };
        let dir = self.config.video_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!(
            "{task_id}_ground_truth.{}",
            encoder.format().extension()
        ));

        let counts = FrameCounts {
            hold: self.config.hold_frames,
            transition: self.config.transition_frames,
        };
        let frames = AnimationSynthesizer::new(&self.renderer, counts).synthesize(scenario);
        encoder.encode(&frames, &path, self.config.video_fps)
    }
}
