//! Prompt and rubric text

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// Reported when no scenario is available
const FALLBACK_REFLECTIVITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Default,
}

const DEFAULT_PROMPTS: [&str; 3] = [
    "Given the mirror reflectivity = {reflectivity}, predict the reflection of light when it hits the mirror. The reflected ray should extend to the edge of the image.",
    "Given the mirror reflectivity = {reflectivity}, predict how light reflects when it encounters the mirror. Extend the reflected ray to the image boundary.",
    "Given the mirror reflectivity = {reflectivity}, predict the light reflection from the mirror surface. The reflected ray must extend all the way to the edge of the image.",
];

const DEFAULT_RUBRIC: &str = "\
The final frame must keep the mirror, its hatching, the normal and the blue incident ray \
exactly as in the first frame. A red reflected ray must start at the point where the incident \
ray meets the mirror and leave on the opposite side of the normal, making the same angle with \
the normal as the incident ray (law of reflection). The reflected ray must be straight, point \
away from the mirror, and extend all the way to the nearest edge of the image. Penalize a \
reflected ray on the same side as the incident ray, a wrong angle, a ray that stops short of \
the edge or crosses below the mirror, and any change to the original scene.";

/// Natural-language templates keyed by task type
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBook;
impl PromptBook {
    pub fn all_prompts(&self, task_type: TaskType) -> &'static [&'static str] {
        match task_type {
            TaskType::Default => &DEFAULT_PROMPTS,
        }
    }

    /// A random template for `task_type` with the reflectivity filled in to two decimals
    pub fn prompt<R: Rng>(
        &self,
        task_type: TaskType,
        scenario: Option<&Scenario>,
        rng: &mut R,
    ) -> String {
        let templates = self.all_prompts(task_type);
        let template = templates.choose(rng).copied().unwrap_or(DEFAULT_PROMPTS[0]);
        let reflectivity = scenario.map_or(FALLBACK_REFLECTIVITY, |s| s.reflectivity);
        template.replace("{reflectivity}", &format!("{reflectivity:.2}"))
    }

    pub fn rubric(&self, task_type: TaskType) -> &'static str {
        match task_type {
            TaskType::Default => DEFAULT_RUBRIC,
        }
    }
}
