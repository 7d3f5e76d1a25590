//! Writing generated tasks to disk
//!
//! Each task gets its own directory `{root}/{domain}_task/{id}/` holding both stills, the prompt,
//! the rubric, a metadata file and, when one was produced, the ground truth video.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::generator::TaskRecord;
use crate::prompts::TaskType;
use crate::scenario::Scenario;

pub const FIRST_FRAME: &str = "first_frame.png";
pub const FINAL_FRAME: &str = "final_frame.png";
pub const PROMPT_FILE: &str = "prompt.txt";
pub const RUBRIC_FILE: &str = "rubric.txt";
pub const METADATA_FILE: &str = "metadata.yaml";

#[derive(Debug, Serialize)]
struct TaskMetadata<'a> {
    id: &'a str,
    domain: &'a str,
    task_type: TaskType,
    scenario: &'a Scenario,
    video: Option<String>,
}

pub fn task_dir(root: &Path, record: &TaskRecord) -> PathBuf {
    root.join(format!("{}_task", record.domain)).join(&record.id)
}

/// Write `record` under `root` and return its directory
pub fn write_task(record: &TaskRecord, root: &Path) -> Result<PathBuf> {
    let dir = task_dir(root, record);
    fs::create_dir_all(&dir)?;

    record.initial_image.save(dir.join(FIRST_FRAME))?;
    record.final_image.save(dir.join(FINAL_FRAME))?;
    fs::write(dir.join(PROMPT_FILE), &record.prompt)?;
    fs::write(dir.join(RUBRIC_FILE), &record.rubric)?;

    let video = match &record.video_path {
        Some(src) => {
            let ext = src.extension().and_then(|e| e.to_str()).unwrap_or("mp4");
            let name = format!("ground_truth.{ext}");
            fs::copy(src, dir.join(&name))?;
            Some(name)
        }
        None => None,
    };

    let metadata = TaskMetadata {
        id: &record.id,
        domain: &record.domain,
        task_type: record.task_type,
        scenario: &record.scenario,
        video,
    };
    fs::write(dir.join(METADATA_FILE), serde_yaml::to_string(&metadata)?)?;
    debug!("wrote {} to {}", record.id, dir.display());
    Ok(dir)
}
