//! Generator configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A closed sampling interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}
impl SampleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Fail fast on an empty or non-finite interval. There is no clamping.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Container used for the ground truth video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Gif,
}
impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Gif => "gif",
        }
    }
}

/// Task Config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub domain: String,
    /// Canvas `[width, height]` in pixels
    pub image_size: [u32; 2],
    pub reflectivity: SampleRange,
    /// Incident angle in degrees, measured from the surface normal
    pub incident_angle: SampleRange,
    pub generate_videos: bool,
    pub video_format: VideoFormat,
    pub video_fps: u32,
    pub hold_frames: usize,
    pub transition_frames: usize,
    /// Defaults to the system temp dir
    pub video_dir: Option<PathBuf>,
    pub font_candidates: Vec<PathBuf>,
    pub label_font_size: f32,
}
impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            domain: "optics_reflection".to_string(),
            image_size: [400, 400],
            reflectivity: SampleRange::new(0.5, 1.0),
            incident_angle: SampleRange::new(15.0, 75.0),
            generate_videos: true,
            video_format: VideoFormat::Mp4,
            video_fps: 10,
            hold_frames: 5,
            transition_frames: 25,
            video_dir: None,
            font_candidates: [
                "Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/Library/Fonts/Arial.ttf",
                "DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            label_font_size: 20.0,
        }
    }
}
impl TaskConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.reflectivity.validate("reflectivity")?;
        self.incident_angle.validate("incident_angle")?;
        let [width, height] = self.image_size;
        if width == 0 || height == 0 {
            return Err(Error::InvalidCanvas { width, height });
        }
        if self.generate_videos && self.video_fps == 0 {
            return Err(Error::InvalidConfig(
                "video_fps must be positive when videos are enabled".to_string(),
            ));
        }
        if !(self.label_font_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "label_font_size must be positive, got {}",
                self.label_font_size
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.image_size[0]
    }

    pub fn height(&self) -> u32 {
        self.image_size[1]
    }

    pub fn video_dir(&self) -> PathBuf {
        let root = self.video_dir.clone().unwrap_or_else(std::env::temp_dir);
        root.join(format!("{}_videos", self.domain))
    }
}
