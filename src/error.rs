//! Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A sampling range with `min > max` or a non-finite bound
    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
