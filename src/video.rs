//! Video encoders
//!
//! Video output is best effort: an encoder reports whether it can run at all, and a failed
//! encode yields no video rather than failing the task. I/O errors while writing still
//! propagate.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, Command, Stdio};

use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use log::{debug, warn};

use crate::config::VideoFormat;
use crate::error::Result;

pub type Encoder = Box<dyn VideoEncoder + Send + Sync>;

pub trait VideoEncoder {
    fn is_available(&self) -> bool;

    /// Encode `frames` to `path`; `None` when the encoder produced nothing
    fn encode(&self, frames: &[RgbImage], path: &Path, fps: u32) -> Result<Option<PathBuf>>;

    fn format(&self) -> VideoFormat;
}

/// Encoder for the configured format, or `None` when it cannot run here
pub fn from_format(format: VideoFormat) -> Option<Encoder> {
    let encoder: Encoder = match format {
        VideoFormat::Mp4 => Box::new(FfmpegEncoder::default()),
        VideoFormat::Gif => Box::new(GifEncoder::default()),
    };
    if encoder.is_available() {
        Some(encoder)
    } else {
        warn!("{:?} video encoder unavailable, videos will be skipped", format);
        None
    }
}

/// H.264 MP4 through an external `ffmpeg` process
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
}
impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::with_binary("ffmpeg")
    }
}
impl FfmpegEncoder {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}
impl VideoEncoder for FfmpegEncoder {
    fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn encode(&self, frames: &[RgbImage], path: &Path, fps: u32) -> Result<Option<PathBuf>> {
        let Some(first) = frames.first() else {
            return Ok(None);
        };
        let (width, height) = first.dimensions();
        let mut child = Command::new(&self.binary)
            .args(["-y", "-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"])
            .arg("-s")
            .arg(format!("{width}x{height}"))
            .arg("-r")
            .arg(fps.to_string())
            .args(["-i", "-"])
            // yuv420p needs even dimensions
            .args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2"])
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // An early ffmpeg exit closes the pipe; its exit status says what went wrong
        let written = match child.stdin.take() {
            Some(stdin) => write_frames(stdin, frames),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;
        match written {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("ffmpeg closed its input early for {}", path.display());
            }
            written => written?,
        }
        if output.status.success() {
            debug!("encoded {} frames to {}", frames.len(), path.display());
            Ok(Some(path.to_path_buf()))
        } else {
            warn!(
                "ffmpeg failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            Ok(None)
        }
    }

    fn format(&self) -> VideoFormat {
        VideoFormat::Mp4
    }
}

/// Stream raw frames into ffmpeg; the pipe closes when the writer drops
fn write_frames(stdin: ChildStdin, frames: &[RgbImage]) -> io::Result<()> {
    let mut stdin = BufWriter::new(stdin);
    for frame in frames {
        stdin.write_all(frame.as_raw())?;
    }
    stdin.flush()
}

/// Animated GIF through the `image` crate; always available
#[derive(Debug, Clone)]
pub struct GifEncoder {
    /// 1 (best quality) to 30 (fastest)
    speed: i32,
}
impl Default for GifEncoder {
    fn default() -> Self {
        Self { speed: 10 }
    }
}
impl VideoEncoder for GifEncoder {
    fn is_available(&self) -> bool {
        true
    }

    fn encode(&self, frames: &[RgbImage], path: &Path, fps: u32) -> Result<Option<PathBuf>> {
        if frames.is_empty() {
            return Ok(None);
        }
        let delay = Delay::from_numer_denom_ms(1000, fps.max(1));
        let file = BufWriter::new(File::create(path)?);
        let mut encoder = ImageGifEncoder::new_with_speed(file, self.speed);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames.iter().map(|f| {
            let rgba = DynamicImage::ImageRgb8(f.clone()).into_rgba8();
            Frame::from_parts(rgba, 0, 0, delay)
        }))?;
        debug!("encoded {} frames to {}", frames.len(), path.display());
        Ok(Some(path.to_path_buf()))
    }

    fn format(&self) -> VideoFormat {
        VideoFormat::Gif
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;

    #[test]
    fn test_missing_ffmpeg_is_unavailable() {
        let encoder = FfmpegEncoder::with_binary("/nonexistent/ffmpeg-binary");
        assert!(!encoder.is_available());
    }

    #[test]
    fn test_failed_ffmpeg_run_yields_no_video() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.mp4");
        let frames = vec![RgbImage::new(400, 400); 35];
        let encoder = FfmpegEncoder::with_binary("/bin/false");
        assert!(encoder.encode(&frames, &path, 10).unwrap().is_none());
        assert!(encoder.encode(&frames[..1], &path, 10).unwrap().is_none());
    }

    #[test]
    fn test_empty_frames_produce_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        assert!(GifEncoder::default().encode(&[], &path, 10).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_gif_round_trip_frame_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        let frames: Vec<RgbImage> = (0..4u8)
            .map(|i| RgbImage::from_pixel(16, 8, image::Rgb([i * 60, 0, 0])))
            .collect();
        let written = GifEncoder::default().encode(&frames, &path, 10).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let decoder = GifDecoder::new(File::open(&path).unwrap()).unwrap();
        let decoded = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[0].buffer().dimensions(), (16, 8));
    }

    #[test]
    fn test_gif_encoder_is_selected() {
        let encoder = from_format(VideoFormat::Gif).unwrap();
        assert_eq!(encoder.format(), VideoFormat::Gif);
    }
}
