//! Fonts for the angle label
//!
//! Candidate font files are tried in order. When none of them loads, a small built-in bitmap
//! font takes over, so a label can always be drawn.

use std::path::PathBuf;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use log::{debug, warn};

/// One rasterized pixel of text, relative to the text's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub x: i32,
    pub y: i32,
    pub value: f32,
}

/// A resolved font
pub enum LabelFont {
    Outline(FontVec),
    Builtin,
}
impl LabelFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin)
    }

    /// Rasterize `text` at a pixel height of `size`
    pub fn rasterize(&self, text: &str, size: f32) -> Vec<Coverage> {
        match self {
            LabelFont::Outline(font) => rasterize_outline(font, text, size),
            LabelFont::Builtin => rasterize_builtin(text, size),
        }
    }
}
impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::Outline(_) => write!(f, "LabelFont::Outline"),
            LabelFont::Builtin => write!(f, "LabelFont::Builtin"),
        }
    }
}

/// Ordered font fallback chain
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    candidates: Vec<PathBuf>,
}
impl FontBook {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// First candidate that loads, otherwise the built-in font. Never fails.
    pub fn resolve(&self) -> LabelFont {
        for path in &self.candidates {
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!("font {} unavailable: {e}", path.display());
                    continue;
                }
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    debug!("using font {}", path.display());
                    return LabelFont::Outline(font);
                }
                Err(e) => debug!("font {} rejected: {e}", path.display()),
            }
        }
        warn!("no font candidate could be loaded, using the built-in bitmap font");
        LabelFont::Builtin
    }
}

fn rasterize_outline(font: &FontVec, text: &str, size: f32) -> Vec<Coverage> {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut caret = point(0.0, scaled.ascent());
    let mut out = Vec::new();

    for c in text.chars() {
        let glyph_id = scaled.glyph_id(c);
        let glyph = glyph_id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(glyph_id);
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, value| {
                if value > 0.0 {
                    out.push(Coverage {
                        x: bounds.min.x as i32 + gx as i32,
                        y: bounds.min.y as i32 + gy as i32,
                        value,
                    });
                }
            });
        }
    }
    out
}

const GLYPH_WIDTH: i32 = 5;

/// 5x7 bitmaps, one byte per row, bit 4 is the leftmost column
fn builtin_glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '°' => [0x0C, 0x12, 0x12, 0x0C, 0x00, 0x00, 0x00],
        'θ' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x0E],
        _ => [0; 7],
    }
}

fn rasterize_builtin(text: &str, size: f32) -> Vec<Coverage> {
    // The 7-row glyph plus spacing fills roughly `size` pixels
    let scale = ((size / 10.0).round() as i32).max(1);
    let advance = (GLYPH_WIDTH + 1) * scale;
    let mut out = Vec::new();

    for (i, c) in text.chars().enumerate() {
        let origin_x = i as i32 * advance;
        for (row, bits) in builtin_glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        out.push(Coverage {
                            x: origin_x + col * scale + dx,
                            y: row as i32 * scale + dy,
                            value: 1.0,
                        });
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_candidates_fall_back_to_builtin() {
        let book = FontBook::new(vec![
            PathBuf::from("/definitely/not/here.ttf"),
            PathBuf::from("also-missing.ttf"),
        ]);
        assert!(book.resolve().is_builtin());
        assert!(FontBook::default().resolve().is_builtin());
    }

    #[test]
    fn test_garbage_font_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        let book = FontBook::new(vec![path]);
        assert!(book.resolve().is_builtin());
    }

    #[test]
    fn test_builtin_label_is_legible() {
        let pixels = LabelFont::Builtin.rasterize("θ = 30°", 20.0);
        assert!(!pixels.is_empty());
        let max_x = pixels.iter().map(|c| c.x).max().unwrap();
        let max_y = pixels.iter().map(|c| c.y).max().unwrap();
        // 7 glyphs of 12px advance at scale 2
        assert!(max_x < 7 * 12);
        assert_eq!(max_y, 13);
        assert!(pixels.iter().all(|c| c.x >= 0 && c.y >= 0));
    }

    #[test]
    fn test_builtin_distinguishes_digits() {
        let a = LabelFont::Builtin.rasterize("30", 10.0);
        let b = LabelFont::Builtin.rasterize("80", 10.0);
        assert_ne!(a, b);
        assert!(LabelFont::Builtin.rasterize("   ", 10.0).is_empty());
    }
}
