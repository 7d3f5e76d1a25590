//! Utils

use crate::Color;
use image::Rgb;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);
pub const BLUE: Color = Rgb([0, 0, 255]);
pub const RED: Color = Rgb([255, 0, 0]);

pub fn gray(level: u8) -> Color {
    Rgb([level, level, level])
}

/// Mix `fg` over `bg` by a coverage in `[0, 1]`
pub fn blend(fg: Color, bg: Color, coverage: f32) -> Color {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| scale_color(f as f32 * a + b as f32 * (1.0 - a));
    Rgb([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])])
}

/// Round and clamp a channel value to between 0 and 255
fn scale_color(val: f32) -> u8 {
    val.round().min(255.0).max(0.0) as u8
}
