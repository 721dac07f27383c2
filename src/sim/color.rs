//! RGBA color carried by every arena entity

use serde::{Deserialize, Serialize};

/// An RGBA color
///
/// Color channels are 0-255. Alpha is opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color; alpha is clamped to [0, 1] (NaN becomes opaque)
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) };
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Alpha as a 0-255 channel, for renderers that want four bytes
    pub fn alpha_u8(&self) -> u8 {
        (self.a * 255.0).round() as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
