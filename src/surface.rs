//! The 2D immediate-mode drawing contract the night sky paints through.
//!
//! [`Surface`] is deliberately small: exactly the calls the sky needs (rect
//! fill, filled circle, stroked line, global alpha, colours, glow).
//! [`crate::frame::SkyFrame`] implements it for the window by recording the
//! shapes that the render systems turn into meshes and gizmo lines; tests
//! implement it with a recorder.

use crate::error::{SkyError, SkyResult};
use bevy::color::Color;

/// Straight (non-premultiplied) colour: 8-bit channels plus a float alpha,
/// the same shape as a CSS `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` (leading `#` optional) into an opaque colour.
    pub fn from_hex(hex: &str) -> SkyResult<Self> {
        let invalid = || SkyError::InvalidColor {
            value: hex.to_string(),
        };
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
    }

    /// Same colour with alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::srgba(
            c.r as f32 / 255.0,
            c.g as f32 / 255.0,
            c.b as f32 / 255.0,
            c.a.clamp(0.0, 1.0),
        )
    }
}

/// Minimal 2D drawing context.
///
/// Coordinates are in pixels, origin top-left, y pointing down.  Draw state
/// (alpha, colours, line width, shadow) persists across calls until changed or
/// restored.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Push the current draw state.
    fn save(&mut self);
    /// Pop the draw state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Multiplier applied to the alpha of everything drawn afterwards.
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);
    /// Glow painted beneath subsequent shapes.  `blur == 0` disables it.
    fn set_shadow(&mut self, color: Rgba, blur: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgba::from_hex("#011020").unwrap(), Rgba::new(1, 16, 32, 1.0));
        assert_eq!(Rgba::from_hex("FFffFF").unwrap(), Rgba::WHITE);
    }

    #[test]
    fn converts_to_bevy_color_with_clamped_alpha() {
        let color: Color = Rgba::new(255, 0, 51, 1.5).into();
        let srgba = color.to_srgba();
        assert_eq!(srgba.red, 1.0);
        assert_eq!(srgba.green, 0.0);
        assert!((srgba.blue - 0.2).abs() < 1e-6);
        assert_eq!(srgba.alpha, 1.0);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["#fff", "#01102", "#0110200", "#zz1020", "#+f+f+f", "", "#ééé"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(SkyError::InvalidColor { .. })),
                "{bad:?} must be rejected"
            );
        }
    }
}
