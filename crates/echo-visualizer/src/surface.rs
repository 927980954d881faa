use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha colour, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply alpha by `opacity` (clamped to `0..=1`).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { a: self.a * opacity.clamp(0.0, 1.0), ..self }
    }

    pub fn to_u8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// A 2D target the trace renderer paints into.
///
/// Coordinates are in pixels with the origin at the top-left corner and y
/// growing downward.
pub trait Surface {
    fn size(&self) -> Vec2;

    /// Overwrite every pixel, no blending.
    fn clear(&mut self, color: Rgba);

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_scales_alpha_only() {
        let c = Rgba::rgba(0.2, 0.4, 0.6, 0.5).with_opacity(0.5);
        assert!((c.a - 0.25).abs() < 1e-6);
        assert!((c.g - 0.4).abs() < 1e-6);
        assert_eq!(Rgba::BLACK.with_opacity(3.0).a, 1.0);
    }

    #[test]
    fn test_to_u8() {
        assert_eq!(Rgba::rgb(1.0, 0.5, 0.0).to_u8(), [255, 128, 0, 255]);
        assert_eq!(Rgba::rgba(2.0, -1.0, 0.0, 0.0).to_u8(), [255, 0, 0, 0]);
    }
}
