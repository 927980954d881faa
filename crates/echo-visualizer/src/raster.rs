//! CPU rasterizer over an [`image::RgbaImage`].
//!
//! No anti-aliasing: lines are stamped with square pens along a DDA walk and
//! every covered pixel is blended exactly once per primitive. Good enough for
//! headless frames and debug dumps.

use std::path::Path;

use echo_core::{EchoError, EchoResult};
use glam::Vec2;
use image::{ImageFormat, RgbaImage};

use crate::surface::{Rgba, Surface};

pub struct RasterSurface {
    image: RgbaImage,
    // Scratch for per-primitive pixel coverage.
    covered: Vec<(u32, u32)>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height), covered: Vec::new() }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> EchoResult<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| EchoError::Image(format!("{}: {e}", path.display())))?;
        log::info!("saved frame to {}", path.display());
        Ok(())
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let a = color.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
        let out_a = a + da * (1.0 - a);
        let mix = |s: f32, d: f32| {
            if out_a <= 0.0 {
                0.0
            } else {
                (s * a + d * da * (1.0 - a)) / out_a
            }
        };
        dst.0 = Rgba::rgba(mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a).to_u8();
    }

    /// Record the square pen footprint centred on `p` into `covered`.
    fn stamp(&mut self, p: Vec2, half: f32) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        let x0 = ((p.x - half).floor() as i64).max(0);
        let x1 = ((p.x + half).ceil() as i64).min(w);
        let y0 = ((p.y - half).floor() as i64).max(0);
        let y1 = ((p.y + half).ceil() as i64).min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                self.covered.push((x as u32, y as u32));
            }
        }
    }

    fn flush_covered(&mut self, color: Rgba) {
        let mut covered = std::mem::take(&mut self.covered);
        covered.sort_unstable();
        covered.dedup();
        for &(x, y) in &covered {
            self.blend(x, y, color);
        }
        covered.clear();
        self.covered = covered;
    }

    fn walk_line(&mut self, from: Vec2, to: Vec2, width: f32) {
        if !from.is_finite() || !to.is_finite() {
            return;
        }
        let half = width.max(1.0) * 0.5;
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from + delta * t, half);
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    fn clear(&mut self, color: Rgba) {
        let px = image::Rgba(color.to_u8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        let lo = min.min(max).max(Vec2::ZERO);
        let hi = min.max(max).min(self.size());
        for y in lo.y.round() as u32..hi.y.round() as u32 {
            for x in lo.x.round() as u32..hi.x.round() as u32 {
                self.blend(x, y, color);
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.walk_line(from, to, width);
        self.flush_covered(color);
    }

    /// Joints between segments are blended once, not twice.
    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for pair in points.windows(2) {
            self.walk_line(pair[0], pair[1], width);
        }
        self.flush_covered(color);
    }
}
