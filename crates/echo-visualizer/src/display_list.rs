use glam::Vec2;

use crate::surface::{Rgba, Surface};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    FillRect { min: Vec2, max: Vec2, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    Polyline { points: Vec<Vec2>, width: f32, color: Rgba },
}

/// A surface that records draw calls instead of producing pixels.
///
/// Lets tests assert on what was drawn, and lets a frame be captured once
/// and replayed onto another surface.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: Vec2,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width, height), ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Ops recorded since the last `Clear`, inclusive.
    pub fn current_frame(&self) -> &[DrawOp] {
        let start = self.ops.iter().rposition(|op| matches!(op, DrawOp::Clear(_))).unwrap_or(0);
        &self.ops[start..]
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Vec2], f32, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Polyline { points, width, color } => Some((points.as_slice(), *width, *color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, f32, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { from, to, width, color } => Some((*from, *to, *width, *color)),
            _ => None,
        })
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Draw every recorded op onto `target`, in order.
    pub fn replay(&self, target: &mut dyn Surface) {
        for op in &self.ops {
            match op {
                DrawOp::Clear(color) => target.clear(*color),
                DrawOp::FillRect { min, max, color } => target.fill_rect(*min, *max, *color),
                DrawOp::Line { from, to, width, color } => target.line(*from, *to, *width, *color),
                DrawOp::Polyline { points, width, color } => target.polyline(points, *width, *color),
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        self.ops.push(DrawOp::FillRect { min, max, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(DrawOp::Line { from, to, width, color });
    }

    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), width, color });
    }
}
