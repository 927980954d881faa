use echo_visualizer::{Rgba, Surface};
use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::Vec2;

/// Paints renderer output into a rectangle of an egui painter.
///
/// Surface coordinates are relative to `rect.min`.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, p: Vec2) -> Pos2 {
        Pos2::new(self.rect.min.x + p.x, self.rect.min.y + p.y)
    }
}

pub fn color32(c: Rgba) -> Color32 {
    let [r, g, b, a] = c.to_u8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Surface for EguiSurface<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(self.rect, 0.0, color32(color));
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        let r = Rect::from_two_pos(self.pos(min), self.pos(max));
        self.painter.rect_filled(r, 0.0, color32(color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.painter
            .line_segment([self.pos(from), self.pos(to)], Stroke::new(width, color32(color)));
    }

    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        if points.len() < 2 {
            return;
        }
        let pts: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
        self.painter.add(egui::Shape::line(pts, Stroke::new(width, color32(color))));
    }
}
