use std::time::Instant;

use echo_core::Task;
use echo_instrument::Instrument;
use echo_synth::{FrameAction, MarkerKind};
use echo_visualizer::{Rgba, Surface};
use egui::{Color32, Pos2, Stroke, Vec2};

use crate::painter::EguiSurface;
use crate::theme;

/// Height-to-width ratio of the scope screen.
const SCREEN_ASPECT: f32 = 0.6;

/// Draw the oscilloscope screen and advance the instrument by one tick.
pub fn draw_scope(ui: &mut egui::Ui, instrument: &mut Instrument, now: Instant) -> FrameAction {
    let width = ui.available_width().max(1.0);
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, width * SCREEN_ASPECT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let mut surface = EguiSurface::new(&painter, rect);

    // Every egui pass starts from an empty canvas; keep the screen dark
    // on idle ticks too.
    surface.clear(Rgba::BLACK);
    let action = instrument.tick(now, &mut surface);

    if instrument.is_powered() || instrument.is_adjusting() {
        ui.ctx().request_repaint();
    }
    action
}

/// Draw the probe axis with the current pulse markers.
pub fn draw_schematic(ui: &mut egui::Ui, instrument: &Instrument) {
    let width = ui.available_width().max(1.0);
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, 90.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, theme::SCREEN_BEZEL);

    let scene = instrument.scene();
    let (_, far) = scene.window();
    let span = far.max(1.0);
    let axis_y = rect.center().y;
    let left = rect.left() + 24.0;
    let right = rect.right() - 12.0;
    let to_x = |mm: f32| left + (mm / span).clamp(0.0, 1.0) * (right - left);

    // Probe
    painter.rect_filled(
        egui::Rect::from_center_size(Pos2::new(left - 10.0, axis_y), Vec2::new(14.0, 30.0)),
        2.0,
        theme::PROBE,
    );
    painter.line_segment([Pos2::new(left, axis_y), Pos2::new(right, axis_y)], Stroke::new(1.0, theme::AXIS));

    // Specimen
    match scene.task {
        Task::Plate => {
            if let Some(w) = scene.plate.width {
                let x0 = to_x(scene.plate.distance);
                let x1 = to_x(scene.plate.distance + w.mm());
                painter.rect_filled(
                    egui::Rect::from_min_max(Pos2::new(x0, rect.top() + 10.0), Pos2::new(x1.max(x0 + 1.0), rect.bottom() - 10.0)),
                    0.0,
                    theme::SPECIMEN,
                );
            }
        }
        Task::Object => {
            let px_per_mm = (right - left) / span;
            let center = Pos2::new(to_x(scene.object.distance), axis_y);
            let outline: Vec<Pos2> = scene
                .object
                .shape
                .outline(scene.object.rotation_deg)
                .into_iter()
                .map(|v| Pos2::new(center.x + v.x * px_per_mm, center.y - v.y * px_per_mm))
                .collect();
            painter.add(egui::Shape::closed_line(outline, Stroke::new(1.5, theme::SPECIMEN)));
        }
        Task::Cylinder => {
            let front = instrument.synthesizer().config().cylinder_front_mm;
            for mm in [front, front + scene.cylinder.thickness] {
                let x = to_x(mm);
                painter.line_segment(
                    [Pos2::new(x, rect.top() + 8.0), Pos2::new(x, rect.bottom() - 8.0)],
                    Stroke::new(2.0, theme::SPECIMEN),
                );
            }
        }
    }

    for marker in instrument.schematic_markers() {
        let color = match marker.kind {
            MarkerKind::Outgoing => theme::PULSE_OUT,
            MarkerKind::Echo => theme::PULSE_ECHO,
        };
        painter.circle_filled(Pos2::new(to_x(marker.position_mm), axis_y), 4.0, color);
    }

    painter.text(
        rect.left_top() + Vec2::new(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!("{}", scene.task),
        egui::FontId::proportional(11.0),
        Color32::from_gray(180),
    );
}
