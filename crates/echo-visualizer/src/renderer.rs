use echo_core::Scene;
use glam::Vec2;

use crate::grid::{draw_grid, trace_opacity};
use crate::settings::RenderSettings;
use crate::surface::{Rgba, Surface};

/// Paints one oscilloscope frame: grid, trace and measurement cursor.
#[derive(Debug, Clone, Default)]
pub struct TraceRenderer {
    settings: RenderSettings,
}

impl TraceRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Draw a full frame onto `surface`.
    ///
    /// Always clears first. A non-positive window leaves the surface clear,
    /// and a trace with fewer than two samples draws no beam.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, trace: &[f32], scene: &Scene, measured: f32) {
        let s = &self.settings;
        surface.clear(s.background);

        let size = surface.size();
        let window = scene.window_mm();
        if !(window > 0.0) || size.x <= 0.0 || size.y <= 0.0 {
            log::trace!("skipping frame: window {window}mm, surface {size}");
            return;
        }

        draw_grid(surface, scene, s);

        if trace.len() >= 2 {
            let points = trace_points(trace, scene, size, s);
            let color = Rgba { a: trace_opacity(scene.brightness), ..s.trace_color };
            surface.polyline(&points, s.trace_width, color);
        }

        if let Some(x) = cursor_x(measured, scene, size.x) {
            surface.line(Vec2::new(x, 0.0), Vec2::new(x, size.y), s.cursor_width, s.cursor_color);
        }
    }
}

/// Map samples to surface coordinates.
///
/// Sample `i` of `n` sits at `x = i / n * width`; amplitude rises from the
/// baseline toward the top, shrinking slightly at higher scales.
pub fn trace_points(trace: &[f32], scene: &Scene, size: Vec2, settings: &RenderSettings) -> Vec<Vec2> {
    let n = trace.len();
    if n == 0 {
        return Vec::new();
    }
    let center_y = settings.baseline_ratio * size.y;
    let scale_steps = scene.scale.saturating_sub(1) as f32;
    let amp_scale = settings.amplitude_ratio * size.y * (1.0 - settings.scale_correction * scale_steps);

    trace
        .iter()
        .enumerate()
        .map(|(i, v)| Vec2::new(i as f32 / n as f32 * size.x, center_y - v * amp_scale))
        .collect()
}

/// Cursor column for a measured position, or `None` when it falls outside
/// the visible window (or is negative).
pub fn cursor_x(measured: f32, scene: &Scene, width: f32) -> Option<f32> {
    let (start, end) = scene.window();
    let window = end - start;
    if !measured.is_finite() || measured < 0.0 || measured < start || measured > end || window <= 0.0 {
        return None;
    }
    Some((measured - start) / window * width)
}
