//! Graticule drawing.
//!
//! Task 1 gets a ruler: a checkerboard whose columns are one minor unit wide
//! and sit at absolute positions, so panning the start position slides the
//! ruler with the trace. The other tasks get a fixed division grid that
//! ignores the window.

use echo_core::{Scene, Task};
use glam::Vec2;

use crate::settings::RenderSettings;
use crate::surface::Surface;

/// Minor ruler unit at scale 1, in mm.
pub const RULER_UNIT_MM: f32 = 10.0;
/// A major ruler line every this many minor units.
pub const RULER_MAJOR_EVERY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridLayout {
    Ruler { minor_mm: f32 },
    Divisions { columns: u32, rows: u32 },
}

impl GridLayout {
    pub fn for_scene(scene: &Scene) -> Self {
        match scene.task {
            Task::Plate => GridLayout::Ruler { minor_mm: RULER_UNIT_MM / scene.scale.max(1) as f32 },
            Task::Object => GridLayout::Divisions { columns: 10, rows: 10 },
            Task::Cylinder => GridLayout::Divisions { columns: 20, rows: 10 },
        }
    }
}

/// Grid opacity for a brightness knob value.
pub fn grid_opacity(brightness: u8) -> f32 {
    0.2 + 0.8 * brightness as f32 / 10.0
}

/// Beam opacity for a brightness knob value.
pub fn trace_opacity(brightness: u8) -> f32 {
    0.1 + 0.9 * brightness as f32 / 10.0
}

pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, scene: &Scene, settings: &RenderSettings) {
    let size = surface.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let opacity = grid_opacity(scene.brightness);

    match GridLayout::for_scene(scene) {
        GridLayout::Ruler { minor_mm } => draw_ruler(surface, scene, settings, minor_mm, opacity),
        GridLayout::Divisions { columns, rows } => {
            let color = settings.grid_color.with_opacity(opacity);
            for i in 0..=columns {
                let x = size.x * i as f32 / columns as f32;
                let width = if i * 2 == columns { settings.major_grid_width } else { settings.grid_width };
                surface.line(Vec2::new(x, 0.0), Vec2::new(x, size.y), width, color);
            }
            for j in 0..=rows {
                let y = size.y * j as f32 / rows as f32;
                let width = if j * 2 == rows { settings.major_grid_width } else { settings.grid_width };
                surface.line(Vec2::new(0.0, y), Vec2::new(size.x, y), width, color);
            }
        }
    }
}

fn draw_ruler<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    settings: &RenderSettings,
    minor_mm: f32,
    opacity: f32,
) {
    let size = surface.size();
    let (start, end) = scene.window();
    let window = end - start;
    if window <= 0.0 || minor_mm <= 0.0 {
        return;
    }
    let px_per_mm = size.x / window;
    let rows = settings.ruler_rows.max(1);
    let row_h = size.y / rows as f32;

    let first = (start / minor_mm).floor() as i64;
    let last = (end / minor_mm).ceil() as i64;

    let cell = settings.checker_color.with_opacity(opacity);
    for k in first..last {
        let x0 = ((k as f32 * minor_mm - start) * px_per_mm).max(0.0);
        let x1 = (((k + 1) as f32 * minor_mm - start) * px_per_mm).min(size.x);
        if x1 <= x0 {
            continue;
        }
        for row in 0..rows as i64 {
            if (k + row).rem_euclid(2) == 0 {
                let y0 = row as f32 * row_h;
                surface.fill_rect(Vec2::new(x0, y0), Vec2::new(x1, y0 + row_h), cell);
            }
        }
    }

    let color = settings.grid_color.with_opacity(opacity);
    for k in first..=last {
        let x = (k as f32 * minor_mm - start) * px_per_mm;
        if x < 0.0 || x > size.x {
            continue;
        }
        let width = if k.rem_euclid(RULER_MAJOR_EVERY) == 0 {
            settings.major_grid_width
        } else {
            settings.grid_width
        };
        surface.line(Vec2::new(x, 0.0), Vec2::new(x, size.y), width, color);
    }
}
