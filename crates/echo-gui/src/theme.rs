use egui::Color32;

// Bench-instrument palette: grey enclosure, phosphor-green accents.
const ENCLOSURE: Color32 = Color32::from_rgb(52, 56, 58);
const PANEL: Color32 = Color32::from_rgb(66, 71, 73);
const RAISED: Color32 = Color32::from_rgb(84, 90, 92);
const LABEL: Color32 = Color32::from_rgb(226, 228, 220);
const DIM_LABEL: Color32 = Color32::from_rgb(150, 156, 150);
const PHOSPHOR: Color32 = Color32::from_rgb(64, 255, 90);
const AMBER: Color32 = Color32::from_rgb(255, 176, 48);
const WARNING_RED: Color32 = Color32::from_rgb(230, 70, 60);

pub const SCREEN_BEZEL: Color32 = Color32::from_rgb(20, 22, 22);
pub const PROBE: Color32 = Color32::from_rgb(120, 126, 130);
pub const AXIS: Color32 = Color32::from_rgb(70, 90, 74);
pub const SPECIMEN: Color32 = Color32::from_rgb(170, 176, 184);
pub const PULSE_OUT: Color32 = PHOSPHOR;
pub const PULSE_ECHO: Color32 = AMBER;
pub const KNOB_BODY: Color32 = Color32::from_rgb(30, 32, 33);
pub const KNOB_RIM: Color32 = RAISED;
pub const KNOB_INDICATOR: Color32 = LABEL;
pub const POWER_ON: Color32 = PHOSPHOR;
pub const POWER_OFF: Color32 = WARNING_RED;

static INIT: std::sync::Once = std::sync::Once::new();

/// Apply the instrument palette to the egui context. Runs once per process.
pub fn apply(ctx: &egui::Context) {
    INIT.call_once(|| {
        let mut visuals = egui::Visuals::dark();

        visuals.panel_fill = ENCLOSURE;
        visuals.window_fill = PANEL;
        visuals.faint_bg_color = PANEL;
        visuals.extreme_bg_color = SCREEN_BEZEL;

        visuals.selection.bg_fill = Color32::from_rgb(40, 120, 60);
        visuals.selection.stroke = egui::Stroke::new(1.0, PHOSPHOR);
        visuals.warn_fg_color = AMBER;
        visuals.error_fg_color = WARNING_RED;

        visuals.widgets.noninteractive.bg_fill = ENCLOSURE;
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, LABEL);

        visuals.widgets.inactive.bg_fill = RAISED;
        visuals.widgets.inactive.weak_bg_fill = RAISED;
        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, DIM_LABEL);

        visuals.widgets.hovered.weak_bg_fill = PANEL;
        visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.5, LABEL);
        visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, PHOSPHOR);

        visuals.widgets.active.weak_bg_fill = Color32::from_rgb(40, 120, 60);
        visuals.widgets.active.fg_stroke = egui::Stroke::new(2.0, LABEL);

        visuals.window_stroke = egui::Stroke::new(1.0, RAISED);

        ctx.set_visuals(visuals);
        log::debug!("instrument theme applied");
    });
}
