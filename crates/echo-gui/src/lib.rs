pub mod controls;
pub mod painter;
pub mod scope;
pub mod theme;

pub use controls::ControlPanel;
pub use painter::EguiSurface;
pub use scope::{draw_schematic, draw_scope};

use std::time::Instant;

use echo_instrument::Instrument;
use echo_synth::FrameAction;

/// Draw the complete instrument: front panel, screen and, if enabled, the
/// schematic strip.
///
/// Call once per egui pass. Input from the panel is queued and applied by
/// the scope's tick in the same pass.
pub fn draw_instrument(
    ui: &mut egui::Ui,
    panel: &mut ControlPanel,
    instrument: &mut Instrument,
    now: Instant,
) -> FrameAction {
    theme::apply(ui.ctx());

    panel.show(ui, instrument);
    ui.add_space(8.0);
    let action = draw_scope(ui, instrument, now);

    if panel.schematic_visible() {
        ui.add_space(8.0);
        draw_schematic(ui, instrument);
        ui.ctx().request_repaint();
    }
    action
}
