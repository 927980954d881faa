use crossbeam::channel::Sender;
use echo_core::{Knob, PlateWidth, RotaryInput, SceneParameter, Task};
use echo_instrument::{Instrument, InstrumentCommand};
use egui::{Pos2, RichText, Stroke, Ui};

use crate::theme;

const KNOB_SIZE: f32 = 52.0;
/// Indicator angle at the bottom of the sweep, screen space (y down).
const SWEEP_START_DEG: f32 = 135.0;

fn to_glam(p: Pos2) -> glam::Vec2 {
    glam::Vec2::new(p.x, p.y)
}

/// Front panel: knobs, task selector, power switch and measurement buttons.
///
/// Never touches the instrument directly; every change is queued as an
/// [`InstrumentCommand`] and lands on the next tick.
pub struct ControlPanel {
    tx: Sender<InstrumentCommand>,
    intensity: Knob,
    brightness: Knob,
    scale: Knob,
    start: Knob,
    rotation: Knob,
    thickness: Knob,
    held: Option<f32>,
    schematic_visible: bool,
}

impl ControlPanel {
    pub fn new(tx: Sender<InstrumentCommand>) -> Self {
        let origin = glam::Vec2::ZERO;
        Self {
            tx,
            intensity: Knob::new(origin, 1.0, 10.0, 7.0).with_step(1.0),
            brightness: Knob::new(origin, 1.0, 10.0, 7.0).with_step(1.0),
            scale: Knob::new(origin, 1.0, 10.0, 1.0).with_step(1.0),
            start: Knob::new(origin, 0.0, 150.0, 0.0).with_step(0.5).with_sweep(720.0),
            rotation: Knob::new(origin, 0.0, 360.0, 0.0).with_step(1.0).with_sweep(360.0),
            thickness: Knob::new(origin, 1.0, 60.0, 10.0).with_step(1.0),
            held: None,
            schematic_visible: false,
        }
    }

    pub fn for_instrument(instrument: &Instrument) -> Self {
        Self::new(instrument.command_sender())
    }

    fn send(&self, cmd: InstrumentCommand) {
        if self.tx.try_send(cmd).is_err() {
            log::warn!("command queue full, input dropped");
        }
    }

    pub fn show(&mut self, ui: &mut Ui, instrument: &Instrument) {
        let scene = instrument.scene();

        self.sync(instrument);

        ui.horizontal(|ui| {
            for task in Task::ALL {
                let label = format!("Task {}", task.number());
                if ui.selectable_label(scene.task == task, label).clicked() && scene.task != task {
                    self.send(InstrumentCommand::SetTask(task));
                }
            }
            ui.separator();
            let (text, color) = if instrument.is_powered() {
                ("POWER ON", theme::POWER_ON)
            } else {
                ("POWER OFF", theme::POWER_OFF)
            };
            if ui.button(RichText::new(text).color(color).strong()).clicked() {
                self.send(InstrumentCommand::TogglePower);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if let Some(v) = knob(ui, &mut self.intensity, "Intensity") {
                self.send(InstrumentCommand::SetParameter(SceneParameter::Intensity(v as u8)));
            }
            if let Some(v) = knob(ui, &mut self.brightness, "Brightness") {
                self.send(InstrumentCommand::SetParameter(SceneParameter::Brightness(v as u8)));
            }
            if let Some(v) = knob(ui, &mut self.scale, "Scale") {
                self.send(InstrumentCommand::SetParameter(SceneParameter::Scale(v as u8)));
            }
            if let Some(v) = knob(ui, &mut self.start, "Start") {
                self.send(InstrumentCommand::SetParameter(SceneParameter::StartPosition(v)));
            }
            match scene.task {
                Task::Object => {
                    if let Some(v) = knob(ui, &mut self.rotation, "Rotation") {
                        self.send(InstrumentCommand::SetParameter(SceneParameter::Rotation(v)));
                    }
                }
                Task::Cylinder => {
                    if let Some(v) = knob(ui, &mut self.thickness, "Thickness") {
                        self.send(InstrumentCommand::SetParameter(SceneParameter::Thickness(v)));
                    }
                }
                Task::Plate => {}
            }
        });

        if scene.task == Task::Plate {
            ui.horizontal(|ui| {
                ui.label("Plate");
                if ui.selectable_label(scene.plate.width.is_none(), "none").clicked() {
                    self.send(InstrumentCommand::SetParameter(SceneParameter::PlateWidth(None)));
                }
                for w in PlateWidth::ALL {
                    let selected = scene.plate.width == Some(w);
                    if ui.selectable_label(selected, format!("{} mm", w.mm())).clicked() {
                        self.send(InstrumentCommand::SetParameter(SceneParameter::PlateWidth(Some(w))));
                    }
                }
            });
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(format!("Measured: {:.0} mm", instrument.measured_distance()));
            let minus = ui.add(egui::Button::new(" - ").sense(egui::Sense::click_and_drag()));
            let plus = ui.add(egui::Button::new(" + ").sense(egui::Sense::click_and_drag()));
            let wanted = if plus.is_pointer_button_down_on() {
                Some(1.0)
            } else if minus.is_pointer_button_down_on() {
                Some(-1.0)
            } else {
                None
            };
            for cmd in hold_transition(self.held, wanted) {
                self.send(cmd);
            }
            self.held = wanted;

            if ui.button("Auto").clicked() {
                self.send(InstrumentCommand::UpdateMeasuredDistance);
            }
            if ui.checkbox(&mut self.schematic_visible, "Schematic").changed() {
                self.send(InstrumentCommand::SetSchematicVisible(self.schematic_visible));
            }
        });
    }

    /// Pull values changed elsewhere into knobs the user isn't holding.
    fn sync(&mut self, instrument: &Instrument) {
        let scene = instrument.scene();
        let pairs: [(&mut Knob, f32); 6] = [
            (&mut self.intensity, scene.intensity as f32),
            (&mut self.brightness, scene.brightness as f32),
            (&mut self.scale, scene.scale as f32),
            (&mut self.start, scene.start_position),
            (&mut self.rotation, scene.object.rotation_deg),
            (&mut self.thickness, scene.cylinder.thickness),
        ];
        for (k, v) in pairs {
            if !k.is_dragging() {
                k.set_value(v);
            }
        }
    }

    pub fn schematic_visible(&self) -> bool {
        self.schematic_visible
    }
}

/// Commands that move the fine-adjust hold from `current` to `wanted`.
pub fn hold_transition(current: Option<f32>, wanted: Option<f32>) -> Vec<InstrumentCommand> {
    if current == wanted {
        return Vec::new();
    }
    let mut cmds = Vec::with_capacity(2);
    if current.is_some() {
        cmds.push(InstrumentCommand::EndContinuousAdjust);
    }
    if let Some(dir) = wanted {
        cmds.push(InstrumentCommand::BeginContinuousAdjust(dir));
    }
    cmds
}

/// A draggable knob. Returns the new value when a drag changes it.
fn knob(ui: &mut Ui, knob: &mut Knob, label: &str) -> Option<f32> {
    ui.vertical(|ui| {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(KNOB_SIZE, KNOB_SIZE), egui::Sense::drag());
        knob.center = to_glam(rect.center());

        let mut changed = None;
        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                knob.begin(to_glam(p));
            }
        }
        if response.dragged() {
            if let Some(p) = response.interact_pointer_pos() {
                changed = knob.update(to_glam(p));
            }
        }
        if response.drag_stopped() {
            knob.end();
        }

        let painter = ui.painter();
        let radius = KNOB_SIZE * 0.4;
        painter.circle(rect.center(), radius, theme::KNOB_BODY, Stroke::new(2.0, theme::KNOB_RIM));
        let angle = SWEEP_START_DEG.to_radians() + knob.indicator_angle();
        let tip = rect.center() + egui::vec2(angle.cos(), angle.sin()) * radius * 0.85;
        painter.line_segment([rect.center(), tip], Stroke::new(2.0, theme::KNOB_INDICATOR));

        ui.label(RichText::new(format!("{label} {:.0}", knob.value())).small());
        changed
    })
    .inner
}
