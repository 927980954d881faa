use std::path::Path;
use std::time::Instant;

use crossbeam::channel::{Receiver, Sender};
use echo_core::{EchoResult, MeasuredDistance, Scene, SceneParameter, Task};
use echo_synth::{
    ContinuousAdjust, EchoSynthesizer, FrameAction, FrameScheduler, PowerState, PulseMarker,
    SchematicAnimation,
};
use echo_visualizer::{RasterSurface, Surface, TraceRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::command::InstrumentCommand;
use crate::config::InstrumentConfig;

/// The simulated pulse-echo flaw detector.
///
/// Owns the scene, the measurement cursor and every timer. The host calls
/// [`Instrument::tick`] once per display refresh; everything else is input.
pub struct Instrument {
    scene: Scene,
    measured: MeasuredDistance,
    synth: EchoSynthesizer,
    renderer: TraceRenderer,
    scheduler: FrameScheduler,
    adjust: ContinuousAdjust,
    schematic: SchematicAnimation,
    trace: Vec<f32>,

    command_tx: Sender<InstrumentCommand>,
    command_rx: Receiver<InstrumentCommand>,
}

impl Instrument {
    /// A new session with a randomized hidden scene.
    pub fn new(config: InstrumentConfig) -> Self {
        let scene = Scene::randomized(&mut rand::thread_rng());
        let synth = EchoSynthesizer::new(config.synth.clone());
        Self::from_parts(config, scene, synth)
    }

    /// A reproducible session: same seed, same hidden scene, same noise.
    pub fn with_seed(config: InstrumentConfig, seed: u64) -> Self {
        let scene = Scene::randomized(&mut StdRng::seed_from_u64(seed));
        let synth = EchoSynthesizer::with_seed(config.synth.clone(), seed);
        Self::from_parts(config, scene, synth)
    }

    /// A session over a known scene.
    pub fn with_scene(config: InstrumentConfig, scene: Scene, seed: u64) -> Self {
        let synth = EchoSynthesizer::with_seed(config.synth.clone(), seed);
        Self::from_parts(config, scene, synth)
    }

    fn from_parts(config: InstrumentConfig, scene: Scene, synth: EchoSynthesizer) -> Self {
        let (command_tx, command_rx) = crossbeam::channel::bounded(config.command_capacity.max(1));
        let trace = Vec::with_capacity(config.synth.sample_count);
        Self {
            scene,
            measured: MeasuredDistance::default(),
            synth,
            renderer: TraceRenderer::new(config.render.clone()),
            scheduler: FrameScheduler::new(config.power_on_delay()),
            adjust: ContinuousAdjust::new(config.adjust_settle(), config.adjust_period()),
            schematic: SchematicAnimation::new(config.schematic_cycle()),
            trace,
            command_tx,
            command_rx,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn measured_distance(&self) -> f32 {
        self.measured.get()
    }

    /// Samples of the most recent frame. Empty while dark.
    pub fn trace(&self) -> &[f32] {
        &self.trace
    }

    pub fn renderer(&self) -> &TraceRenderer {
        &self.renderer
    }

    pub fn synthesizer(&self) -> &EchoSynthesizer {
        &self.synth
    }

    /// Handle for queueing input from elsewhere.
    pub fn command_sender(&self) -> Sender<InstrumentCommand> {
        self.command_tx.clone()
    }

    // ── Scene ───────────────────────────────────────────────────

    /// Switch task: power off, measurement to 0, start position to the
    /// task's baseline, any held adjust button released.
    pub fn set_task(&mut self, task: Task, now: Instant) {
        self.scheduler.set_power(false, now);
        self.adjust.cancel();
        self.measured.reset();
        self.scene.task = task;
        self.scene.apply(SceneParameter::StartPosition(task.baseline_start()));
        log::info!("switched to {task}");
    }

    pub fn set_parameter(&mut self, param: SceneParameter) {
        log::debug!("set {param:?}");
        self.scene.apply(param);
    }

    /// String-keyed variant of [`Instrument::set_parameter`].
    pub fn set_parameter_str(&mut self, name: &str, value: &str) -> EchoResult<()> {
        match SceneParameter::parse(name, value) {
            Ok(param) => {
                self.set_parameter(param);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected parameter write: {e}");
                Err(e)
            }
        }
    }

    // ── Power ───────────────────────────────────────────────────

    pub fn set_power(&mut self, on: bool, now: Instant) {
        self.scheduler.set_power(on, now);
    }

    pub fn toggle_power(&mut self, now: Instant) {
        self.scheduler.toggle(now);
    }

    pub fn is_powered(&self) -> bool {
        self.scheduler.is_powered()
    }

    pub fn power_state(&self) -> PowerState {
        self.scheduler.state()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.scheduler.frames_drawn()
    }

    // ── Measurement ─────────────────────────────────────────────

    pub fn set_measured_distance(&mut self, value: f32) {
        self.measured.set(value);
    }

    pub fn adjust_measured_distance(&mut self, delta: f32) {
        self.measured.adjust(delta);
    }

    /// Press a fine-adjust button. One step lands immediately; holding
    /// past the settle delay starts auto-repeat, driven by `tick`.
    pub fn begin_continuous_adjust(&mut self, direction: f32, now: Instant) {
        let step = self.adjust.begin(direction, now);
        self.measured.adjust(step);
    }

    /// Release the fine-adjust button. Steps already due are applied first.
    pub fn end_continuous_adjust(&mut self, now: Instant) {
        let due = self.adjust.end(now);
        if due != 0.0 {
            self.measured.adjust(due);
        }
    }

    pub fn is_adjusting(&self) -> bool {
        self.adjust.is_active()
    }

    /// Snap the measurement to what the geometry says it should read.
    pub fn update_measured_distance(&mut self) {
        match self.scene.expected_measurement() {
            Some(v) => self.measured.set(v),
            None => self.measured.reset(),
        }
        log::debug!("measured distance auto-set to {}", self.measured.get());
    }

    // ── Schematic ───────────────────────────────────────────────

    pub fn set_schematic_visible(&mut self, visible: bool, now: Instant) {
        self.schematic.set_visible(visible, now);
    }

    pub fn schematic_phase(&self) -> f32 {
        self.schematic.phase()
    }

    pub fn schematic_markers(&self) -> Vec<PulseMarker> {
        self.schematic.markers(&self.scene, self.synth.config())
    }

    // ── Frame loop ──────────────────────────────────────────────

    /// Advance every timer to `now` and, if powered, draw a fresh frame.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> FrameAction {
        self.drain_commands(now);

        let due = self.adjust.poll(now);
        if due != 0.0 {
            self.measured.adjust(due);
        }
        self.schematic.advance(now);

        let action = self.scheduler.poll(now);
        match action {
            FrameAction::Draw => {
                let n = self.synth.config().sample_count;
                self.synth.synthesize_into(&self.scene, n, &mut self.trace);
                self.renderer.render(surface, &self.trace, &self.scene, self.measured.get());
            }
            FrameAction::Clear => {
                self.trace.clear();
                surface.clear(self.renderer.settings().background);
            }
            FrameAction::Idle => {}
        }
        action
    }

    fn drain_commands(&mut self, now: Instant) {
        while let Ok(cmd) = self.command_rx.try_recv() {
            match cmd {
                InstrumentCommand::SetTask(task) => self.set_task(task, now),
                InstrumentCommand::SetParameter(param) => self.set_parameter(param),
                InstrumentCommand::SetPower(on) => self.set_power(on, now),
                InstrumentCommand::TogglePower => self.toggle_power(now),
                InstrumentCommand::SetMeasuredDistance(v) => self.set_measured_distance(v),
                InstrumentCommand::AdjustMeasuredDistance(d) => self.adjust_measured_distance(d),
                InstrumentCommand::BeginContinuousAdjust(dir) => self.begin_continuous_adjust(dir, now),
                InstrumentCommand::EndContinuousAdjust => self.end_continuous_adjust(now),
                InstrumentCommand::UpdateMeasuredDistance => self.update_measured_distance(),
                InstrumentCommand::SetSchematicVisible(v) => self.set_schematic_visible(v, now),
            }
        }
    }

    // ── Export ──────────────────────────────────────────────────

    /// Render the last trace off-screen. Does not synthesize.
    pub fn capture_frame(&self, width: u32, height: u32) -> RasterSurface {
        let mut raster = RasterSurface::new(width, height);
        self.renderer.render(&mut raster, &self.trace, &self.scene, self.measured.get());
        raster
    }

    pub fn save_frame_png(&self, path: impl AsRef<Path>, width: u32, height: u32) -> EchoResult<()> {
        self.capture_frame(width, height).save_png(path)
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new(InstrumentConfig::default())
    }
}
