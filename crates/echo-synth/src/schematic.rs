//! Timing for the schematic view: a pulse leaves the probe, echoes come
//! back, repeat. Purely illustrative; nothing here feeds the trace.

use echo_core::Scene;
use std::time::{Duration, Instant};

use crate::config::SynthConfig;
use crate::synthesizer::reflector_positions;

pub const DEFAULT_CYCLE: Duration = Duration::from_millis(3000);

/// Phase at which the outgoing pulse reaches the far reflector.
const OUTGOING_END: f32 = 0.4;
/// Phase at which the echoes are back at the probe.
const RETURN_END: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Outgoing,
    Echo,
}

/// A pulse marker on the probe axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseMarker {
    pub kind: MarkerKind,
    /// Distance from the probe face, mm.
    pub position_mm: f32,
}

/// Elapsed-time accumulator that runs only while its panel is visible.
#[derive(Debug, Clone)]
pub struct SchematicAnimation {
    cycle: Duration,
    elapsed: Duration,
    last: Option<Instant>,
}

impl SchematicAnimation {
    pub fn new(cycle: Duration) -> Self {
        Self { cycle, elapsed: Duration::ZERO, last: None }
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Start when the panel appears; stop and rewind when it goes away.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        match (visible, self.last) {
            (true, None) => self.last = Some(now),
            (false, Some(_)) => {
                self.last = None;
                self.elapsed = Duration::ZERO;
            }
            _ => {}
        }
    }

    pub fn advance(&mut self, now: Instant) {
        if let Some(last) = self.last {
            self.elapsed += now.saturating_duration_since(last);
            self.last = Some(now);
        }
    }

    /// Position within the current cycle, in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        let cycle = self.cycle.as_secs_f64();
        if cycle <= 0.0 {
            return 0.0;
        }
        (self.elapsed.as_secs_f64().rem_euclid(cycle) / cycle) as f32
    }

    /// Markers to draw at the current phase.
    ///
    /// The outgoing pulse travels to the farthest reflector, then one echo
    /// per reflector travels back. The tail of the cycle is quiet.
    pub fn markers(&self, scene: &Scene, config: &SynthConfig) -> Vec<PulseMarker> {
        let reflectors = reflector_positions(scene, config);
        let phase = self.phase();

        if phase < OUTGOING_END {
            let far = reflectors.iter().cloned().fold(0.0f32, f32::max);
            // With nothing to hit, the pulse still leaves the probe.
            let reach = if reflectors.is_empty() { scene.window().1 } else { far };
            vec![PulseMarker { kind: MarkerKind::Outgoing, position_mm: reach * phase / OUTGOING_END }]
        } else if phase < RETURN_END {
            let t = (phase - OUTGOING_END) / (RETURN_END - OUTGOING_END);
            reflectors
                .into_iter()
                .map(|r| PulseMarker { kind: MarkerKind::Echo, position_mm: r * (1.0 - t) })
                .collect()
        } else {
            Vec::new()
        }
    }
}

impl Default for SchematicAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE)
    }
}
