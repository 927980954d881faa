//! Power state machine for the display loop.
//!
//! The loop is cooperative: the host calls [`FrameScheduler::poll`] once per
//! display refresh and acts on the returned [`FrameAction`]. Turning the
//! power off simply stops `poll` from asking for frames; nothing in flight
//! is interrupted.

use std::time::{Duration, Instant};

/// Where the display loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Off,
    /// Powered, waiting out the settle delay before the first frame.
    Starting { since: Instant },
    On,
}

/// What the host should do on this refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Nothing to draw.
    Idle,
    /// Paint the surface black once; the instrument just went dark.
    Clear,
    /// Synthesize a fresh trace and render it.
    Draw,
}

pub struct FrameScheduler {
    state: PowerState,
    settle: Duration,
    pending_clear: bool,
    frames_drawn: u64,
}

impl FrameScheduler {
    /// A scheduler that waits `settle` after power-on before drawing.
    /// Pass `Duration::ZERO` to draw on the first tick.
    pub fn new(settle: Duration) -> Self {
        Self {
            state: PowerState::Off,
            settle,
            // A fresh display starts from a known black screen.
            pending_clear: true,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn is_powered(&self) -> bool {
        !matches!(self.state, PowerState::Off)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn set_power(&mut self, on: bool, now: Instant) {
        match (on, self.state) {
            (true, PowerState::Off) => {
                self.state = if self.settle.is_zero() {
                    PowerState::On
                } else {
                    PowerState::Starting { since: now }
                };
                log::info!("power on");
            }
            (false, PowerState::Starting { .. } | PowerState::On) => {
                self.state = PowerState::Off;
                self.pending_clear = true;
                log::info!("power off after {} frames", self.frames_drawn);
            }
            _ => {}
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        let on = !self.is_powered();
        self.set_power(on, now);
    }

    /// Advance the state machine to `now` and report what to do.
    pub fn poll(&mut self, now: Instant) -> FrameAction {
        if let PowerState::Starting { since } = self.state {
            if now.saturating_duration_since(since) >= self.settle {
                self.state = PowerState::On;
            }
        }

        match self.state {
            PowerState::Off => {
                if std::mem::take(&mut self.pending_clear) {
                    FrameAction::Clear
                } else {
                    FrameAction::Idle
                }
            }
            PowerState::Starting { .. } => FrameAction::Idle,
            PowerState::On => {
                self.frames_drawn += 1;
                FrameAction::Draw
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
