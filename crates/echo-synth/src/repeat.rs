//! Press-and-hold auto-repeat for the fine measurement buttons.
//!
//! A press applies one step at once. If the button is still held after the
//! settle delay, a repeat timer starts and applies one more step every
//! period. Release cancels whichever timer is live.

use std::time::{Duration, Instant};

pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Timer {
    /// Waiting for the settle delay to expire.
    Settling { until: Instant },
    /// Repeating; `next` is when the next step is due.
    Repeating { next: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hold {
    direction: f32,
    timer: Timer,
}

#[derive(Debug, Clone)]
pub struct ContinuousAdjust {
    settle: Duration,
    period: Duration,
    hold: Option<Hold>,
}

impl ContinuousAdjust {
    pub fn new(settle: Duration, period: Duration) -> Self {
        Self { settle, period, hold: None }
    }

    pub fn is_active(&self) -> bool {
        self.hold.is_some()
    }

    /// Start a hold. Returns the immediate step to apply.
    ///
    /// A new press replaces any hold still in progress.
    pub fn begin(&mut self, direction: f32, now: Instant) -> f32 {
        self.hold = Some(Hold {
            direction,
            timer: Timer::Settling { until: now + self.settle },
        });
        direction
    }

    /// Total adjustment that came due between the last poll and `now`.
    pub fn poll(&mut self, now: Instant) -> f32 {
        let Some(hold) = self.hold.as_mut() else {
            return 0.0;
        };
        // A zero period would never catch up; treat it as "no repeat".
        if self.period.is_zero() {
            return 0.0;
        }

        let mut delta = 0.0;
        loop {
            match hold.timer {
                Timer::Settling { until } if now >= until => {
                    hold.timer = Timer::Repeating { next: until + self.period };
                }
                Timer::Repeating { next } if now >= next => {
                    delta += hold.direction;
                    hold.timer = Timer::Repeating { next: next + self.period };
                }
                _ => break,
            }
        }
        delta
    }

    /// Release at `now`. Returns any steps that fell due before release,
    /// then cancels both timers.
    pub fn end(&mut self, now: Instant) -> f32 {
        let delta = self.poll(now);
        self.cancel();
        delta
    }

    /// Drop the hold without flushing due steps.
    pub fn cancel(&mut self) {
        self.hold = None;
    }
}

impl Default for ContinuousAdjust {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE, DEFAULT_PERIOD)
    }
}
