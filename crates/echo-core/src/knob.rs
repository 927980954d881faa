use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// A rotary control driven by pointer drags.
///
/// Input technology (mouse, touch, pen) is the caller's business; the
/// control only sees pointer positions in the same space as its center.
pub trait RotaryInput {
    /// Pointer went down on the control.
    fn begin(&mut self, pointer: Vec2);

    /// Pointer moved while held. Returns the new value if it changed.
    fn update(&mut self, pointer: Vec2) -> Option<f32>;

    /// Pointer released or capture lost.
    fn end(&mut self);

    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool;
}

/// A knob mapping angular drag to a bounded value.
///
/// One full `sweep_deg` of rotation covers the whole `[min, max]` range.
/// With a `step`, the reported value snaps to multiples of it while the
/// underlying position stays continuous, so slow drags still accumulate.
#[derive(Debug, Clone)]
pub struct Knob {
    pub center: Vec2,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
    pub sweep_deg: f32,
    position: f32,
    last_angle: Option<f32>,
}

impl Knob {
    /// Bounds may be given in either order.
    pub fn new(center: Vec2, min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let mut knob = Self {
            center,
            min,
            max,
            step: None,
            sweep_deg: 270.0,
            position: min,
            last_angle: None,
        };
        knob.position = knob.bound(value);
        knob
    }

    /// Clamp into `[min, max]` without panicking on reversed or NaN bounds.
    fn bound(&self, v: f32) -> f32 {
        v.max(self.min).min(self.max)
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_sweep(mut self, sweep_deg: f32) -> Self {
        self.sweep_deg = sweep_deg;
        self
    }

    /// The current value, snapped to `step` if one is set.
    pub fn value(&self) -> f32 {
        match self.step {
            Some(step) if step > 0.0 => {
                let snapped = self.min + ((self.position - self.min) / step).round() * step;
                self.bound(snapped)
            }
            _ => self.position,
        }
    }

    /// Sync the knob to a value changed elsewhere.
    pub fn set_value(&mut self, value: f32) {
        self.position = self.bound(value);
    }

    /// Indicator angle in radians for drawing, 0 at the start of the sweep.
    pub fn indicator_angle(&self) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        (self.position - self.min) / range * self.sweep_deg.to_radians()
    }

    fn pointer_angle(&self, pointer: Vec2) -> Option<f32> {
        let d = pointer - self.center;
        if d.length_squared() < 1e-6 {
            return None;
        }
        Some(d.y.atan2(d.x))
    }
}

impl RotaryInput for Knob {
    fn begin(&mut self, pointer: Vec2) {
        self.last_angle = self.pointer_angle(pointer);
    }

    fn update(&mut self, pointer: Vec2) -> Option<f32> {
        let last = self.last_angle?;
        let angle = self.pointer_angle(pointer)?;
        self.last_angle = Some(angle);

        // Shortest signed turn, so crossing the atan2 seam doesn't jump.
        let mut delta = angle - last;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }

        let sweep = self.sweep_deg.to_radians();
        if sweep <= 0.0 {
            return None;
        }
        let before = self.value();
        self.position = self.bound(self.position + delta / sweep * (self.max - self.min));
        let after = self.value();
        (after != before).then_some(after)
    }

    fn end(&mut self) {
        self.last_angle = None;
    }

    fn is_dragging(&self) -> bool {
        self.last_angle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_deg(center: Vec2, deg: f32) -> Vec2 {
        center + Vec2::from_angle(deg.to_radians()) * 50.0
    }

    #[test]
    fn test_quarter_turn() {
        let c = Vec2::new(100.0, 100.0);
        let mut knob = Knob::new(c, 0.0, 270.0, 0.0);
        knob.begin(at_deg(c, 0.0));
        let v = knob.update(at_deg(c, 90.0)).unwrap();
        assert!((v - 90.0).abs() < 0.01);
        knob.end();
        assert!(!knob.is_dragging());
        assert!(knob.update(at_deg(c, 180.0)).is_none());
    }

    #[test]
    fn test_seam_crossing() {
        let c = Vec2::ZERO;
        let mut knob = Knob::new(c, 0.0, 270.0, 100.0);
        knob.begin(at_deg(c, 170.0));
        let v = knob.update(at_deg(c, -170.0)).unwrap();
        assert!((v - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_stepped_and_clamped() {
        let c = Vec2::ZERO;
        let mut knob = Knob::new(c, 1.0, 10.0, 5.0).with_step(1.0);
        knob.begin(at_deg(c, 0.0));
        // A tiny nudge doesn't change the stepped value.
        assert!(knob.update(at_deg(c, 2.0)).is_none());
        for deg in [60.0, 120.0, 179.0, -120.0, -60.0, 0.0, 60.0] {
            knob.update(at_deg(c, deg));
        }
        assert_eq!(knob.value(), 10.0);
    }

    #[test]
    fn test_reversed_bounds() {
        let mut knob = Knob::new(Vec2::ZERO, 10.0, 1.0, 20.0);
        assert_eq!((knob.min, knob.max), (1.0, 10.0));
        assert_eq!(knob.value(), 10.0);

        // Fields are public; a later inversion must not panic either.
        knob.min = 50.0;
        knob.set_value(3.0);
        assert!(knob.value().is_finite());
    }
}
