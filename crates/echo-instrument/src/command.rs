use echo_core::{SceneParameter, Task};

/// Input queued from another thread (or a UI that prefers not to hold the
/// instrument). Drained at the start of every tick, so one frame always
/// sees a consistent scene.
///
/// Time-dependent commands take the tick's timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentCommand {
    /// Switch task. Powers off and resets the measurement.
    SetTask(Task),
    /// Write one scene parameter.
    SetParameter(SceneParameter),
    SetPower(bool),
    TogglePower,
    /// Set the measured distance directly (rounded, clamped).
    SetMeasuredDistance(f32),
    /// Nudge the measured distance once.
    AdjustMeasuredDistance(f32),
    /// Press a fine-adjust button; `+1.0` or `-1.0`.
    BeginContinuousAdjust(f32),
    /// Release the fine-adjust button.
    EndContinuousAdjust,
    /// Set the measured distance from the true geometry.
    UpdateMeasuredDistance,
    SetSchematicVisible(bool),
}
