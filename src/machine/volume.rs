//! Volume: the single output gain applied to every trigger.

use std::fmt;

/// Slider resolution.
pub const VOLUME_STEP: f32 = 0.01;
/// Coarse slider step (Shift+arrow).
pub const VOLUME_STEP_COARSE: f32 = 0.10;

/// Gain in `[0.0, 1.0]`.
///
/// Values only enter through [`Volume::from_slider`] or [`Volume::stepped`],
/// which keep them on the slider's range and grid; the rest of the machine
/// takes the value as given.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    pub const MUTE: Volume = Volume(0.0);
    pub const FULL: Volume = Volume(1.0);

    /// Snap a slider position to the 0.01 grid inside `[0, 1]`.
    /// Non-finite input is treated as full volume.
    pub fn from_slider(value: f32) -> Self {
        if !value.is_finite() {
            return Self::FULL;
        }
        let snapped = (value.clamp(0.0, 1.0) / VOLUME_STEP).round() * VOLUME_STEP;
        Self(snapped.clamp(0.0, 1.0))
    }

    /// Move the slider by `delta`, staying in range.
    pub fn stepped(self, delta: f32) -> Self {
        Self::from_slider(self.0 + delta)
    }

    pub fn gain(self) -> f32 {
        self.0
    }

    /// Whole-percent value for display.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
