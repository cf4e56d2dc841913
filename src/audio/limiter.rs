//! Output limiter: hard clamp so stacked pads cannot clip the device.

/// Clamps samples to `[-ceiling, ceiling]`.
#[derive(Debug, Clone, Copy)]
pub struct Limiter {
    ceiling: f32,
}

impl Limiter {
    /// `ceiling` must be in `(0.0, 1.0]`.
    pub fn new(ceiling: f32) -> Self {
        debug_assert!(ceiling > 0.0 && ceiling <= 1.0);
        Self { ceiling }
    }

    #[inline]
    pub fn process_block(&self, buffer: &mut [f32]) {
        for s in buffer.iter_mut() {
            *s = s.clamp(-self.ceiling, self.ceiling);
        }
    }

    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self { ceiling: 0.95 }
    }
}
