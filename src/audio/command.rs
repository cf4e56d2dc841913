//! Messages from the UI thread to the audio callback.

use std::sync::Arc;

use crate::kit::SampleData;

/// Commands carried over the ring buffer to the audio thread.
#[derive(Debug)]
pub enum AudioCommand {
    /// Replace the pad buffers. Index = pad slot; `None` marks an unplayable pad.
    LoadBank(Vec<Option<Arc<SampleData>>>),

    /// Restart a pad from its first frame at the given gain (0.0 to 1.0).
    Trigger { slot: usize, gain: f32 },

    /// Silence every voice.
    Stop,
}
