//! Playback state owned by the running drum machine.

use super::recorder::Recording;
use super::volume::Volume;

/// Label shown before any pad has been hit.
pub const NOW_PLAYING_PLACEHOLDER: &str = "Sample ID";

/// Mutable state for one drum machine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub volume: Volume,
    pub now_playing: String,
    pub recording: Recording,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            volume: Volume::FULL,
            now_playing: NOW_PLAYING_PLACEHOLDER.to_string(),
            recording: Recording::new(),
        }
    }
}
