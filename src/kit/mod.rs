//! Kit: sample descriptors, the trigger-key registry, and sample audio data.

pub mod loader;
pub mod registry;
pub mod sample;
pub mod synth;

pub use loader::{load_bank, SampleBank};
pub use registry::{default_kit, RegistryError, SampleRegistry};
pub use sample::{SampleData, SampleError};
pub use synth::SynthVoice;

use std::fmt;
use std::path::PathBuf;

/// Canonical identifier shared by a keyboard key and its pad.
///
/// Always a single uppercase, printable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerKey(char);

impl TriggerKey {
    /// Normalize a raw key character. Returns `None` for control characters,
    /// whitespace, and characters whose uppercase form is not a single char.
    pub fn from_char(raw: char) -> Option<Self> {
        if raw.is_control() || raw.is_whitespace() {
            return None;
        }
        let mut upper = raw.to_uppercase();
        let c = upper.next()?;
        if upper.next().is_some() {
            return None;
        }
        Some(Self(c))
    }

    /// Parse a one-character string such as `"q"` or `"Q"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    /// The uppercase character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a sample's audio comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    /// A WAV file on disk.
    File(PathBuf),
    /// A voice synthesized at startup.
    Synth(SynthVoice),
}

impl fmt::Display for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSource::File(path) => write!(f, "{}", path.display()),
            SampleSource::Synth(voice) => write!(f, "synth:{}", voice.name()),
        }
    }
}

/// Static metadata for one pad.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDescriptor {
    pub trigger_key: TriggerKey,
    pub display_id: String,
    pub source: SampleSource,
}

impl SampleDescriptor {
    pub fn new(trigger_key: TriggerKey, display_id: impl Into<String>, source: SampleSource) -> Self {
        Self {
            trigger_key,
            display_id: display_id.into(),
            source,
        }
    }
}
