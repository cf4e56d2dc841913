//! Input router: turns key presses and pad clicks into trigger keys.

use crate::kit::{SampleDescriptor, SampleRegistry, TriggerKey};

/// A user gesture that may hit a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable key, as reported by the terminal (either case).
    KeyDown(char),
    /// A click on the pad at this position in the kit.
    PadClick(usize),
}

impl InputEvent {
    /// Resolve to a trigger key; `None` means the gesture hits no pad.
    pub fn resolve(self, registry: &SampleRegistry) -> Option<TriggerKey> {
        match self {
            InputEvent::KeyDown(raw) => on_keydown(registry, raw),
            InputEvent::PadClick(index) => registry.get(index).map(on_pad_click),
        }
    }
}

/// Normalize and look up a key. Unmapped keys resolve to `None`; that is the
/// common case, not an error.
pub fn on_keydown(registry: &SampleRegistry, raw: char) -> Option<TriggerKey> {
    registry.lookup(raw).map(|pad| pad.trigger_key)
}

/// A click already knows its pad.
pub fn on_pad_click(pad: &SampleDescriptor) -> TriggerKey {
    pad.trigger_key
}
