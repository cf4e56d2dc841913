//! Playback engine: restarts a pad's audio at the current volume and
//! updates the now-playing label.
//!
//! Playback is best effort. The label changes first and unconditionally; any
//! failure to reach the audio output is logged and returned as
//! [`PlayOutcome::Unavailable`], never raised.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::state::PlaybackState;
use super::volume::Volume;
use crate::audio::{AudioEngine, AudioError};
use crate::kit::{SampleDescriptor, SampleRegistry, TriggerKey};

/// Opaque reference to a pad's audio resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleHandle(usize);

impl SampleHandle {
    pub fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub fn slot(self) -> usize {
        self.0
    }
}

/// Anything that can restart a sample at a gain without blocking.
pub trait SampleOutput {
    /// Reset `handle` to its first frame and start it at `gain`.
    fn trigger(&mut self, handle: SampleHandle, gain: f32) -> Result<(), AudioError>;

    /// Device label for the status bar, `None` when there is no real output.
    fn device_name(&self) -> Option<&str>;
}

impl SampleOutput for AudioEngine {
    fn trigger(&mut self, handle: SampleHandle, gain: f32) -> Result<(), AudioError> {
        AudioEngine::trigger(self, handle.slot(), gain)
    }

    fn device_name(&self) -> Option<&str> {
        Some(AudioEngine::device_name(self))
    }
}

/// Output used when no audio device could be opened. Every trigger fails.
#[derive(Debug, Default)]
pub struct NullOutput;

impl SampleOutput for NullOutput {
    fn trigger(&mut self, _handle: SampleHandle, _gain: f32) -> Result<(), AudioError> {
        Err(AudioError::NoOutputDevice)
    }

    fn device_name(&self) -> Option<&str> {
        None
    }
}

/// Result of a single play request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Started,
    /// The output refused or could not reach the sample.
    Unavailable(AudioError),
    /// The pad belongs to a different registry than the engine was built from.
    Unbound,
}

impl PlayOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, PlayOutcome::Started)
    }
}

/// Binds trigger keys to audio handles and drives the output.
pub struct PlaybackEngine {
    resources: HashMap<TriggerKey, SampleHandle>,
    output: Box<dyn SampleOutput>,
}

impl PlaybackEngine {
    /// Build the key → handle map from pad order. Handle `i` is pad `i`.
    pub fn new(registry: &SampleRegistry, output: Box<dyn SampleOutput>) -> Self {
        let resources = registry
            .iter()
            .enumerate()
            .map(|(i, pad)| (pad.trigger_key, SampleHandle::new(i)))
            .collect();
        Self { resources, output }
    }

    pub fn handle(&self, key: TriggerKey) -> Option<SampleHandle> {
        self.resources.get(&key).copied()
    }

    pub fn device_name(&self) -> Option<&str> {
        self.output.device_name()
    }

    /// Restart `pad` at `volume` and show its label.
    pub fn play(
        &mut self,
        pad: &SampleDescriptor,
        volume: Volume,
        state: &mut PlaybackState,
    ) -> PlayOutcome {
        state.now_playing.clone_from(&pad.display_id);

        let Some(handle) = self.handle(pad.trigger_key) else {
            warn!(key = %pad.trigger_key, "pad is not bound to an audio resource");
            return PlayOutcome::Unbound;
        };

        match self.output.trigger(handle, volume.gain()) {
            Ok(()) => {
                debug!(key = %pad.trigger_key, gain = volume.gain(), "pad triggered");
                PlayOutcome::Started
            }
            Err(error) => {
                warn!(key = %pad.trigger_key, %error, "pad playback unavailable");
                PlayOutcome::Unavailable(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::default_kit;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(SampleHandle, f32)>>>;

    struct Capture(Log);

    impl SampleOutput for Capture {
        fn trigger(&mut self, handle: SampleHandle, gain: f32) -> Result<(), AudioError> {
            self.0.borrow_mut().push((handle, gain));
            Ok(())
        }

        fn device_name(&self) -> Option<&str> {
            Some("capture")
        }
    }

    #[test]
    fn play_triggers_the_pad_handle_at_volume() {
        let kit = default_kit();
        let log: Log = Rc::default();
        let mut engine = PlaybackEngine::new(&kit, Box::new(Capture(log.clone())));
        let mut state = PlaybackState::default();

        let pad = kit.lookup('e').unwrap();
        let outcome = engine.play(pad, Volume::from_slider(0.3), &mut state);

        assert_eq!(outcome, PlayOutcome::Started);
        assert_eq!(state.now_playing, "Buzzy & Wobbly Bass");
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, SampleHandle::new(2));
        assert!((log[0].1 - 0.3).abs() < 1e-6);
    }

    #[test]
    fn label_updates_even_without_output() {
        let kit = default_kit();
        let mut engine = PlaybackEngine::new(&kit, Box::new(NullOutput));
        let mut state = PlaybackState::default();

        let outcome = engine.play(kit.lookup('Q').unwrap(), Volume::FULL, &mut state);

        assert_eq!(outcome, PlayOutcome::Unavailable(AudioError::NoOutputDevice));
        assert_eq!(state.now_playing, "Riser FX");
        assert!(engine.device_name().is_none());
    }

    #[test]
    fn foreign_pad_is_unbound_but_still_labelled() {
        let kit = default_kit();
        let mut engine = PlaybackEngine::new(&kit, Box::new(NullOutput));
        let mut state = PlaybackState::default();
        let stranger = SampleDescriptor::new(
            TriggerKey::from_char('P').unwrap(),
            "Stranger",
            crate::kit::SampleSource::Synth(crate::kit::SynthVoice::Snare),
        );

        assert_eq!(engine.play(&stranger, Volume::FULL, &mut state), PlayOutcome::Unbound);
        assert_eq!(state.now_playing, "Stranger");
    }

    #[test]
    fn handles_follow_pad_order() {
        let kit = default_kit();
        let engine = PlaybackEngine::new(&kit, Box::new(NullOutput));
        for (i, pad) in kit.iter().enumerate() {
            assert_eq!(engine.handle(pad.trigger_key), Some(SampleHandle::new(i)));
        }
    }
}
