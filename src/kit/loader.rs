//! Kit loading: renders or decodes every pad's audio once at startup.
//!
//! A pad whose source cannot be loaded keeps an empty slot; triggering it
//! later is a silent no-op on the audio side.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{SampleData, SampleError, SampleRegistry, SampleSource, TriggerKey};

/// Decoded audio for each pad, indexed by pad position.
#[derive(Debug, Clone, Default)]
pub struct SampleBank {
    slots: Vec<Option<Arc<SampleData>>>,
}

impl SampleBank {
    pub fn from_slots(slots: Vec<Option<Arc<SampleData>>>) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: usize) -> Option<&Arc<SampleData>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn is_loaded(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that hold audio.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn into_slots(self) -> Vec<Option<Arc<SampleData>>> {
        self.slots
    }
}

/// A pad whose audio could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub key: TriggerKey,
    pub error: SampleError,
}

/// Load every pad in `registry` at `sample_rate`.
///
/// Never fails as a whole: broken pads are reported in the returned list and
/// left empty in the bank.
pub fn load_bank(
    registry: &SampleRegistry,
    sample_rate: u32,
    seed: u64,
) -> (SampleBank, Vec<LoadFailure>) {
    let mut failures = Vec::new();
    let slots = registry
        .iter()
        .enumerate()
        .map(|(i, pad)| {
            let loaded = match &pad.source {
                SampleSource::Synth(voice) => Ok(SampleData::from_mono(
                    voice.render(sample_rate, seed.wrapping_add(i as u64)),
                    sample_rate,
                )),
                SampleSource::File(path) => SampleData::from_path(path, sample_rate),
            };
            match loaded {
                Ok(data) => {
                    debug!(
                        key = %pad.trigger_key,
                        source = %pad.source,
                        secs = data.duration_secs(),
                        "pad loaded"
                    );
                    Some(Arc::new(data))
                }
                Err(error) => {
                    warn!(key = %pad.trigger_key, source = %pad.source, %error, "pad unavailable");
                    failures.push(LoadFailure {
                        key: pad.trigger_key,
                        error,
                    });
                    None
                }
            }
        })
        .collect();

    (SampleBank { slots }, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::{default_kit, SampleDescriptor, SynthVoice};
    use std::path::PathBuf;

    #[test]
    fn default_kit_loads_every_pad() {
        let kit = default_kit();
        let (bank, failures) = load_bank(&kit, 22050, 7);
        assert!(failures.is_empty());
        assert_eq!(bank.len(), 9);
        assert_eq!(bank.loaded_count(), 9);
        assert_eq!(bank.get(0).unwrap().sample_rate(), 22050);
    }

    #[test]
    fn missing_file_leaves_empty_slot() {
        let kit = SampleRegistry::new(vec![
            SampleDescriptor::new(
                TriggerKey::from_char('Q').unwrap(),
                "Kick",
                SampleSource::Synth(SynthVoice::Kick),
            ),
            SampleDescriptor::new(
                TriggerKey::from_char('W').unwrap(),
                "Gone",
                SampleSource::File(PathBuf::from("/nonexistent/gone.wav")),
            ),
        ])
        .unwrap();

        let (bank, failures) = load_bank(&kit, 44100, 1);
        assert!(bank.is_loaded(0));
        assert!(!bank.is_loaded(1));
        assert_eq!(bank.loaded_count(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key.as_char(), 'W');
    }

    #[test]
    fn out_of_range_slot_is_not_loaded() {
        let bank = SampleBank::default();
        assert!(bank.is_empty());
        assert!(!bank.is_loaded(3));
    }
}
