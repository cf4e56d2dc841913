//! Sample registry: ordered pads with case-insensitive trigger-key lookup.

use std::collections::HashMap;

use super::{SampleDescriptor, SampleSource, SynthVoice, TriggerKey};

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The registry has no pads.
    Empty,
    /// Two pads share a trigger key.
    DuplicateKey(TriggerKey),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Empty => write!(f, "kit has no pads"),
            RegistryError::DuplicateKey(k) => write!(f, "trigger key '{k}' is bound twice"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// An ordered, immutable list of sample descriptors.
#[derive(Debug, Clone)]
pub struct SampleRegistry {
    pads: Vec<SampleDescriptor>,
    index: HashMap<TriggerKey, usize>,
}

impl SampleRegistry {
    /// Build a registry, rejecting empty kits and duplicate keys.
    pub fn new(pads: Vec<SampleDescriptor>) -> Result<Self, RegistryError> {
        if pads.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut index = HashMap::with_capacity(pads.len());
        for (i, pad) in pads.iter().enumerate() {
            if index.insert(pad.trigger_key, i).is_some() {
                return Err(RegistryError::DuplicateKey(pad.trigger_key));
            }
        }
        Ok(Self { pads, index })
    }

    /// Look up a raw key character, ignoring case.
    pub fn lookup(&self, raw: char) -> Option<&SampleDescriptor> {
        TriggerKey::from_char(raw).and_then(|k| self.lookup_key(k))
    }

    /// Look up an already-normalized trigger key.
    pub fn lookup_key(&self, key: TriggerKey) -> Option<&SampleDescriptor> {
        self.index.get(&key).map(|&i| &self.pads[i])
    }

    /// Position of a key in pad order.
    pub fn index_of(&self, key: TriggerKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Pad at a position.
    pub fn get(&self, index: usize) -> Option<&SampleDescriptor> {
        self.pads.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleDescriptor> {
        self.pads.iter()
    }

    pub fn len(&self) -> usize {
        self.pads.len()
    }

    /// Always false for a constructed registry; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }
}

/// The nine-pad default kit, backed by synthesized voices.
pub fn default_kit() -> SampleRegistry {
    let pads = [
        ('Q', "Riser FX", SynthVoice::Riser),
        ('W', "Reversed Synth", SynthVoice::Reverse),
        ('E', "Buzzy & Wobbly Bass", SynthVoice::Reese),
        ('A', "Riddim Bass Loop", SynthVoice::Wobble),
        ('S', "Pre Drop FX", SynthVoice::Downlifter),
        ('D', "Trance Acid FX", SynthVoice::Zap),
        ('Z', "''Runna'' Break", SynthVoice::Kick),
        ('X', "'Woo' Vocal FX", SynthVoice::HiHat),
        ('C', "'Hey!' Chant FX", SynthVoice::Clap),
    ]
    .into_iter()
    .filter_map(|(c, label, voice)| {
        TriggerKey::from_char(c).map(|k| SampleDescriptor::new(k, label, SampleSource::Synth(voice)))
    })
    .collect::<Vec<_>>();

    let index = pads
        .iter()
        .enumerate()
        .map(|(i, p)| (p.trigger_key, i))
        .collect();
    SampleRegistry { pads, index }
}
