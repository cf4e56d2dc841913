//! Audio callback: runs on the cpal audio thread.
//!
//! Drains commands, mixes one voice per pad into the interleaved output and
//! applies the limiter. A trigger on a pad that is already sounding restarts
//! it from frame zero.

use std::sync::Arc;

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::AudioCommand;
use super::limiter::Limiter;
use crate::kit::SampleData;

/// Playback cursor for one pad.
#[derive(Debug, Clone, Copy)]
struct Voice {
    pos: usize,
    gain: f32,
}

/// State owned by the audio thread.
pub struct AudioCallback {
    consumer: HeapCons<AudioCommand>,
    bank: Vec<Option<Arc<SampleData>>>,
    voices: Vec<Option<Voice>>,
    limiter: Limiter,
    channels: usize,
}

impl AudioCallback {
    pub fn new(consumer: HeapCons<AudioCommand>, channels: u16) -> Self {
        Self {
            consumer,
            bank: Vec::new(),
            voices: Vec::new(),
            limiter: Limiter::default(),
            channels: channels.max(1) as usize,
        }
    }

    /// Fill `output` (interleaved, `channels` wide).
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.consumer.try_pop() {
            self.apply(cmd);
        }

        output.fill(0.0);

        for (slot, voice) in self.voices.iter_mut().enumerate() {
            let Some(v) = voice else { continue };
            let Some(data) = self.bank.get(slot).and_then(Option::as_ref) else {
                *voice = None;
                continue;
            };
            let frames = data.frames();
            for frame in output.chunks_exact_mut(self.channels) {
                let Some(&s) = frames.get(v.pos) else { break };
                let s = s * v.gain;
                for out in frame.iter_mut() {
                    *out += s;
                }
                v.pos += 1;
            }
            if v.pos >= frames.len() {
                *voice = None;
            }
        }

        self.limiter.process_block(output);
    }

    fn apply(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::LoadBank(bank) => {
                self.voices = vec![None; bank.len()];
                self.bank = bank;
            }
            AudioCommand::Trigger { slot, gain } => {
                let playable = self.bank.get(slot).is_some_and(Option::is_some);
                if let (true, Some(voice)) = (playable, self.voices.get_mut(slot)) {
                    *voice = Some(Voice {
                        pos: 0,
                        gain: gain.clamp(0.0, 1.0),
                    });
                }
            }
            AudioCommand::Stop => {
                self.voices.iter_mut().for_each(|v| *v = None);
            }
        }
    }

    /// Number of pads currently sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ringbuf::{
        traits::{Producer, Split},
        HeapProd, HeapRb,
    };

    fn setup(channels: u16) -> (HeapProd<AudioCommand>, AudioCallback) {
        let (mut prod, cons) = HeapRb::<AudioCommand>::new(16).split();
        prod.try_push(AudioCommand::LoadBank(vec![
            Some(Arc::new(SampleData::from_mono(vec![0.5, 0.4, 0.3, 0.2], 44100))),
            None,
            Some(Arc::new(SampleData::from_mono(vec![0.1, 0.1], 44100))),
        ]))
        .unwrap();
        (prod, AudioCallback::new(cons, channels))
    }

    #[test]
    fn silence_without_triggers() {
        let (_prod, mut cb) = setup(2);
        let mut out = vec![9.0f32; 8];
        cb.process(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn trigger_plays_on_every_channel_with_gain() {
        let (mut prod, mut cb) = setup(2);
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 0.5 })
            .unwrap();
        let mut out = vec![0.0f32; 4];
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.25, 1e-6);
        assert_approx_eq!(out[1], 0.25, 1e-6);
        assert_approx_eq!(out[2], 0.2, 1e-6);
        assert_approx_eq!(out[3], 0.2, 1e-6);
    }

    #[test]
    fn voice_continues_across_callbacks_then_ends() {
        let (mut prod, mut cb) = setup(1);
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        let mut out = vec![0.0f32; 2];
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.5, 1e-6);
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.3, 1e-6);
        assert_approx_eq!(out[1], 0.2, 1e-6);
        assert_eq!(cb.active_voices(), 0);
        cb.process(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn retrigger_restarts_from_zero() {
        let (mut prod, mut cb) = setup(1);
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        let mut out = vec![0.0f32; 2];
        cb.process(&mut out);

        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.5, 1e-6);
        assert_approx_eq!(out[1], 0.4, 1e-6);
        assert_eq!(cb.active_voices(), 1);
    }

    #[test]
    fn pads_mix_together() {
        let (mut prod, mut cb) = setup(1);
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        prod.try_push(AudioCommand::Trigger { slot: 2, gain: 1.0 })
            .unwrap();
        let mut out = vec![0.0f32; 3];
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.6, 1e-6);
        assert_approx_eq!(out[1], 0.5, 1e-6);
        assert_approx_eq!(out[2], 0.3, 1e-6);
    }

    #[test]
    fn empty_and_unknown_slots_are_ignored() {
        let (mut prod, mut cb) = setup(1);
        prod.try_push(AudioCommand::Trigger { slot: 1, gain: 1.0 })
            .unwrap();
        prod.try_push(AudioCommand::Trigger { slot: 42, gain: 1.0 })
            .unwrap();
        let mut out = vec![0.0f32; 2];
        cb.process(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);
        assert_eq!(cb.active_voices(), 0);
    }

    #[test]
    fn stop_silences_everything() {
        let (mut prod, mut cb) = setup(1);
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        prod.try_push(AudioCommand::Stop).unwrap();
        let mut out = vec![1.0f32; 2];
        cb.process(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn limiter_catches_stacked_peaks() {
        let (mut prod, cons) = HeapRb::<AudioCommand>::new(8).split();
        let loud = Some(Arc::new(SampleData::from_mono(vec![0.9], 44100)));
        prod.try_push(AudioCommand::LoadBank(vec![loud.clone(), loud]))
            .unwrap();
        prod.try_push(AudioCommand::Trigger { slot: 0, gain: 1.0 })
            .unwrap();
        prod.try_push(AudioCommand::Trigger { slot: 1, gain: 1.0 })
            .unwrap();
        let mut cb = AudioCallback::new(cons, 1);
        let mut out = vec![0.0f32; 1];
        cb.process(&mut out);
        assert_approx_eq!(out[0], 0.95, 1e-6);
    }
}
