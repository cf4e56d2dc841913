//! Audio engine: cpal output stream fed by a lock-free command queue.
//!
//! The UI thread owns the [`AudioEngine`] and pushes [`AudioCommand`]s; the
//! cpal callback drains them and mixes pad voices. Nothing is shared between
//! the two threads except the ring buffer.

pub mod callback;
pub mod command;
pub mod limiter;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};
use tracing::{error, info};

pub use command::AudioCommand;
pub use limiter::Limiter;

use crate::kit::SampleBank;
use callback::AudioCallback;

/// Ring buffer capacity (number of commands).
const RING_BUFFER_CAPACITY: usize = 1024;

/// Audio engine errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
    /// Command queue is full; the audio thread is not draining.
    BufferFull,
    /// The pad has no loaded audio.
    SampleUnavailable(usize),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
            AudioError::BufferFull => write!(f, "audio command queue is full"),
            AudioError::SampleUnavailable(slot) => write!(f, "pad {slot} has no audio loaded"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Owns the cpal stream and the producer half of the command queue.
pub struct AudioEngine {
    stream: cpal::Stream,
    producer: ringbuf::HeapProd<AudioCommand>,
    loaded: Vec<bool>,
    device_name: String,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Open the default output device and start a silent stream.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let (producer, consumer) = HeapRb::<AudioCommand>::new(RING_BUFFER_CAPACITY).split();
        let mut audio_callback = AudioCallback::new(consumer, channels);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    audio_callback.process(data);
                },
                |err: cpal::StreamError| error!(%err, "audio stream error"),
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        info!(device = %device_name, sample_rate, channels, "audio output started");

        Ok(Self {
            stream,
            producer,
            loaded: Vec::new(),
            device_name,
            sample_rate,
            channels,
        })
    }

    /// Hand the decoded kit to the audio thread.
    pub fn load_bank(&mut self, bank: SampleBank) -> Result<(), AudioError> {
        let loaded: Vec<bool> = (0..bank.len()).map(|i| bank.is_loaded(i)).collect();
        self.producer
            .try_push(AudioCommand::LoadBank(bank.into_slots()))
            .map_err(|_| AudioError::BufferFull)?;
        self.loaded = loaded;
        Ok(())
    }

    /// Restart pad `slot` from the top at `gain`.
    pub fn trigger(&mut self, slot: usize, gain: f32) -> Result<(), AudioError> {
        if !self.loaded.get(slot).copied().unwrap_or(false) {
            return Err(AudioError::SampleUnavailable(slot));
        }
        self.producer
            .try_push(AudioCommand::Trigger { slot, gain })
            .map_err(|_| AudioError::BufferFull)
    }

    /// Silence all pads.
    pub fn stop(&mut self) -> Result<(), AudioError> {
        self.producer
            .try_push(AudioCommand::Stop)
            .map_err(|_| AudioError::BufferFull)
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Pause the output stream.
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::{default_kit, load_bank};

    #[test]
    #[ignore] // Requires audio device: run manually with `cargo test -- --ignored`
    fn engine_opens_default_device() {
        let engine = AudioEngine::new().expect("no audio device");
        assert!(engine.sample_rate() > 0);
        assert!(engine.channels() > 0);
        assert!(!engine.device_name().is_empty());
    }

    #[test]
    #[ignore] // Requires audio device
    fn trigger_after_loading_kit() {
        let mut engine = AudioEngine::new().expect("no audio device");
        assert_eq!(engine.trigger(0, 1.0), Err(AudioError::SampleUnavailable(0)));

        let (bank, _) = load_bank(&default_kit(), engine.sample_rate(), 1);
        engine.load_bank(bank).unwrap();
        assert!(engine.trigger(0, 0.8).is_ok());
        assert!(engine.stop().is_ok());
        assert!(engine.pause().is_ok());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            AudioError::NoOutputDevice.to_string(),
            "no audio output device found"
        );
        assert_eq!(
            AudioError::SampleUnavailable(4).to_string(),
            "pad 4 has no audio loaded"
        );
        assert_eq!(
            AudioError::StreamBuild("boom".to_string()).to_string(),
            "stream build error: boom"
        );
    }
}
