//! Sample audio data: WAV decoding, mono mixdown, and resampling to the device rate.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Errors that can occur when loading a pad's audio.
#[derive(Debug)]
pub enum SampleError {
    /// The file could not be opened.
    Io(std::io::Error),
    /// WAV decoding failed.
    Wav(hound::Error),
    /// The file decoded to zero frames.
    Empty,
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::Io(e) => write!(f, "cannot open sample: {e}"),
            SampleError::Wav(e) => write!(f, "WAV error: {e}"),
            SampleError::Empty => write!(f, "sample contains no audio"),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::Io(e) => Some(e),
            SampleError::Wav(e) => Some(e),
            SampleError::Empty => None,
        }
    }
}

impl From<hound::Error> for SampleError {
    fn from(e: hound::Error) -> Self {
        SampleError::Wav(e)
    }
}

impl From<std::io::Error> for SampleError {
    fn from(e: std::io::Error) -> Self {
        SampleError::Io(e)
    }
}

/// A mono buffer ready for the audio thread.
#[derive(Debug, Clone)]
pub struct SampleData {
    frames: Vec<f32>,
    sample_rate: u32,
}

impl SampleData {
    pub fn from_mono(frames: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            frames,
            sample_rate,
        }
    }

    /// Open and decode a WAV file at `target_rate`.
    pub fn from_path(path: &Path, target_rate: u32) -> Result<Self, SampleError> {
        let file = File::open(path)?;
        Self::from_wav(BufReader::new(file), target_rate)
    }

    /// Decode WAV data, mixing channels down to mono and resampling to `target_rate`.
    ///
    /// Integer formats of any bit depth and 32-bit float are accepted.
    pub fn from_wav<R: Read + Seek>(reader: R, target_rate: u32) -> Result<Self, SampleError> {
        let wav = hound::WavReader::new(reader)?;
        let spec = wav.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
                wav.into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => wav.into_samples::<f32>().collect::<Result<_, _>>()?,
        };

        let mono: Vec<f32> = interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        if mono.is_empty() {
            return Err(SampleError::Empty);
        }

        let frames = if spec.sample_rate == target_rate {
            mono
        } else {
            resample_linear(&mono, spec.sample_rate, target_rate)
        };

        Ok(Self {
            frames,
            sample_rate: target_rate,
        })
    }

    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playing time at the stored sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.sample_rate as f64
    }
}

/// Linear-interpolation resampling.
fn resample_linear(input: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    match input.len() {
        0 => return Vec::new(),
        1 => return vec![input[0]],
        _ => {}
    }

    let step = from_rate as f64 / to_rate as f64;
    let out_len = (input.len() as f64 / step).ceil() as usize;
    let last = input.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = (pos as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            if idx < last {
                input[idx] + (input[idx + 1] - input[idx]) * frac
            } else {
                input[last]
            }
        })
        .collect()
}
