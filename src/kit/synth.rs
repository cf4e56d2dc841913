//! Synthesized pad voices.
//!
//! Every generator returns a mono buffer at the requested sample rate, peak
//! within [-1, 1]. Noise comes from a seeded `ChaCha8Rng` so a given seed
//! always renders the same kit.

use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Built-in voices a pad can use instead of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthVoice {
    Kick,
    Snare,
    HiHat,
    Clap,
    Riser,
    Downlifter,
    Reverse,
    Reese,
    Wobble,
    Zap,
}

impl SynthVoice {
    pub const ALL: [SynthVoice; 10] = [
        SynthVoice::Kick,
        SynthVoice::Snare,
        SynthVoice::HiHat,
        SynthVoice::Clap,
        SynthVoice::Riser,
        SynthVoice::Downlifter,
        SynthVoice::Reverse,
        SynthVoice::Reese,
        SynthVoice::Wobble,
        SynthVoice::Zap,
    ];

    /// Name used in config files (`synth:<name>`).
    pub fn name(self) -> &'static str {
        match self {
            SynthVoice::Kick => "kick",
            SynthVoice::Snare => "snare",
            SynthVoice::HiHat => "hihat",
            SynthVoice::Clap => "clap",
            SynthVoice::Riser => "riser",
            SynthVoice::Downlifter => "downlifter",
            SynthVoice::Reverse => "reverse",
            SynthVoice::Reese => "reese",
            SynthVoice::Wobble => "wobble",
            SynthVoice::Zap => "zap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Render the voice. `seed` only affects noise-based voices.
    pub fn render(self, sample_rate: u32, seed: u64) -> Vec<f32> {
        match self {
            SynthVoice::Kick => kick(sample_rate),
            SynthVoice::Snare => snare(sample_rate, seed),
            SynthVoice::HiHat => hihat(sample_rate, seed),
            SynthVoice::Clap => clap(sample_rate, seed),
            SynthVoice::Riser => noise_sweep(sample_rate, seed, 1.5, true),
            SynthVoice::Downlifter => noise_sweep(sample_rate, seed, 1.2, false),
            SynthVoice::Reverse => reverse_pad(sample_rate),
            SynthVoice::Reese => reese(sample_rate),
            SynthVoice::Wobble => wobble(sample_rate),
            SynthVoice::Zap => zap(sample_rate),
        }
    }
}

fn frames(sample_rate: u32, secs: f64) -> usize {
    (sample_rate as f64 * secs) as usize
}

/// Naive sawtooth in [-1, 1] from a phase in cycles.
fn saw(phase: f64) -> f64 {
    2.0 * (phase - phase.floor()) - 1.0
}

/// Sine with an exponential pitch drop from 150 Hz to 50 Hz (~250ms).
fn kick(sample_rate: u32) -> Vec<f32> {
    let secs = 0.25;
    let n = frames(sample_rate, secs);
    let mut phase = 0.0_f64;
    (0..n)
        .map(|i| {
            let norm = i as f64 / sample_rate as f64 / secs;
            let freq = 50.0 + 100.0 * (-norm * 8.0).exp();
            phase += freq / sample_rate as f64;
            ((phase * TAU).sin() * (-norm * 10.0).exp()) as f32
        })
        .collect()
}

/// 180 Hz body plus a noise burst (~200ms).
fn snare(sample_rate: u32, seed: u64) -> Vec<f32> {
    let secs = 0.2;
    let n = frames(sample_rate, secs);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut phase = 0.0_f64;
    (0..n)
        .map(|i| {
            let norm = i as f64 / sample_rate as f64 / secs;
            phase += 180.0 / sample_rate as f64;
            let body = (phase * TAU).sin() * (-norm * 15.0).exp();
            let noise: f64 = rng.gen_range(-1.0..1.0) * (-norm * 12.0).exp();
            (body * 0.5 + noise * 0.5) as f32
        })
        .collect()
}

/// High-passed noise with a very short decay (~80ms).
fn hihat(sample_rate: u32, seed: u64) -> Vec<f32> {
    let secs = 0.08;
    let n = frames(sample_rate, secs);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (mut prev_in, mut prev_out) = (0.0_f64, 0.0_f64);
    (0..n)
        .map(|i| {
            let norm = i as f64 / sample_rate as f64 / secs;
            let x: f64 = rng.gen_range(-1.0..1.0);
            let y = 0.85 * (prev_out + x - prev_in);
            prev_in = x;
            prev_out = y;
            (y * (-norm * 20.0).exp()).clamp(-1.0, 1.0) as f32
        })
        .collect()
}

/// Three staggered noise bursts and a filtered tail (~150ms).
fn clap(sample_rate: u32, seed: u64) -> Vec<f32> {
    let n = frames(sample_rate, 0.15);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = vec![0.0_f64; n];

    let burst_len = frames(sample_rate, 0.01).max(1);
    for offset in [0.0, 0.015, 0.030] {
        let start = frames(sample_rate, offset);
        for (j, s) in out.iter_mut().skip(start).take(burst_len).enumerate() {
            let env = (-(j as f64 / burst_len as f64) * 15.0).exp();
            *s += rng.gen_range(-1.0..1.0) * env * 0.7;
        }
    }

    let tail_start = frames(sample_rate, 0.04);
    let mut lp = 0.0_f64;
    let coeff = 600.0 / sample_rate as f64;
    for (j, s) in out.iter_mut().skip(tail_start).enumerate() {
        let t = j as f64 / sample_rate as f64;
        let x: f64 = rng.gen_range(-1.0..1.0);
        lp += (x - lp) * coeff;
        *s += lp * (-t * 18.0).exp() * 0.5;
    }

    out.into_iter().map(|s| s.clamp(-1.0, 1.0) as f32).collect()
}

/// Filtered noise whose brightness and level sweep up (`rising`) or down.
fn noise_sweep(sample_rate: u32, seed: u64, secs: f64, rising: bool) -> Vec<f32> {
    let n = frames(sample_rate, secs);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut lp = 0.0_f64;
    (0..n)
        .map(|i| {
            let norm = i as f64 / n as f64;
            let shape = if rising { norm } else { 1.0 - norm };
            let cutoff_hz = 200.0 + 7800.0 * shape * shape;
            let coeff = (TAU * cutoff_hz / sample_rate as f64).min(1.0);
            let x: f64 = rng.gen_range(-1.0..1.0);
            lp += (x - lp) * coeff;
            (lp * shape * 0.8).clamp(-1.0, 1.0) as f32
        })
        .collect()
}

/// A decaying saw chord played backwards, so it swells into a hard stop (~900ms).
fn reverse_pad(sample_rate: u32) -> Vec<f32> {
    let secs = 0.9;
    let n = frames(sample_rate, secs);
    let chord = [220.0, 277.18, 329.63];
    let mut out: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let env = (-t / secs * 4.0).exp();
            let sum: f64 = chord.iter().map(|f| saw(t * f)).sum();
            (sum / chord.len() as f64 * env * 0.7) as f32
        })
        .collect();
    out.reverse();
    out
}

/// Two detuned saws an octave above 55 Hz (~800ms).
fn reese(sample_rate: u32) -> Vec<f32> {
    let secs = 0.8;
    let n = frames(sample_rate, secs);
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let norm = t / secs;
            let env = (1.0 - norm).max(0.0).sqrt();
            let v = (saw(t * 110.0) + saw(t * 110.0 * 1.012)) * 0.5;
            (v * env * 0.7) as f32
        })
        .collect()
}

/// Saw bass through a low-pass whose cutoff is swept by a 6 Hz LFO (~1s).
fn wobble(sample_rate: u32) -> Vec<f32> {
    let secs = 1.0;
    let n = frames(sample_rate, secs);
    let mut lp = 0.0_f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let lfo = 0.5 + 0.5 * (t * 6.0 * TAU).sin();
            let cutoff_hz = 150.0 + 2500.0 * lfo;
            let coeff = (TAU * cutoff_hz / sample_rate as f64).min(1.0);
            lp += (saw(t * 82.41) - lp) * coeff;
            let env = if t > secs - 0.05 { (secs - t) / 0.05 } else { 1.0 };
            (lp * env.max(0.0) * 0.8) as f32
        })
        .collect()
}

/// Fast downward pitch sweep on a square wave (~300ms).
fn zap(sample_rate: u32) -> Vec<f32> {
    let secs = 0.3;
    let n = frames(sample_rate, secs);
    let mut phase = 0.0_f64;
    (0..n)
        .map(|i| {
            let norm = i as f64 / n as f64;
            let freq = 80.0 + 2000.0 * (-norm * 12.0).exp();
            phase += freq / sample_rate as f64;
            let square = if phase.fract() < 0.5 { 1.0 } else { -1.0 };
            (square * (-norm * 6.0).exp() * 0.5) as f32
        })
        .collect()
}
