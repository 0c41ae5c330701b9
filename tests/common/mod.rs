//! Synthetic recordings shared by the integration tests.

#![allow(
    dead_code,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::unwrap_used
)]

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::path::Path;

pub const SAMPLE_RATE: u32 = 16_000;

/// `seconds` of silence.
pub fn silence(seconds: f32) -> Vec<f32> {
    vec![0.0; (seconds * SAMPLE_RATE as f32) as usize]
}

/// Silence with a sine tone of `frequency` Hz between `start` and `end` seconds.
pub fn tone_burst(total: f32, frequency: f32, start: f32, end: f32, amplitude: f32) -> Vec<f32> {
    let mut samples = silence(total);
    add_tone(&mut samples, frequency, start, end, amplitude);
    samples
}

/// Add a sine tone over `[start, end)` seconds.
pub fn add_tone(samples: &mut [f32], frequency: f32, start: f32, end: f32, amplitude: f32) {
    let sr = SAMPLE_RATE as f32;
    let first = (start * sr) as usize;
    let last = ((end * sr) as usize).min(samples.len());
    for (n, sample) in samples.iter_mut().enumerate().take(last).skip(first) {
        *sample += amplitude * (2.0 * PI * frequency * n as f32 / sr).sin();
    }
}

/// Add uniform noise in `[-level, level]` from a fixed seed.
pub fn add_noise(samples: &mut [f32], level: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for sample in samples {
        *sample += rng.gen_range(-level..level);
    }
}

/// Root-mean-square of `samples[from..to]` given in seconds.
pub fn rms(samples: &[f32], from: f32, to: f32) -> f32 {
    let sr = SAMPLE_RATE as f32;
    let window = &samples[(from * sr) as usize..((to * sr) as usize).min(samples.len())];
    if window.is_empty() {
        return 0.0;
    }
    (window.iter().map(|s| s * s).sum::<f32>() / window.len() as f32).sqrt()
}

/// Largest absolute sample in `samples[from..to]` given in seconds.
pub fn peak(samples: &[f32], from: f32, to: f32) -> f32 {
    let sr = SAMPLE_RATE as f32;
    samples[(from * sr) as usize..((to * sr) as usize).min(samples.len())]
        .iter()
        .fold(0.0, |acc, s| acc.max(s.abs()))
}

/// Write `samples` as a 16-bit mono WAV.
pub fn write_wav(path: &Path, samples: &[f32]) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer
            .write_sample((sample.clamp(-1.0, 1.0) * 32767.0).round() as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}
