//! Masked resynthesis with boundary fades.

use super::stft::inverse_stft;
use crate::error::{Error, Result};
use ndarray::{Array2, Zip};
use realfft::num_complex::Complex32;

/// Parameters shared with the forward transform plus output shaping.
#[derive(Debug, Clone, Copy)]
pub struct ResynthesisParams {
    /// FFT window length used for analysis.
    pub n_fft: usize,
    /// Hop length used for analysis.
    pub hop_length: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Fade length at each end of the output, in seconds.
    pub fade_duration: f64,
    /// Length of the original waveform; the output always matches it.
    pub output_len: usize,
}

/// Apply `mask` to `complex`, invert, fade both ends, and match the original length.
pub fn resynthesize(
    complex: &Array2<Complex32>,
    mask: &Array2<f32>,
    params: &ResynthesisParams,
) -> Result<Vec<f32>> {
    if complex.dim() != mask.dim() {
        return Err(Error::ShapeMismatch {
            expected: complex.dim(),
            found: mask.dim(),
        });
    }

    let masked = Zip::from(complex)
        .and(mask)
        .map_collect(|&c, &m| c * m);
    let mut samples = inverse_stft(&masked, params.n_fft, params.hop_length)?;

    let fade = fade_samples(params.fade_duration, params.sample_rate, samples.len());
    apply_boundary_fades(&mut samples, fade);

    samples.resize(params.output_len, 0.0);
    Ok(samples)
}

/// Fade length in samples, clamped to half of `len` so the two ramps never cross.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fade_samples(fade_duration: f64, sample_rate: u32, len: usize) -> usize {
    let requested = (fade_duration.max(0.0) * f64::from(sample_rate)).floor() as usize;
    requested.min(len / 2)
}

/// Linear 0→1 ramp over the first `fade` samples and 1→0 over the last `fade`.
///
/// Ramps include both endpoints, so the first and last samples become zero.
#[allow(clippy::cast_precision_loss)]
pub fn apply_boundary_fades(samples: &mut [f32], fade: usize) {
    let fade = fade.min(samples.len() / 2);
    if fade == 0 {
        return;
    }

    let step = if fade > 1 { 1.0 / (fade - 1) as f32 } else { 0.0 };
    let len = samples.len();
    for i in 0..fade {
        let ramp = i as f32 * step;
        samples[i] *= ramp;
        samples[len - fade + i] *= 1.0 - ramp;
    }
}
