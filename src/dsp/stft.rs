//! Short-time Fourier analysis and overlap-add resynthesis.
//!
//! Frames are centered: the waveform is padded with `n_fft / 2` zeros on both
//! sides, so frame `j` is centered on sample `j * hop_length`.

use crate::constants::spectral::WINDOW_SUM_FLOOR;
use crate::error::{Error, Result};
use ndarray::{Array2, Zip};
use realfft::RealFftPlanner;
use realfft::num_complex::Complex32;

/// Time-frequency decomposition of a waveform.
///
/// Rows are frequency bins, columns are frames. Every matrix is its own
/// allocation and shares the shape of `complex`.
#[derive(Debug, Clone)]
pub struct SpectralAnalysis {
    /// Complex STFT coefficients.
    pub complex: Array2<Complex32>,
    /// `|complex|`.
    pub magnitude: Array2<f32>,
    /// Unit-magnitude phase, `complex / |complex|` (`1 + 0i` where the magnitude is zero).
    pub phase: Array2<Complex32>,
    /// Center frequency of each bin in Hz.
    pub frequencies: Vec<f64>,
    /// Center time of each frame in seconds.
    pub times: Vec<f64>,
}

impl SpectralAnalysis {
    /// Analyze `samples` with a Hann window of `n_fft` samples and hop `hop_length`.
    ///
    /// Fails with [`Error::InputTooShort`] if the waveform holds fewer than `n_fft` samples.
    pub fn compute(
        samples: &[f32],
        sample_rate: u32,
        n_fft: usize,
        hop_length: usize,
    ) -> Result<Self> {
        let complex = stft(samples, n_fft, hop_length)?;
        let magnitude = complex.mapv(Complex32::norm);
        let phase = Zip::from(&complex)
            .and(&magnitude)
            .map_collect(|&c, &m| if m > 0.0 { c / m } else { Complex32::new(1.0, 0.0) });
        let frequencies = fft_frequencies(sample_rate, n_fft);
        let times = frame_times(complex.ncols(), sample_rate, hop_length);

        Ok(Self {
            complex,
            magnitude,
            phase,
            frequencies,
            times,
        })
    }

    /// `(bins, frames)`.
    pub fn shape(&self) -> (usize, usize) {
        self.complex.dim()
    }
}

/// Periodic Hann window of length `size`.
#[allow(clippy::cast_precision_loss)]
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos())
        .collect()
}

/// Bin center frequencies: `i * sample_rate / n_fft` for `i` in `0..=n_fft / 2`.
#[allow(clippy::cast_precision_loss)]
pub fn fft_frequencies(sample_rate: u32, n_fft: usize) -> Vec<f64> {
    let bin_width = f64::from(sample_rate) / n_fft as f64;
    (0..=n_fft / 2).map(|i| i as f64 * bin_width).collect()
}

/// Frame center times: `j * hop_length / sample_rate`.
#[allow(clippy::cast_precision_loss)]
pub fn frame_times(n_frames: usize, sample_rate: u32, hop_length: usize) -> Vec<f64> {
    let hop_secs = hop_length as f64 / f64::from(sample_rate);
    (0..n_frames).map(|j| j as f64 * hop_secs).collect()
}

/// Forward STFT. Output shape is `(n_fft / 2 + 1, 1 + len / hop_length)`.
pub fn stft(samples: &[f32], n_fft: usize, hop_length: usize) -> Result<Array2<Complex32>> {
    if samples.is_empty() || samples.len() < n_fft {
        return Err(Error::InputTooShort {
            samples: samples.len(),
            required: n_fft.max(1),
        });
    }

    let pad = n_fft / 2;
    let mut padded = vec![0.0f32; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let n_frames = 1 + (padded.len() - n_fft) / hop_length;
    let n_bins = n_fft / 2 + 1;
    let window = hann_window(n_fft);

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut input = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();

    let mut matrix = Array2::<Complex32>::zeros((n_bins, n_frames));
    for (frame, mut column) in matrix.columns_mut().into_iter().enumerate() {
        let offset = frame * hop_length;
        for ((dst, &src), &w) in input
            .iter_mut()
            .zip(&padded[offset..offset + n_fft])
            .zip(&window)
        {
            *dst = src * w;
        }

        fft.process(&mut input, &mut spectrum)
            .map_err(|e| Error::Fft {
                reason: e.to_string(),
            })?;

        for (dst, &src) in column.iter_mut().zip(&spectrum) {
            *dst = src;
        }
    }

    Ok(matrix)
}

/// Inverse STFT by weighted overlap-add, matching [`stft`]'s window and centering.
///
/// The result holds `hop_length * (frames - 1)` samples for even `n_fft`.
#[allow(clippy::cast_precision_loss)]
pub fn inverse_stft(
    matrix: &Array2<Complex32>,
    n_fft: usize,
    hop_length: usize,
) -> Result<Vec<f32>> {
    let (n_bins, n_frames) = matrix.dim();
    if n_bins != n_fft / 2 + 1 {
        return Err(Error::ShapeMismatch {
            expected: (n_fft / 2 + 1, n_frames),
            found: (n_bins, n_frames),
        });
    }
    if n_frames == 0 {
        return Ok(Vec::new());
    }

    let window = hann_window(n_fft);
    let mut planner = RealFftPlanner::<f32>::new();
    let ifft = planner.plan_fft_inverse(n_fft);
    let mut spectrum = ifft.make_input_vec();
    let mut frame_buf = ifft.make_output_vec();

    let full_len = n_fft + hop_length * (n_frames - 1);
    let mut output = vec![0.0f32; full_len];
    let mut window_sum = vec![0.0f32; full_len];
    let scale = 1.0 / n_fft as f32;

    for (frame, column) in matrix.columns().into_iter().enumerate() {
        for (dst, &src) in spectrum.iter_mut().zip(column.iter()) {
            *dst = src;
        }
        // DC and Nyquist bins of a real signal have no imaginary part
        spectrum[0].im = 0.0;
        if n_fft % 2 == 0 {
            spectrum[n_bins - 1].im = 0.0;
        }

        ifft.process(&mut spectrum, &mut frame_buf)
            .map_err(|e| Error::Fft {
                reason: e.to_string(),
            })?;

        let offset = frame * hop_length;
        let out = &mut output[offset..offset + n_fft];
        let sums = &mut window_sum[offset..offset + n_fft];
        for (((o, s), &x), &w) in out.iter_mut().zip(sums.iter_mut()).zip(&frame_buf).zip(&window) {
            *o += x * scale * w;
            *s += w * w;
        }
    }

    for (sample, &sum) in output.iter_mut().zip(&window_sum) {
        if sum > WINDOW_SUM_FLOOR {
            *sample /= sum;
        }
    }

    let pad = n_fft / 2;
    Ok(output[pad..full_len - pad].to_vec())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_axes_follow_sample_rate_and_hop() {
        let freqs = fft_frequencies(16_000, 2048);
        assert_eq!(freqs.len(), 1025);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[1024], 8000.0);

        let times = frame_times(4, 16_000, 512);
        assert_eq!(times.len(), 4);
        for (j, t) in times.iter().enumerate() {
            assert!((t - j as f64 * 0.032).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shape_counts_centered_frames() {
        let samples = vec![0.0; 80_000];
        let analysis = SpectralAnalysis::compute(&samples, 16_000, 2048, 512).unwrap();
        assert_eq!(analysis.shape(), (1025, 157));
        assert_eq!(analysis.magnitude.dim(), analysis.shape());
        assert_eq!(analysis.phase.dim(), analysis.shape());
        assert_eq!(analysis.times.len(), 157);
    }

    #[test]
    fn test_rejects_input_shorter_than_window() {
        let result = stft(&[0.0; 100], 2048, 512);
        assert!(matches!(
            result,
            Err(Error::InputTooShort {
                samples: 100,
                required: 2048
            })
        ));
        assert!(matches!(stft(&[], 2048, 512), Err(Error::InputTooShort { .. })));
    }

    #[test]
    fn test_pure_tone_peaks_at_expected_bin() {
        let samples = sine(1000.0, 16_000, 16_000);
        let analysis = SpectralAnalysis::compute(&samples, 16_000, 1024, 256).unwrap();
        let column = analysis.magnitude.column(30);
        let peak_bin = column
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        // 1000 Hz / (16000 / 1024) = 64
        assert_eq!(peak_bin, 64);
    }

    #[test]
    fn test_phase_times_magnitude_restores_complex() {
        let samples = sine(440.0, 8000, 4096);
        let analysis = SpectralAnalysis::compute(&samples, 8000, 512, 128).unwrap();
        for ((c, m), p) in analysis
            .complex
            .iter()
            .zip(analysis.magnitude.iter())
            .zip(analysis.phase.iter())
        {
            let restored = *p * *m;
            assert!((restored - *c).norm() < 1e-3 * (1.0 + c.norm()));
        }
    }

    #[test]
    fn test_inverse_reconstructs_interior() {
        let samples = sine(300.0, 8000, 8192);
        let matrix = stft(&samples, 512, 128).unwrap();
        let restored = inverse_stft(&matrix, 512, 128).unwrap();
        assert_eq!(restored.len(), 128 * (matrix.ncols() - 1));
        for i in 512..restored.len() - 512 {
            assert!(
                (restored[i] - samples[i]).abs() < 1e-3,
                "sample {i}: {} vs {}",
                restored[i],
                samples[i]
            );
        }
    }
}
