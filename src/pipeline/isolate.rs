//! End-to-end isolation of vocalization bursts from a waveform.

use crate::config::{DetectionConfig, validate_detection};
use crate::dsp::{
    ResynthesisParams, Segment, SpectralAnalysis, amplitude_to_db, build_mask, detect_segments,
    frequency_gate, resynthesize, suppress_noise, tail_pad_frames,
};
use crate::error::{Error, Result};
use tracing::debug;

/// Result of [`isolate`].
#[derive(Debug, Clone)]
pub struct Isolation {
    /// Reconstructed waveform containing only the masked bursts.
    ///
    /// Always the same length as the input.
    pub samples: Vec<f32>,
    /// Sample rate in Hz, unchanged from the input.
    pub sample_rate: u32,
    /// Accepted segments in ascending start order.
    pub segments: Vec<Segment>,
}

impl Isolation {
    /// Whether any segment was accepted.
    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// Detect bursts in `samples` and resynthesize them in isolation.
///
/// Runs analysis, noise suppression, gating, segment detection, masking and
/// resynthesis in that order. When nothing is detected the returned waveform
/// is silent and the segment list is empty.
pub fn isolate(samples: &[f32], sample_rate: u32, config: &DetectionConfig) -> Result<Isolation> {
    validate_detection(config)?;
    validate_waveform(samples, sample_rate)?;

    let analysis =
        SpectralAnalysis::compute(samples, sample_rate, config.n_fft, config.hop_length)?;
    let (n_bins, n_frames) = analysis.shape();
    debug!("Spectral analysis: {n_bins} bins x {n_frames} frames");

    let magnitude_db = amplitude_to_db(&suppress_noise(&analysis.magnitude));
    let gate = frequency_gate(&analysis.frequencies, config.frequency_range);
    debug!(
        "Frequency gate selects {} of {} bins",
        gate.iter().filter(|&&g| g).count(),
        n_bins
    );

    let tail_pad = tail_pad_frames(sample_rate, config.hop_length);
    let segments = detect_segments(
        &magnitude_db,
        &gate,
        config.threshold_db,
        &analysis.times,
        config.duration_range,
        tail_pad,
    );
    debug!("Detected {} segment(s)", segments.len());

    let mask = build_mask(
        analysis.shape(),
        &segments,
        &analysis.times,
        &analysis.frequencies,
        config.frequency_range,
        tail_pad,
    );

    let params = ResynthesisParams {
        n_fft: config.n_fft,
        hop_length: config.hop_length,
        sample_rate,
        fade_duration: config.fade_duration,
        output_len: samples.len(),
    };
    let isolated = resynthesize(&analysis.complex, &mask, &params)?;

    Ok(Isolation {
        samples: isolated,
        sample_rate,
        segments,
    })
}

/// Reject waveforms the analysis cannot handle.
fn validate_waveform(samples: &[f32], sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate { sample_rate });
    }

    if samples.is_empty() {
        return Err(Error::InputTooShort {
            samples: 0,
            required: 1,
        });
    }

    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }

    Ok(())
}
