//! Configuration validation.

use crate::config::{Config, DetectionConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_detection(&config.detection)
}

/// Validate detection parameters before any computation begins.
pub fn validate_detection(detection: &DetectionConfig) -> Result<()> {
    let (freq_low, freq_high) = detection.frequency_range;
    check_range("frequency_range", freq_low, freq_high)?;

    let (min_duration, max_duration) = detection.duration_range;
    check_range("duration_range", min_duration, max_duration)?;

    if !detection.threshold_db.is_finite() {
        return Err(invalid(format!(
            "threshold_db must be finite, got {}",
            detection.threshold_db
        )));
    }

    if detection.n_fft == 0 {
        return Err(invalid("n_fft must be at least 1".to_string()));
    }

    if detection.hop_length == 0 {
        return Err(invalid("hop_length must be at least 1".to_string()));
    }

    // Larger hops leave gaps the inverse transform cannot fill
    if detection.hop_length > detection.n_fft {
        return Err(invalid(format!(
            "hop_length ({}) must not exceed n_fft ({})",
            detection.hop_length, detection.n_fft
        )));
    }

    if !detection.fade_duration.is_finite() || detection.fade_duration < 0.0 {
        return Err(invalid(format!(
            "fade_duration must be non-negative, got {}",
            detection.fade_duration
        )));
    }

    Ok(())
}

/// Check that `(low, high)` is finite, non-negative and ordered.
fn check_range(name: &str, low: f64, high: f64) -> Result<()> {
    if !low.is_finite() || !high.is_finite() {
        return Err(invalid(format!("{name} bounds must be finite")));
    }
    if low < 0.0 {
        return Err(invalid(format!("{name} lower bound must be non-negative, got {low}")));
    }
    if low > high {
        return Err(invalid(format!(
            "{name} lower bound ({low}) exceeds upper bound ({high})"
        )));
    }
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}
