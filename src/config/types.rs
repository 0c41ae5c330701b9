//! Configuration type definitions.

use crate::constants::{
    DEFAULT_FADE_DURATION, DEFAULT_FREQ_HIGH, DEFAULT_FREQ_LOW, DEFAULT_HOP_LENGTH,
    DEFAULT_MAX_DURATION, DEFAULT_MIN_DURATION, DEFAULT_N_FFT, DEFAULT_THRESHOLD_DB,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection defaults.
    pub detection: DetectionConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Parameters of one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Target band `(low, high)` in Hz.
    pub frequency_range: (f64, f64),

    /// Accepted segment duration `(min, max)` in seconds.
    pub duration_range: (f64, f64),

    /// Loudness threshold in dB relative to the denoised peak.
    pub threshold_db: f32,

    /// FFT window length in samples.
    pub n_fft: usize,

    /// Hop between frames in samples.
    pub hop_length: usize,

    /// Fade applied to both ends of the isolated waveform, in seconds.
    pub fade_duration: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            frequency_range: (DEFAULT_FREQ_LOW, DEFAULT_FREQ_HIGH),
            duration_range: (DEFAULT_MIN_DURATION, DEFAULT_MAX_DURATION),
            threshold_db: DEFAULT_THRESHOLD_DB,
            n_fft: DEFAULT_N_FFT,
            hop_length: DEFAULT_HOP_LENGTH,
            fade_duration: DEFAULT_FADE_DURATION,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parent directory for per-file result folders (None = current directory).
    pub dir: Option<PathBuf>,

    /// Whether to render spectrogram images.
    pub images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            images: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_defaults() {
        let detection = DetectionConfig::default();
        assert_eq!(detection.frequency_range, (4000.0, 11_000.0));
        assert_eq!(detection.duration_range, (0.3, 3.0));
        assert_eq!(detection.threshold_db, -41.0);
        assert_eq!(detection.n_fft, 2048);
        assert_eq!(detection.hop_length, 512);
        assert_eq!(detection.fade_duration, 0.3);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r"
[detection]
frequency_range = [2000.0, 5000.0]
threshold_db = -30.0
",
        )
        .unwrap();
        assert_eq!(config.detection.frequency_range, (2000.0, 5000.0));
        assert_eq!(config.detection.threshold_db, -30.0);
        assert_eq!(config.detection.duration_range, (0.3, 3.0));
        assert!(config.output.images);
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
