//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "callsift";

/// Default detection band lower bound in Hz.
pub const DEFAULT_FREQ_LOW: f64 = 4000.0;

/// Default detection band upper bound in Hz.
pub const DEFAULT_FREQ_HIGH: f64 = 11_000.0;

/// Default minimum accepted segment duration in seconds.
pub const DEFAULT_MIN_DURATION: f64 = 0.3;

/// Default maximum accepted segment duration in seconds.
pub const DEFAULT_MAX_DURATION: f64 = 3.0;

/// Default loudness threshold in dB relative to the denoised peak.
pub const DEFAULT_THRESHOLD_DB: f32 = -41.0;

/// Default FFT window length in samples.
pub const DEFAULT_N_FFT: usize = 2048;

/// Default hop between analysis frames in samples.
pub const DEFAULT_HOP_LENGTH: usize = 512;

/// Default fade length applied at both ends of the isolated waveform, in seconds.
pub const DEFAULT_FADE_DURATION: f64 = 0.3;

/// Spectral analysis constants.
pub mod spectral {
    /// Floor added to the magnitude in the suppression gain denominator.
    pub const NOISE_GAIN_FLOOR: f32 = 0.01;

    /// Smallest amplitude considered when converting to decibels.
    pub const AMPLITUDE_FLOOR: f32 = 1e-5;

    /// Dynamic range kept below the peak when converting to decibels.
    pub const TOP_DB: f32 = 80.0;

    /// Fraction of the band's upper bound added as tolerance during gating.
    pub const GATE_UPPER_TOLERANCE: f64 = 0.1;

    /// Tail pad appended after each segment's falling edge, in seconds.
    pub const TAIL_PAD_SECS: f64 = 0.02;

    /// Window-sum values below this are left unnormalized in the inverse transform.
    pub const WINDOW_SUM_FLOOR: f32 = 1e-8;
}

/// Result artifact names.
pub mod artifacts {
    /// Copy of the analyzed input waveform.
    pub const ORIGINAL_WAV: &str = "sample.wav";
    /// Isolated waveform.
    pub const FILTERED_WAV: &str = "filtered.wav";
    /// Segment report.
    pub const SEGMENTS_JSON: &str = "segments.json";
    /// Spectrogram of the input with segment markers.
    pub const ORIGINAL_SPECTROGRAM: &str = "original_spectrogram.png";
    /// Spectrogram of the isolated waveform.
    pub const FILTERED_SPECTROGRAM: &str = "filtered_spectrogram.png";
    /// Both spectrograms stacked vertically.
    pub const COMBINED_SPECTROGRAM: &str = "combined_spectrograms.png";
}

/// Spectrogram image constants.
pub mod image {
    /// Image width in pixels.
    pub const WIDTH: u32 = 1200;
    /// Height of a single spectrogram panel in pixels.
    pub const PANEL_HEIGHT: u32 = 400;
    /// Length of one dash in a segment marker, in pixels.
    pub const DASH_LENGTH: u32 = 8;
    /// Segment marker color.
    pub const MARKER_RGB: [u8; 3] = [230, 40, 40];
    /// Separator line between stacked panels.
    pub const SEPARATOR_HEIGHT: u32 = 4;
}

/// Scale factor for 16-bit PCM output.
pub const PCM16_SCALE: f32 = 32767.0;

/// Supported audio file extensions.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac"];
