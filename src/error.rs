//! Error types for callsift.

/// Result type alias for callsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for callsift.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Detection parameters are inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the validation failure.
        message: String,
    },

    /// Waveform is shorter than one analysis window.
    #[error("input too short: {samples} samples, at least {required} required")]
    InputTooShort {
        /// Number of samples in the waveform.
        samples: usize,
        /// Minimum number of samples (one FFT window).
        required: usize,
    },

    /// Waveform contains NaN or infinite samples.
    #[error("waveform contains a non-finite sample at index {index}")]
    NonFiniteSample {
        /// Index of the first offending sample.
        index: usize,
    },

    /// FFT planner rejected a buffer.
    #[error("FFT failed: {reason}")]
    Fft {
        /// Description of the FFT failure.
        reason: String,
    },

    /// Two time-frequency matrices that must align do not.
    #[error("matrix shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Expected `(bins, frames)`.
        expected: (usize, usize),
        /// Actual `(bins, frames)`.
        found: (usize, usize),
    },

    /// Sample rate of zero.
    #[error("invalid sample rate: {sample_rate} Hz")]
    InvalidSampleRate {
        /// The rejected sample rate.
        sample_rate: u32,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write spectrogram image.
    #[error("failed to write image '{path}'")]
    ImageWrite {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}
