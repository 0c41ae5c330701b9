//! Single file processing pipeline.

use crate::audio::decode_audio_file;
use crate::config::DetectionConfig;
use crate::dsp::Segment;
use crate::error::Result;
use crate::output::{ResultWriter, SegmentsDocument, Spectrogram};
use crate::pipeline::isolate;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Process a single audio file and write its artifacts.
///
/// # Arguments
///
/// * `input_path` - Path to input audio file
/// * `results_dir` - Directory receiving the artifacts; created only after detection succeeds
/// * `config` - Detection parameters
/// * `images` - Whether to render spectrogram images
pub fn process_file(
    input_path: &Path,
    results_dir: &Path,
    config: &DetectionConfig,
    images: bool,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let decoded = decode_audio_file(input_path)?;
    let audio_duration_secs = decoded.duration_secs();
    info!(
        "Decoded {:.2}s of audio at {} Hz",
        audio_duration_secs, decoded.sample_rate
    );

    let isolation = isolate(&decoded.samples, decoded.sample_rate, config)?;
    if isolation.has_segments() {
        info!("Detected {} segment(s)", isolation.segments.len());
    } else {
        warn!("No segments detected in {}", input_path.display());
    }

    let writer = ResultWriter::create(results_dir)?;
    writer.write_original(&decoded.samples, decoded.sample_rate)?;
    writer.write_filtered(&isolation.samples, isolation.sample_rate)?;

    let document = SegmentsDocument::new(
        input_path.display().to_string(),
        decoded.sample_rate,
        audio_duration_secs,
        *config,
        &isolation.segments,
    );
    writer.write_segments(&document)?;

    if images {
        debug!("Rendering spectrograms...");
        let original = Spectrogram::compute(
            &decoded.samples,
            decoded.sample_rate,
            config.n_fft,
            config.hop_length,
        )?;
        let filtered = Spectrogram::compute(
            &isolation.samples,
            isolation.sample_rate,
            config.n_fft,
            config.hop_length,
        )?;
        writer.write_spectrograms(&original, &filtered, &isolation.segments)?;
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    let realtime_factor = if duration_secs > 0.0 {
        audio_duration_secs / duration_secs
    } else {
        0.0
    };
    info!(
        "Processed {} in {:.2}s ({:.1}x realtime)",
        input_path.display(),
        duration_secs,
        realtime_factor
    );

    Ok(ProcessResult {
        segments: isolation.segments,
        results_dir: writer.dir().to_path_buf(),
        duration_secs,
        audio_duration_secs,
    })
}

/// Result of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Accepted segments.
    pub segments: Vec<Segment>,
    /// Directory holding the written artifacts.
    pub results_dir: PathBuf,
    /// Processing duration in seconds.
    pub duration_secs: f64,
    /// Audio duration in seconds.
    pub audio_duration_secs: f64,
}
