//! CLI argument definitions.

use crate::cli::validators::{parse_non_negative, parse_positive_usize, parse_threshold_db};
use crate::config::{Config, DetectionConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Isolate animal vocalization bursts from field recordings.
#[derive(Debug, Parser)]
#[command(name = "callsift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Only show warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect bursts in a recording and write the isolated audio.
    Extract(ExtractArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Audio file to process.
    pub audio_file: PathBuf,

    /// Target frequency band in Hz.
    #[arg(short = 'z', long, num_args = 2, value_names = ["LO", "HI"],
          value_parser = parse_non_negative)]
    pub frequency_range: Option<Vec<f64>>,

    /// Accepted segment duration in seconds.
    #[arg(short, long, num_args = 2, value_names = ["MIN", "MAX"],
          value_parser = parse_non_negative)]
    pub duration_range: Option<Vec<f64>>,

    /// Loudness threshold in dB relative to the loudest cell (e.g. -41).
    #[arg(short, long, allow_hyphen_values = true, value_parser = parse_threshold_db,
          env = "CALLSIFT_THRESHOLD_DB")]
    pub threshold_db: Option<f32>,

    /// FFT window length in samples.
    #[arg(long, value_parser = parse_positive_usize)]
    pub n_fft: Option<usize>,

    /// Hop between analysis frames in samples.
    #[arg(long, value_parser = parse_positive_usize)]
    pub hop_length: Option<usize>,

    /// Fade applied to both ends of the isolated audio, in seconds.
    #[arg(long, value_parser = parse_non_negative)]
    pub fade_duration: Option<f64>,

    /// Parent directory for the results folder (default: current directory).
    #[arg(short, long, env = "CALLSIFT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip spectrogram images.
    #[arg(long)]
    pub no_images: bool,

    /// Write artifacts without printing the segment summary.
    #[arg(long)]
    pub save_only: bool,
}

impl ExtractArgs {
    /// Detection parameters: command line first, then the config file defaults.
    pub fn detection_config(&self, config: &Config) -> DetectionConfig {
        let base = config.detection;
        DetectionConfig {
            frequency_range: pair(self.frequency_range.as_deref()).unwrap_or(base.frequency_range),
            duration_range: pair(self.duration_range.as_deref()).unwrap_or(base.duration_range),
            threshold_db: self.threshold_db.unwrap_or(base.threshold_db),
            n_fft: self.n_fft.unwrap_or(base.n_fft),
            hop_length: self.hop_length.unwrap_or(base.hop_length),
            fade_duration: self.fade_duration.unwrap_or(base.fade_duration),
        }
    }

    /// Parent directory for the results folder, if one was chosen.
    pub fn output_dir(&self, config: &Config) -> Option<PathBuf> {
        self.output_dir
            .clone()
            .or_else(|| config.output.dir.clone())
    }

    /// Whether spectrogram images should be written.
    pub fn images(&self, config: &Config) -> bool {
        !self.no_images && config.output.images
    }
}

fn pair(values: Option<&[f64]>) -> Option<(f64, f64)> {
    match values? {
        [lo, hi] => Some((*lo, *hi)),
        _ => None,
    }
}
