//! Callsift - isolate animal vocalization bursts from field recordings.
//!
//! A recording is analyzed with a short-time Fourier transform, stationary
//! noise is suppressed, and sustained energy inside a target band is detected
//! as time segments. Only those segments are resynthesized, giving an audio
//! file that contains nothing but the calls.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dsp;
pub mod error;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, ExtractArgs};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_detection};
use pipeline::{is_audio_file, process_file, results_dir_for};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for callsift CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Extract(args) => {
            let config = load_default_config()?;
            extract(&args, &config)
        }
        Command::Config { action } => handle_config_command(action),
    }
}

/// Run detection on one file and write its results directory.
fn extract(args: &ExtractArgs, config: &Config) -> Result<()> {
    let detection = args.detection_config(config);
    validate_detection(&detection)?;

    if !is_audio_file(&args.audio_file) {
        warn!(
            "Unrecognized audio extension, trying to decode anyway: {}",
            args.audio_file.display()
        );
    }

    let output_dir = args.output_dir(config);
    let results_dir = results_dir_for(&args.audio_file, output_dir.as_deref());

    let result = process_file(
        &args.audio_file,
        &results_dir,
        &detection,
        args.images(config),
    )?;

    info!(
        "Complete: {} segment(s) from {:.2}s of audio in {:.2}s",
        result.segments.len(),
        result.audio_duration_secs,
        result.duration_secs
    );

    if !args.save_only {
        output::print_summary(&args.audio_file, &result.segments, &result.results_dir)?;
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout is reserved for the segment summary
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let text = toml::to_string_pretty(&config)
                .map_err(|source| Error::ConfigSerialize { source })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
