//! Processing pipeline components.

mod coordinator;
mod isolate;
mod processor;

pub use coordinator::{is_audio_file, results_dir_for};
pub use isolate::{Isolation, isolate};
pub use processor::{ProcessResult, process_file};
