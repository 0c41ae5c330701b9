//! Result artifacts: audio, segment lists, spectrogram images and the terminal summary.

pub mod report;
pub mod spectrogram;
mod types;
mod writer;

pub use report::{print_summary, write_summary};
pub use spectrogram::{Spectrogram, save_image, stack_panels};
pub use types::{SegmentReport, SegmentsDocument};
pub use writer::ResultWriter;
