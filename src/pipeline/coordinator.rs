//! Input and results-directory resolution.

use crate::constants::AUDIO_EXTENSIONS;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Results directory for `input`: `<output_dir>/<input stem>`.
///
/// `output_dir` defaults to the current directory.
pub fn results_dir_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    // Lossy for non-UTF-8 stems
    let stem = input
        .file_stem()
        .map_or(Cow::Borrowed("output"), OsStr::to_string_lossy);

    output_dir
        .unwrap_or_else(|| Path::new("."))
        .join(stem.as_ref())
}

/// Check if a file has a supported audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}
