//! Per-file results directory writer.

use crate::audio::write_wav;
use crate::constants::artifacts::{
    COMBINED_SPECTROGRAM, FILTERED_SPECTROGRAM, FILTERED_WAV, ORIGINAL_SPECTROGRAM, ORIGINAL_WAV,
    SEGMENTS_JSON,
};
use crate::dsp::Segment;
use crate::error::{Error, Result};
use crate::output::spectrogram::{Spectrogram, save_image, stack_panels};
use crate::output::types::SegmentsDocument;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the artifacts of one processed file into its results directory.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    dir: PathBuf,
}

impl ResultWriter {
    /// Create `dir` (and parents) and return a writer for it.
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| Error::OutputDirCreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Results directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the original waveform as `sample.wav`.
    pub fn write_original(&self, samples: &[f32], sample_rate: u32) -> Result<PathBuf> {
        self.write_waveform(ORIGINAL_WAV, samples, sample_rate)
    }

    /// Write the isolated waveform as `filtered.wav`.
    pub fn write_filtered(&self, samples: &[f32], sample_rate: u32) -> Result<PathBuf> {
        self.write_waveform(FILTERED_WAV, samples, sample_rate)
    }

    /// Write `segments.json`.
    pub fn write_segments(&self, document: &SegmentsDocument) -> Result<PathBuf> {
        let path = self.dir.join(SEGMENTS_JSON);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, document).map_err(|source| Error::JsonWrite {
            path: path.clone(),
            source,
        })?;
        writer.flush()?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Render and write the original, filtered and combined spectrograms.
    ///
    /// Segment markers are drawn on the original panel only.
    pub fn write_spectrograms(
        &self,
        original: &Spectrogram,
        filtered: &Spectrogram,
        segments: &[Segment],
    ) -> Result<Vec<PathBuf>> {
        let original_image = original.render(segments);
        let filtered_image = filtered.render(&[]);
        let combined_image = stack_panels(&original_image, &filtered_image);

        let mut written = Vec::with_capacity(3);
        for (name, image) in [
            (ORIGINAL_SPECTROGRAM, &original_image),
            (FILTERED_SPECTROGRAM, &filtered_image),
            (COMBINED_SPECTROGRAM, &combined_image),
        ] {
            let path = self.dir.join(name);
            save_image(image, &path)?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    fn write_waveform(&self, name: &str, samples: &[f32], sample_rate: u32) -> Result<PathBuf> {
        let path = self.dir.join(name);
        write_wav(&path, samples, sample_rate)?;
        debug!("Wrote {} ({} samples)", path.display(), samples.len());
        Ok(path)
    }
}
