//! Spectrogram image rendering.
//!
//! Panels are drawn on a log-frequency axis with the lowest non-DC bin at the
//! bottom and Nyquist at the top. Each pixel column samples the nearest frame.

use crate::constants::image::{DASH_LENGTH, MARKER_RGB, PANEL_HEIGHT, SEPARATOR_HEIGHT, WIDTH};
use crate::constants::spectral::TOP_DB;
use crate::dsp::{Segment, SpectralAnalysis, amplitude_to_db};
use crate::error::{Error, Result};
use image::{Rgb, RgbImage, imageops};
use ndarray::Array2;
use std::path::Path;

/// Colour stops of the dark-to-bright ramp, evenly spaced over `[0, 1]`.
const RAMP: [[u8; 3]; 5] = [
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [252, 137, 97],
    [252, 253, 191],
];

/// A dB spectrogram ready to be drawn.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    db: Array2<f32>,
    frequencies: Vec<f64>,
    times: Vec<f64>,
}

impl Spectrogram {
    /// Analyze `samples` and scale the magnitude to dB relative to its own peak.
    pub fn compute(
        samples: &[f32],
        sample_rate: u32,
        n_fft: usize,
        hop_length: usize,
    ) -> Result<Self> {
        let analysis = SpectralAnalysis::compute(samples, sample_rate, n_fft, hop_length)?;
        Ok(Self {
            db: amplitude_to_db(&analysis.magnitude),
            frequencies: analysis.frequencies,
            times: analysis.times,
        })
    }

    /// Draw the spectrogram with a dashed marker at every segment boundary.
    pub fn render(&self, segments: &[Segment]) -> RgbImage {
        let (n_bins, n_frames) = self.db.dim();
        let mut image = RgbImage::new(WIDTH, PANEL_HEIGHT);
        if n_bins == 0 || n_frames == 0 {
            return image;
        }

        let rows: Vec<usize> = (0..PANEL_HEIGHT).map(|y| self.bin_for_row(y)).collect();
        for x in 0..WIDTH {
            let frame = column_to_frame(x, n_frames);
            for (y, &bin) in (0..PANEL_HEIGHT).zip(&rows) {
                image.put_pixel(x, y, ramp_color(db_to_unit(self.db[[bin, frame]])));
            }
        }

        for segment in segments {
            self.draw_marker(&mut image, segment.start);
            self.draw_marker(&mut image, segment.end);
        }

        image
    }

    /// Bin shown at pixel row `y` (row 0 is the top of the panel).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn bin_for_row(&self, y: u32) -> usize {
        let n_bins = self.frequencies.len();
        if n_bins < 2 {
            return 0;
        }

        let bin_width = self.frequencies[1];
        let lowest = bin_width;
        let highest = self.frequencies[n_bins - 1];
        let height = f64::from(PANEL_HEIGHT);
        let fraction = 1.0 - (f64::from(y) + 0.5) / height;
        let frequency = lowest * (highest / lowest).powf(fraction);

        ((frequency / bin_width).round() as usize).clamp(1, n_bins - 1)
    }

    /// Pixel column for `time`, scaled over the analyzed span.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn time_to_column(&self, time: f64) -> u32 {
        let span = self.times.last().copied().unwrap_or(0.0);
        if span <= 0.0 {
            return 0;
        }
        let position = (time / span).clamp(0.0, 1.0) * f64::from(WIDTH - 1);
        position.round() as u32
    }

    fn draw_marker(&self, image: &mut RgbImage, time: f64) {
        let x = self.time_to_column(time);
        for y in (0..image.height()).filter(|y| (y / DASH_LENGTH) % 2 == 0) {
            image.put_pixel(x, y, Rgb(MARKER_RGB));
        }
    }
}

/// Stack `top` above `bottom` with a white separator between them.
pub fn stack_panels(top: &RgbImage, bottom: &RgbImage) -> RgbImage {
    let width = top.width().max(bottom.width());
    let offset = top.height() + SEPARATOR_HEIGHT;
    let mut canvas = RgbImage::from_pixel(width, offset + bottom.height(), Rgb([255, 255, 255]));

    imageops::replace(&mut canvas, top, 0, 0);
    imageops::replace(&mut canvas, bottom, 0, i64::from(offset));
    canvas
}

/// Save an image, inferring the format from the extension.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|source| Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Map dB in `[-TOP_DB, 0]` to `[0, 1]`.
fn db_to_unit(db: f32) -> f32 {
    ((db + TOP_DB) / TOP_DB).clamp(0.0, 1.0)
}

/// Linear interpolation along [`RAMP`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn ramp_color(t: f32) -> Rgb<u8> {
    let scaled = t.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32;
    let index = (scaled.floor() as usize).min(RAMP.len() - 2);
    let local = scaled - index as f32;

    let (from, to) = (RAMP[index], RAMP[index + 1]);
    let mut rgb = [0u8; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        let a = f32::from(from[channel]);
        let b = f32::from(to[channel]);
        *value = (a + (b - a) * local).round() as u8;
    }
    Rgb(rgb)
}

/// Frame shown in pixel column `x`.
#[allow(clippy::cast_possible_truncation)]
fn column_to_frame(x: u32, n_frames: usize) -> usize {
    let frame = u64::from(x) * n_frames as u64 / u64::from(WIDTH);
    (frame as usize).min(n_frames - 1)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(ramp_color(0.0), Rgb([0, 0, 4]));
        assert_eq!(ramp_color(1.0), Rgb([252, 253, 191]));
        assert_eq!(ramp_color(0.5), Rgb([183, 55, 121]));
        assert_eq!(ramp_color(-3.0), ramp_color(0.0));
    }

    #[test]
    fn test_db_to_unit_clamps() {
        assert!((db_to_unit(0.0) - 1.0).abs() < f32::EPSILON);
        assert!(db_to_unit(-80.0).abs() < f32::EPSILON);
        assert!(db_to_unit(-200.0).abs() < f32::EPSILON);
        assert!((db_to_unit(-40.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_column_to_frame_covers_all_frames() {
        assert_eq!(column_to_frame(0, 157), 0);
        assert_eq!(column_to_frame(WIDTH - 1, 157), 156);
        assert_eq!(column_to_frame(WIDTH - 1, 5000), 4995);
    }

    #[test]
    fn test_silence_renders_dark_panel() {
        let spectrogram = Spectrogram::compute(&vec![0.0; 8000], 16_000, 512, 128).unwrap();
        let image = spectrogram.render(&[]);
        assert_eq!(image.dimensions(), (WIDTH, PANEL_HEIGHT));
        assert!(image.pixels().all(|p| *p == Rgb(RAMP[0])));
    }

    #[test]
    fn test_markers_are_drawn_at_segment_bounds() {
        let spectrogram = Spectrogram::compute(&vec![0.0; 16_000], 16_000, 512, 128).unwrap();
        let span = *spectrogram.times.last().unwrap();
        let segment = Segment {
            start: 0.0,
            end: span,
        };
        let image = spectrogram.render(&[segment]);

        assert_eq!(*image.get_pixel(0, 0), Rgb(MARKER_RGB));
        assert_eq!(*image.get_pixel(WIDTH - 1, 0), Rgb(MARKER_RGB));
        // Gap in the dash pattern.
        assert_eq!(*image.get_pixel(0, DASH_LENGTH), Rgb(RAMP[0]));
    }

    #[test]
    fn test_tone_is_brightest_near_its_row() {
        let sr = 16_000u32;
        let samples: Vec<f32> = (0..16_000)
            .map(|n| (2.0 * std::f32::consts::PI * 4000.0 * n as f32 / sr as f32).sin())
            .collect();
        let spectrogram = Spectrogram::compute(&samples, sr, 512, 128).unwrap();
        let image = spectrogram.render(&[]);

        let column = WIDTH / 2;
        let brightest = (0..PANEL_HEIGHT)
            .max_by_key(|&y| {
                let p = image.get_pixel(column, y);
                u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2])
            })
            .unwrap();
        // log axis from 31.25 Hz to 8 kHz puts 4 kHz near 12.5% from the top.
        let expected = (f64::from(PANEL_HEIGHT) * (1.0 - (128.0f64).ln() / (256.0f64).ln())) as u32;
        assert!(brightest.abs_diff(expected) <= 4, "row {brightest}, expected {expected}");
    }

    #[test]
    fn test_stacked_panels_keep_both_images() {
        let top = RgbImage::from_pixel(10, 4, Rgb([1, 2, 3]));
        let bottom = RgbImage::from_pixel(10, 6, Rgb([9, 8, 7]));
        let stacked = stack_panels(&top, &bottom);

        assert_eq!(stacked.dimensions(), (10, 4 + SEPARATOR_HEIGHT + 6));
        assert_eq!(*stacked.get_pixel(5, 0), Rgb([1, 2, 3]));
        assert_eq!(*stacked.get_pixel(5, 4), Rgb([255, 255, 255]));
        assert_eq!(*stacked.get_pixel(5, 4 + SEPARATOR_HEIGHT), Rgb([9, 8, 7]));
    }
}
