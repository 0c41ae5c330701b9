//! Time-frequency mask construction.

use super::segments::Segment;
use ndarray::{Array2, s};

/// Build a `{0, 1}` mask of `shape` covering every segment inside the exact band.
///
/// Columns run from the frame nearest each segment's start up to (excluding)
/// the frame nearest its end plus `tail_pad`, clamped to the frame count.
/// Overlapping segments union.
pub fn build_mask(
    shape: (usize, usize),
    segments: &[Segment],
    times: &[f64],
    frequencies: &[f64],
    frequency_range: (f64, f64),
    tail_pad: usize,
) -> Array2<f32> {
    let (n_bins, n_frames) = shape;
    let mut mask = Array2::zeros(shape);

    let (lo, hi) = frequency_range;
    let band_rows: Vec<usize> = frequencies
        .iter()
        .take(n_bins)
        .enumerate()
        .filter(|(_, f)| (lo..=hi).contains(*f))
        .map(|(row, _)| row)
        .collect();

    for segment in segments {
        let (Some(start), Some(end)) = (
            nearest_frame(times, segment.start),
            nearest_frame(times, segment.end),
        ) else {
            continue;
        };
        let end = (end + tail_pad).min(n_frames);
        if start >= end {
            continue;
        }

        for &row in &band_rows {
            mask.slice_mut(s![row, start..end]).fill(1.0);
        }
    }

    mask
}

/// Index of the frame whose time is closest to `time` (first on ties).
fn nearest_frame(times: &[f64], time: f64) -> Option<usize> {
    times
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - time).abs().total_cmp(&(*b - time).abs()))
        .map(|(index, _)| index)
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn axis(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn test_nearest_frame_prefers_first_on_ties() {
        let times = [0.0, 1.0, 2.0];
        assert_eq!(nearest_frame(&times, 0.5), Some(0));
        assert_eq!(nearest_frame(&times, 1.6), Some(2));
        assert_eq!(nearest_frame(&[], 1.0), None);
    }

    #[test]
    fn test_mask_is_contained_in_band_and_segment() {
        let times = axis(50, 0.1);
        let freqs = axis(11, 1000.0);
        let segment = Segment {
            start: 1.0,
            end: 2.0,
        };
        let mask = build_mask((11, 50), &[segment], &times, &freqs, (3000.0, 6000.0), 1);

        for ((row, col), &value) in mask.indexed_iter() {
            let in_band = (3..=6).contains(&row);
            let in_time = (10..21).contains(&col);
            assert_eq!(value, if in_band && in_time { 1.0 } else { 0.0 }, "cell ({row}, {col})");
        }
    }

    #[test]
    fn test_mask_ignores_gate_tolerance() {
        let times = axis(10, 0.1);
        let freqs = [1000.0, 2000.0, 2100.0];
        let segment = Segment {
            start: 0.0,
            end: 0.5,
        };
        let mask = build_mask((3, 10), &[segment], &times, &freqs, (1000.0, 2000.0), 0);
        assert!(mask.row(2).iter().all(|&v| v == 0.0));
        assert!(mask.row(1).iter().any(|&v| v == 1.0));
    }

    #[test]
    fn test_padded_end_is_clamped_to_frame_count() {
        let times = axis(10, 0.1);
        let freqs = [500.0];
        let segment = Segment {
            start: 0.7,
            end: 0.9,
        };
        let mask = build_mask((1, 10), &[segment], &times, &freqs, (0.0, 1000.0), 5);
        assert_eq!(mask.row(0).iter().filter(|&&v| v == 1.0).count(), 3);
    }

    #[test]
    fn test_overlapping_segments_union_and_rebuild_is_identical() {
        let times = axis(40, 0.05);
        let freqs = axis(5, 100.0);
        let segments = [
            Segment {
                start: 0.2,
                end: 0.8,
            },
            Segment {
                start: 0.6,
                end: 1.2,
            },
        ];
        let first = build_mask((5, 40), &segments, &times, &freqs, (100.0, 300.0), 1);
        let second = build_mask((5, 40), &segments, &times, &freqs, (100.0, 300.0), 1);
        assert_eq!(first, second);
        assert!(first.iter().all(|&v| v == 0.0 || v == 1.0));
        // Columns 4..25 across rows 1..=3.
        assert_eq!(first.iter().filter(|&&v| v == 1.0).count(), 3 * 21);
    }
}
