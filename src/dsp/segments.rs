//! Segment detection over per-frame activity.

use crate::constants::spectral::TAIL_PAD_SECS;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A time interval in seconds containing sustained in-band energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, including the tail pad.
    pub end: f64,
}

impl Segment {
    /// Length of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Two-state activity tracker driven once over the frame axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivityState {
    Inactive,
    Active { since: usize },
}

/// Number of frames covering the fixed 20 ms tail pad.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn tail_pad_frames(sample_rate: u32, hop_length: usize) -> usize {
    (TAIL_PAD_SECS * f64::from(sample_rate) / hop_length as f64).round() as usize
}

/// Mark each frame active if any gated cell exceeds `threshold_db`.
pub fn frame_activity(magnitude_db: &Array2<f32>, gate: &[bool], threshold_db: f32) -> Vec<bool> {
    let mut active = vec![false; magnitude_db.ncols()];
    for (row, _) in magnitude_db
        .rows()
        .into_iter()
        .zip(gate)
        .filter(|(_, selected)| **selected)
    {
        for (flag, &db) in active.iter_mut().zip(row.iter()) {
            *flag |= db > threshold_db;
        }
    }
    active
}

/// Contiguous runs of active frames as `(rising, falling)` frame indices.
///
/// `falling` is the first inactive frame after the run. A run still active
/// at the end of the recording is closed at the final frame index.
pub fn active_intervals(activity: &[bool]) -> Vec<(usize, usize)> {
    let mut intervals = Vec::new();
    let mut state = ActivityState::Inactive;

    for (frame, &active) in activity.iter().enumerate() {
        state = match (state, active) {
            (ActivityState::Inactive, true) => ActivityState::Active { since: frame },
            (ActivityState::Active { since }, false) => {
                intervals.push((since, frame));
                ActivityState::Inactive
            }
            (unchanged, _) => unchanged,
        };
    }

    if let ActivityState::Active { since } = state {
        intervals.push((since, activity.len() - 1));
    }

    intervals
}

/// Find segments whose padded duration lies within `duration_range`.
///
/// Segments come out in ascending start order and never overlap.
pub fn detect_segments(
    magnitude_db: &Array2<f32>,
    gate: &[bool],
    threshold_db: f32,
    times: &[f64],
    duration_range: (f64, f64),
    tail_pad: usize,
) -> Vec<Segment> {
    let Some(last) = times.len().checked_sub(1) else {
        return Vec::new();
    };
    let (min_duration, max_duration) = duration_range;
    let activity = frame_activity(magnitude_db, gate, threshold_db);

    active_intervals(&activity)
        .into_iter()
        .filter_map(|(rising, falling)| {
            let segment = Segment {
                start: times[rising.min(last)],
                end: times[(falling + tail_pad).min(last)],
            };
            let duration = segment.duration();
            (duration > 0.0 && (min_duration..=max_duration).contains(&duration))
                .then_some(segment)
        })
        .collect()
}
