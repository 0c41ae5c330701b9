//! Serialized result types.

use crate::config::DetectionConfig;
use crate::dsp::Segment;
use serde::{Deserialize, Serialize};

/// One accepted segment as written to `segments.json`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// `end - start` in seconds.
    pub duration: f64,
}

impl From<&Segment> for SegmentReport {
    fn from(segment: &Segment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            duration: segment.duration(),
        }
    }
}

/// Contents of `segments.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentsDocument {
    /// Input file the segments were detected in.
    pub source: String,
    /// Sample rate of the input in Hz.
    pub sample_rate: u32,
    /// Length of the input in seconds.
    pub duration_secs: f64,
    /// Parameters used for detection.
    pub config: DetectionConfig,
    /// Accepted segments in ascending start order.
    pub segments: Vec<SegmentReport>,
}

impl SegmentsDocument {
    /// Build a document for `segments` detected in `source`.
    pub fn new(
        source: String,
        sample_rate: u32,
        duration_secs: f64,
        config: DetectionConfig,
        segments: &[Segment],
    ) -> Self {
        Self {
            source,
            sample_rate,
            duration_secs,
            config,
            segments: segments.iter().map(SegmentReport::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_duration() {
        let report = SegmentReport::from(&Segment {
            start: 1.5,
            end: 2.25,
        });
        assert_eq!(report.duration, 0.75);
    }

    #[test]
    fn test_document_json_layout() {
        let document = SegmentsDocument::new(
            "call.wav".to_string(),
            16_000,
            5.0,
            DetectionConfig::default(),
            &[Segment {
                start: 2.0,
                end: 3.0,
            }],
        );
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["source"], "call.wav");
        assert_eq!(value["sample_rate"], 16_000);
        assert_eq!(value["segments"][0]["start"], 2.0);
        assert_eq!(value["segments"][0]["duration"], 1.0);
        assert_eq!(value["config"]["n_fft"], 2048);
        assert_eq!(value["config"]["frequency_range"][0], 4000.0);
    }
}
