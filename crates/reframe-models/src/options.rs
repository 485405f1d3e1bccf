//! Scan configuration and presets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A half-open slice of the video timeline restricting a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeSegment {
    /// Segment start in seconds
    pub start: f64,
    /// Segment end in seconds
    pub end: f64,
}

impl TimeSegment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Segment length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Errors produced by [`ScanOptions::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("min_score must be within 0.0..=1.0, got {0}")]
    ScoreOutOfRange(f64),

    #[error("similarity_threshold must be within 0.0..=1.0, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("min_detections must be at least 1")]
    ZeroMinDetections,

    #[error("max_samples must be at least 1")]
    ZeroMaxSamples,

    #[error("max_objects_per_frame must be at least 1")]
    ZeroObjectCap,

    #[error("max_time_gap_for_match must be positive, got {0}")]
    NonPositiveMatchGap(f64),

    #[error("segment end {end} is not after start {start}")]
    EmptySegment { start: f64, end: f64 },
}

/// Configuration for one scan call.
///
/// A non-positive `interval` is deliberately not rejected by
/// [`validate`](ScanOptions::validate): it produces an empty sample plan and
/// the scan short-circuits to a successful empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanOptions {
    /// Seconds between sampled frames
    pub interval: f64,

    /// Detection confidence floor (0.0-1.0)
    pub min_score: f64,

    /// IoU floor for two detections to count as the same subject (0.0-1.0)
    pub similarity_threshold: f64,

    /// Minimum observation count for a subject to survive the scan
    pub min_detections: usize,

    /// Optional disjoint time ranges restricting the scan; empty means the
    /// whole `[0, duration)` range
    pub segments: Vec<TimeSegment>,

    /// Hard cap on frames processed per scan
    pub max_samples: usize,

    /// Detections kept per frame, highest score first
    pub max_objects_per_frame: usize,

    /// Seconds a subject may go unobserved and still accept a match;
    /// prevents stitching unrelated reappearances into one track
    pub max_time_gap_for_match: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            interval: 1.0,
            min_score: 0.5,
            similarity_threshold: 0.3,
            min_detections: 2,
            segments: Vec::new(),
            max_samples: 15,
            max_objects_per_frame: 5,
            max_time_gap_for_match: 3.0,
        }
    }
}

impl ScanOptions {
    /// Coarse preset for quick preview scans.
    pub fn fast() -> Self {
        Self {
            interval: 2.0,
            max_samples: 8,
            max_objects_per_frame: 3,
            ..Default::default()
        }
    }

    /// Dense preset for final passes.
    pub fn quality() -> Self {
        Self {
            interval: 0.5,
            min_score: 0.4,
            max_samples: 40,
            max_objects_per_frame: 8,
            max_time_gap_for_match: 2.0,
            ..Default::default()
        }
    }

    /// Check the recognized options for out-of-range values.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(OptionsError::ScoreOutOfRange(self.min_score));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(OptionsError::ThresholdOutOfRange(self.similarity_threshold));
        }
        if self.min_detections == 0 {
            return Err(OptionsError::ZeroMinDetections);
        }
        if self.max_samples == 0 {
            return Err(OptionsError::ZeroMaxSamples);
        }
        if self.max_objects_per_frame == 0 {
            return Err(OptionsError::ZeroObjectCap);
        }
        if self.max_time_gap_for_match <= 0.0 {
            return Err(OptionsError::NonPositiveMatchGap(self.max_time_gap_for_match));
        }
        for segment in &self.segments {
            if segment.end <= segment.start {
                return Err(OptionsError::EmptySegment {
                    start: segment.start,
                    end: segment.end,
                });
            }
        }
        Ok(())
    }
}
