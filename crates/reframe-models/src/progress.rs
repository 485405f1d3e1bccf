//! Scan progress reporting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Progress snapshot emitted after every processed frame.
///
/// Purely observational; never persisted. A frame that contributed nothing
/// (seek timeout, detector error) still advances `current_frame`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanProgress {
    /// Frames processed so far
    pub current_frame: usize,
    /// Total frames in the sample plan
    pub total_frames: usize,
    /// Seconds since the scan loop started
    pub elapsed_seconds: f64,
    /// Remaining-time estimate assuming the observed per-frame rate holds
    pub estimated_remaining_seconds: f64,
    /// Completion percentage (0.0-100.0)
    pub percent_complete: f64,
}

impl ScanProgress {
    /// Build the snapshot for the frame that just finished.
    pub fn after_frame(current_frame: usize, total_frames: usize, elapsed_seconds: f64) -> Self {
        let percent_complete = if total_frames == 0 {
            100.0
        } else {
            (current_frame as f64 / total_frames as f64 * 100.0).min(100.0)
        };

        let estimated_remaining_seconds = if current_frame == 0 {
            0.0
        } else {
            let per_frame = elapsed_seconds / current_frame as f64;
            per_frame * total_frames.saturating_sub(current_frame) as f64
        };

        Self {
            current_frame,
            total_frames,
            elapsed_seconds,
            estimated_remaining_seconds,
            percent_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let progress = ScanProgress::after_frame(5, 10, 2.0);
        assert!((progress.percent_complete - 50.0).abs() < 1e-9);

        let done = ScanProgress::after_frame(10, 10, 4.0);
        assert!((done.percent_complete - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_estimate_tracks_frame_rate() {
        // 5 frames took 2 seconds, so 5 more should take ~2 more
        let progress = ScanProgress::after_frame(5, 10, 2.0);
        assert!((progress.estimated_remaining_seconds - 2.0).abs() < 1e-9);

        let done = ScanProgress::after_frame(10, 10, 4.0);
        assert_eq!(done.estimated_remaining_seconds, 0.0);
    }

    #[test]
    fn test_empty_plan_reports_complete() {
        let progress = ScanProgress::after_frame(0, 0, 0.0);
        assert_eq!(progress.percent_complete, 100.0);
        assert_eq!(progress.estimated_remaining_seconds, 0.0);
    }
}
