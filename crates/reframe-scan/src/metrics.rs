//! Scan metrics.
//!
//! Recorded through the `metrics` facade; installing a recorder/exporter is
//! the host binary's job, so these are no-ops in plain library use.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const SCANS_STARTED_TOTAL: &str = "reframe_scans_started_total";
    pub const SCANS_COMPLETED_TOTAL: &str = "reframe_scans_completed_total";
    pub const SCANS_CANCELLED_TOTAL: &str = "reframe_scans_cancelled_total";
    pub const SCAN_DURATION_SECONDS: &str = "reframe_scan_duration_seconds";
    pub const SCAN_SUBJECTS_KEPT: &str = "reframe_scan_subjects_kept";

    pub const FRAMES_SCANNED_TOTAL: &str = "reframe_frames_scanned_total";
    pub const FRAME_ERRORS_TOTAL: &str = "reframe_frame_errors_total";
    pub const DETECTIONS_TOTAL: &str = "reframe_detections_total";
}

/// Record a scan starting.
pub fn record_scan_started() {
    counter!(names::SCANS_STARTED_TOTAL).increment(1);
}

/// Record a scan finishing, cancelled or not.
pub fn record_scan_finished(cancelled: bool, duration_secs: f64, subjects_kept: usize) {
    if cancelled {
        counter!(names::SCANS_CANCELLED_TOTAL).increment(1);
    } else {
        counter!(names::SCANS_COMPLETED_TOTAL).increment(1);
    }
    histogram!(names::SCAN_DURATION_SECONDS).record(duration_secs);
    histogram!(names::SCAN_SUBJECTS_KEPT).record(subjects_kept as f64);
}

/// Record one processed frame.
pub fn record_frame_scanned() {
    counter!(names::FRAMES_SCANNED_TOTAL).increment(1);
}

/// Record a contained per-frame failure, labeled by pipeline stage.
pub fn record_frame_error(stage: &str) {
    let labels = [("stage", stage.to_string())];
    counter!(names::FRAME_ERRORS_TOTAL, &labels).increment(1);
}

/// Record detections kept after filtering, labeled by detector.
pub fn record_detections(detector: &str, count: usize) {
    let labels = [("detector", detector.to_string())];
    counter!(names::DETECTIONS_TOTAL, &labels).increment(count as u64);
}
