//! Subject to focus-region conversion.
//!
//! The last step before subjects leave the engine: each subject collapses
//! to one time-ranged, frame-relative region built from its averaged
//! bounding box. The reformatting pipeline consumes these to place crops.

use reframe_models::{FocusRegion, Subject};

/// Convert scan results into focus regions.
///
/// Pure: the same subjects always produce the same regions. Spatial fields
/// are percentages of the given frame dimensions; zero dimensions yield an
/// empty list rather than dividing by zero.
pub fn subjects_to_focus_regions(
    subjects: &[Subject],
    frame_width: u32,
    frame_height: u32,
) -> Vec<FocusRegion> {
    if frame_width == 0 || frame_height == 0 {
        return Vec::new();
    }

    let fw = frame_width as f64;
    let fh = frame_height as f64;

    subjects
        .iter()
        .filter_map(|subject| {
            let bbox = subject.mean_bbox()?;
            Some(FocusRegion {
                time_start: subject.first_seen,
                time_end: subject.last_seen,
                center_x_percent: bbox.cx() / fw * 100.0,
                center_y_percent: bbox.cy() / fh * 100.0,
                width_percent: bbox.width / fw * 100.0,
                height_percent: bbox.height / fh * 100.0,
                label: format!("{} ({:.0}%)", subject.label, subject.mean_score() * 100.0),
            })
        })
        .collect()
}
