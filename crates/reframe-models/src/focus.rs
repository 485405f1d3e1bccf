use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A time-ranged, frame-relative region of interest.
///
/// Derived from a subject's averaged bounding box; drives crop placement
/// when the video is reformatted to another aspect ratio. All spatial
/// fields are percentages of the source frame (0.0-100.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FocusRegion {
    /// Start of the covered time range in seconds
    pub time_start: f64,
    /// End of the covered time range in seconds
    pub time_end: f64,
    /// Region center x as a percentage of frame width
    pub center_x_percent: f64,
    /// Region center y as a percentage of frame height
    pub center_y_percent: f64,
    /// Region width as a percentage of frame width
    pub width_percent: f64,
    /// Region height as a percentage of frame height
    pub height_percent: f64,
    /// Human-readable label combining class and mean confidence
    pub label: String,
}
