use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rect::BoundingBox;

/// One object reported by the detector for a single frame.
///
/// Detections are ephemeral: the scan loop filters them, feeds them to the
/// tracker and drops them before the next frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// Detector class label (e.g. "person", "dog")
    pub label: String,
    /// Bounding box in source-bitmap pixels
    pub bbox: BoundingBox,
    /// Detector confidence (0.0-1.0)
    pub score: f64,
}

impl Detection {
    /// Create a new detection.
    pub fn new(label: impl Into<String>, bbox: BoundingBox, score: f64) -> Self {
        Self {
            label: label.into(),
            bbox,
            score,
        }
    }
}
