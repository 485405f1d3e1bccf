use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rect::BoundingBox;

/// One timestamped observation of a subject.
///
/// Immutable once appended to a subject's position list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Timestamp in seconds
    pub time: f64,
    /// Observed bounding box
    pub bbox: BoundingBox,
    /// Detector confidence for this observation (0.0-1.0)
    pub score: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(time: f64, bbox: BoundingBox, score: f64) -> Self {
        Self { time, bbox, score }
    }
}

/// A physical object tracked across sampled frames.
///
/// Subjects live for the duration of one scan. `first_seen` and `last_seen`
/// are derived from the position list and maintained on every append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Subject {
    /// Opaque identifier, unique per scan
    pub id: String,
    /// Detector class label shared by all observations
    pub label: String,
    /// Observations in time-ascending order
    pub positions: Vec<Position>,
    /// Earliest observation time in seconds
    pub first_seen: f64,
    /// Latest observation time in seconds
    pub last_seen: f64,
}

impl Subject {
    /// Create a subject from its first observation.
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            first_seen: position.time,
            last_seen: position.time,
            positions: vec![position],
        }
    }

    /// Append an observation, keeping the derived time bounds consistent.
    pub fn observe(&mut self, position: Position) {
        self.first_seen = self.first_seen.min(position.time);
        self.last_seen = self.last_seen.max(position.time);
        self.positions.push(position);
    }

    /// Number of observations.
    pub fn observation_count(&self) -> usize {
        self.positions.len()
    }

    /// Seconds between the first and last observation.
    pub fn duration(&self) -> f64 {
        self.last_seen - self.first_seen
    }

    /// Most recent observation, if any.
    pub fn last_position(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// Arithmetic mean of the observed boxes, component-wise.
    pub fn mean_bbox(&self) -> Option<BoundingBox> {
        if self.positions.is_empty() {
            return None;
        }

        let n = self.positions.len() as f64;
        let mut x = 0.0;
        let mut y = 0.0;
        let mut width = 0.0;
        let mut height = 0.0;

        for p in &self.positions {
            x += p.bbox.x;
            y += p.bbox.y;
            width += p.bbox.width;
            height += p.bbox.height;
        }

        Some(BoundingBox::new(x / n, y / n, width / n, height / n))
    }

    /// Mean detector confidence across all observations.
    pub fn mean_score(&self) -> f64 {
        if self.positions.is_empty() {
            return 0.0;
        }
        self.positions.iter().map(|p| p.score).sum::<f64>() / self.positions.len() as f64
    }
}
