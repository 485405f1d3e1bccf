//! Shared data models for the Reframe scan engine.
//!
//! This crate provides Serde-serializable types for:
//! - Bounding boxes and overlap geometry
//! - Per-frame detections and tracked subjects
//! - Scan configuration, presets and validation
//! - Scan progress reporting
//! - Focus regions consumed by the reformatting pipeline

pub mod detection;
pub mod focus;
pub mod options;
pub mod progress;
pub mod rect;
pub mod subject;

// Re-export common types
pub use detection::Detection;
pub use focus::FocusRegion;
pub use options::{OptionsError, ScanOptions, TimeSegment};
pub use progress::ScanProgress;
pub use rect::BoundingBox;
pub use subject::{Position, Subject};
