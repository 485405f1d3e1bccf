//! Subject scanning and tracking engine.
//!
//! Repeatedly asks an external detector to find objects in sampled frames
//! and stitches the per-frame detections into persistent subjects, which
//! downstream code converts into crop/focus metadata for reformatting
//! video to other aspect ratios.
//!
//! # Architecture
//!
//! ```text
//!  duration / segments
//!         │
//!         ▼
//! ┌─────────────────┐
//! │  Frame Sampler  │ ← bounded timestamp plan
//! └────────┬────────┘
//!          │ for each timestamp
//!          ▼
//! ┌─────────────────┐
//! │  Frame Source   │ ← seek + capture (external adapter)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │    Detector     │ ← (label, box, score) triples (external adapter)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Subject Tracker │ ← greedy IoU identity association
//! └────────┬────────┘
//!          ▼
//!   subjects ──► focus regions
//! ```
//!
//! Frames are processed strictly in ascending timestamp order, one at a
//! time: the frame source is a single shared playback resource. Per-frame
//! failures are contained; cancellation is cooperative and yields a
//! partial but valid result.

pub mod detect;
pub mod error;
pub mod focus;
pub mod metrics;
pub mod sampler;
pub mod scanner;
pub mod source;
pub mod tracker;

pub use detect::Detector;
pub use error::{ScanError, ScanResult};
pub use focus::subjects_to_focus_regions;
pub use sampler::sample_timestamps;
pub use scanner::{keep_strongest, ScannerConfig, VideoScanner};
pub use source::{CapturedFrame, FrameSource};
pub use tracker::SubjectTracker;
