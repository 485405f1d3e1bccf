//! Detection boundary.
//!
//! Wraps the external object classifier with a uniform interface. The
//! engine never loads models itself; rate limiting and result caching are
//! the caller's concern, not this trait's.

use async_trait::async_trait;

use reframe_models::Detection;

use crate::error::ScanResult;
use crate::source::CapturedFrame;

/// Object detector producing `(label, box, score)` triples per frame.
#[async_trait]
pub trait Detector: Send {
    /// Load models ahead of the first `detect` call.
    ///
    /// Idempotent; cheap after the first invocation. The scanner calls this
    /// before timing starts so per-frame timing reflects inference only,
    /// not cold-start.
    async fn warm_up(&mut self) -> ScanResult<()>;

    /// Detect objects in a captured frame.
    ///
    /// Errors are recoverable per call; the scan loop treats a failed frame
    /// as having zero detections.
    async fn detect(&mut self, frame: &CapturedFrame) -> ScanResult<Vec<Detection>>;

    /// Detector name for logging and metrics.
    fn name(&self) -> &'static str;
}
