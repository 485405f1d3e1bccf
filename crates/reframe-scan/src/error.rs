//! Error types for scan operations.

use std::time::Duration;
use thiserror::Error;

use reframe_models::OptionsError;

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while scanning a video for subjects.
///
/// Only setup and startup failures ever reach the caller. Per-frame
/// failures (seek timeouts, capture and detection errors) are contained by
/// the scan loop: the frame contributes nothing and the scan continues.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("frame source or detector not attached")]
    NotInitialized,

    #[error("a scan is already running on this scanner")]
    ScanInProgress,

    #[error("invalid scan options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("frame source not ready after {0:?}")]
    AcquisitionTimeout(Duration),

    #[error("seek to {time:.3}s timed out after {timeout:?}")]
    SeekTimeout { time: f64, timeout: Duration },

    #[error("frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("detection failed: {0}")]
    DetectionFailed(String),

    #[error("frame source error: {0}")]
    Source(String),
}

impl ScanError {
    /// Create a capture failure error.
    pub fn capture_failed(message: impl Into<String>) -> Self {
        Self::CaptureFailed(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a frame source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Whether the scan loop may swallow this error and move to the next
    /// frame.
    pub fn is_per_frame(&self) -> bool {
        matches!(
            self,
            ScanError::SeekTimeout { .. }
                | ScanError::CaptureFailed(_)
                | ScanError::DetectionFailed(_)
                | ScanError::Source(_)
        )
    }
}
