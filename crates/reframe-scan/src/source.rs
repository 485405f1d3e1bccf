//! Frame acquisition boundary.
//!
//! The frame source represents a single shared video/canvas resource: it
//! can only be positioned at one timestamp at a time, which is why the scan
//! loop is strictly sequential. Implementations wrap whatever playback or
//! decoding stack the host provides.

use async_trait::async_trait;
use image::RgbImage;

use crate::error::ScanResult;

/// A bitmap captured from the source, tagged with its playback time.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Playback position the frame was captured at, in seconds
    pub time: f64,
    /// Decoded frame pixels
    pub image: RgbImage,
}

impl CapturedFrame {
    /// Create a new captured frame.
    pub fn new(time: f64, image: RgbImage) -> Self {
        Self { time, image }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Positions the video source and captures ready-to-inspect bitmaps.
///
/// The scanner owns the source exclusively for the duration of one scan and
/// seeks it back to its prior position afterwards, so no mutated playback
/// state leaks into the surrounding player. All waits are bounded by the
/// scanner, not by implementations.
#[async_trait]
pub trait FrameSource: Send {
    /// Resolve once the source can be sought and captured.
    ///
    /// The scanner bounds this wait with its startup timeout; a source that
    /// never becomes ready fails the scan before the first frame.
    async fn wait_until_ready(&mut self) -> ScanResult<()>;

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Seek the source to the given timestamp.
    async fn seek(&mut self, time: f64) -> ScanResult<()>;

    /// Capture the frame at the current position.
    async fn capture(&mut self) -> ScanResult<CapturedFrame>;
}
