//! Scan orchestration.
//!
//! Drives the full scan: sample plan, per-frame acquisition and detection,
//! identity tracking, progress emission, cancellation and the final
//! minimum-detections filter. One frame is fully processed before the next
//! begins; the frame source is a single shared playback resource that
//! cannot be sought to two timestamps at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{timeout, Instant};
use tracing::{info, warn};

use reframe_models::{Detection, ScanOptions, ScanProgress, Subject};

use crate::detect::Detector;
use crate::error::{ScanError, ScanResult};
use crate::metrics;
use crate::sampler::sample_timestamps;
use crate::source::FrameSource;
use crate::tracker::SubjectTracker;

/// Engine-level timing knobs, distinct from per-scan [`ScanOptions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Overall wait for the frame source to become ready before the loop
    pub startup_timeout: Duration,
    /// Seek wait for the first frame (decoder pipelines are slow to prime)
    pub first_seek_timeout: Duration,
    /// Seek wait for every later frame
    pub seek_timeout: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            startup_timeout: Duration::from_secs(10),
            first_seek_timeout: Duration::from_secs(3),
            seek_timeout: Duration::from_millis(500),
        }
    }
}

/// Drop detections below the score floor, keep the strongest first, cap the
/// count per frame.
///
/// The sort is stable, so equal scores keep detector order and the tracker
/// sees a deterministic sequence.
pub fn keep_strongest(
    mut detections: Vec<Detection>,
    min_score: f64,
    max_per_frame: usize,
) -> Vec<Detection> {
    detections.retain(|d| d.score >= min_score);
    detections.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    detections.truncate(max_per_frame);
    detections
}

/// Scans a video for persistent subjects.
///
/// Owns all mutable scan state per instance, so independent scanners can
/// run against independent sources concurrently. A single instance enforces
/// reject-new semantics: a second `scan` while one is running fails with
/// [`ScanError::ScanInProgress`] instead of queueing or aborting the first.
pub struct VideoScanner {
    config: ScannerConfig,
    source: Mutex<Option<Box<dyn FrameSource>>>,
    detector: Mutex<Option<Box<dyn Detector>>>,
    running: AtomicBool,
    cancel_requested: AtomicBool,
}

impl Default for VideoScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl VideoScanner {
    /// Create a new scanner with the given timing configuration.
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            source: Mutex::new(None),
            detector: Mutex::new(None),
            running: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
        }
    }

    /// Bind the frame acquisition adapter. Rejected while a scan is running.
    pub async fn attach_source(&self, source: impl FrameSource + 'static) -> ScanResult<()> {
        if self.is_running() {
            return Err(ScanError::ScanInProgress);
        }
        *self.source.lock().await = Some(Box::new(source));
        Ok(())
    }

    /// Bind the detection adapter. Rejected while a scan is running.
    pub async fn attach_detector(&self, detector: impl Detector + 'static) -> ScanResult<()> {
        if self.is_running() {
            return Err(ScanError::ScanInProgress);
        }
        *self.detector.lock().await = Some(Box::new(detector));
        Ok(())
    }

    /// Whether a scan is currently running on this instance.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Request cooperative cancellation of the running scan.
    ///
    /// Checked once per frame boundary: the loop stops before the next
    /// frame, not mid-frame, and the scan still returns the subjects built
    /// so far. No-op when no scan is running.
    pub fn cancel(&self) {
        if self.is_running() {
            self.cancel_requested.store(true, Ordering::Release);
        }
    }

    /// Scan `[0, duration)` (or the configured segments) for subjects.
    ///
    /// `on_progress` is invoked once per processed frame, in order.
    /// Cancellation yields a partial but valid result set, not an error.
    pub async fn scan<F>(
        &self,
        duration: f64,
        options: &ScanOptions,
        on_progress: F,
    ) -> ScanResult<Vec<Subject>>
    where
        F: Fn(ScanProgress) + Send + Sync,
    {
        // Reject-new, keep-running: the loser returns immediately without
        // touching the adapters the winner holds.
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScanError::ScanInProgress);
        }
        self.cancel_requested.store(false, Ordering::Release);

        let result = self.run(duration, options, &on_progress).await;
        self.running.store(false, Ordering::Release);
        result
    }

    async fn run(
        &self,
        duration: f64,
        options: &ScanOptions,
        on_progress: &(dyn Fn(ScanProgress) + Send + Sync),
    ) -> ScanResult<Vec<Subject>> {
        options.validate()?;

        let mut source_slot = self.source.lock().await;
        let mut detector_slot = self.detector.lock().await;
        let (source, detector) = match (source_slot.as_mut(), detector_slot.as_mut()) {
            (Some(source), Some(detector)) => (source.as_mut(), detector.as_mut()),
            _ => return Err(ScanError::NotInitialized),
        };

        info!(duration, detector = detector.name(), "starting subject scan");
        metrics::record_scan_started();

        // Cold-start before timing so per-frame numbers reflect inference
        // only. Warm-up failure is not fatal: detect errors degrade to
        // empty frames anyway.
        if let Err(e) = detector.warm_up().await {
            warn!(detector = detector.name(), error = %e, "detector warm-up failed; scanning anyway");
        }

        match timeout(self.config.startup_timeout, source.wait_until_ready()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(ScanError::AcquisitionTimeout(self.config.startup_timeout)),
        }

        let plan = sample_timestamps(
            duration,
            &options.segments,
            options.interval,
            options.max_samples,
        );
        if plan.is_empty() {
            info!(duration, interval = options.interval, "empty sample plan, nothing to scan");
            return Ok(Vec::new());
        }

        let resume_position = source.position();
        let total = plan.len();
        let mut tracker = SubjectTracker::new(
            options.similarity_threshold,
            options.max_time_gap_for_match,
        );
        let started = Instant::now();
        let mut cancelled = false;

        for (index, &time) in plan.iter().enumerate() {
            if self.cancel_requested.load(Ordering::Acquire) {
                info!(processed = index, total, "scan cancelled at frame boundary");
                cancelled = true;
                break;
            }

            let detections =
                Self::inspect_frame(&self.config, source, detector, time, index == 0, options)
                    .await;
            metrics::record_frame_scanned();
            metrics::record_detections(detector.name(), detections.len());
            tracker.observe(&detections, time);

            on_progress(ScanProgress::after_frame(
                index + 1,
                total,
                started.elapsed().as_secs_f64(),
            ));

            // Keep a host UI thread responsive during long scans
            tokio::task::yield_now().await;
        }

        let subjects = tracker.finish(options.min_detections);

        // Hand the source back where the surrounding playback left it,
        // on completion and cancellation alike.
        if let Err(e) = source.seek(resume_position).await {
            warn!(position = resume_position, error = %e, "failed to restore source position");
        }

        metrics::record_scan_finished(cancelled, started.elapsed().as_secs_f64(), subjects.len());
        info!(
            subjects = subjects.len(),
            cancelled,
            elapsed = started.elapsed().as_secs_f64(),
            "subject scan finished"
        );
        Ok(subjects)
    }

    /// Seek, capture and detect for one timestamp.
    ///
    /// Every failure in here is per-frame: it is logged, counted, and the
    /// frame contributes zero detections. A single bad seek must not fail
    /// the batch.
    async fn inspect_frame(
        config: &ScannerConfig,
        source: &mut dyn FrameSource,
        detector: &mut dyn Detector,
        time: f64,
        first_frame: bool,
        options: &ScanOptions,
    ) -> Vec<Detection> {
        let seek_timeout = if first_frame {
            config.first_seek_timeout
        } else {
            config.seek_timeout
        };

        match timeout(seek_timeout, source.seek(time)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(time, error = %e, "seek failed; capturing current frame instead");
                metrics::record_frame_error("seek");
            }
            Err(_) => {
                warn!(time, ?seek_timeout, "seek timed out; capturing current frame instead");
                metrics::record_frame_error("seek");
            }
        }

        let frame = match source.capture().await {
            Ok(frame) => frame,
            Err(e) => {
                warn!(time, error = %e, "frame capture failed; skipping frame");
                metrics::record_frame_error("capture");
                return Vec::new();
            }
        };

        let detections = match detector.detect(&frame).await {
            Ok(detections) => detections,
            Err(e) => {
                warn!(
                    time,
                    detector = detector.name(),
                    error = %e,
                    "detection failed; treating frame as empty"
                );
                metrics::record_frame_error("detect");
                Vec::new()
            }
        };

        keep_strongest(detections, options.min_score, options.max_objects_per_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reframe_models::BoundingBox;

    fn det(score: f64, x: f64) -> Detection {
        Detection::new("person", BoundingBox::new(x, 0.0, 10.0, 10.0), score)
    }

    #[test]
    fn test_keep_strongest_filters_and_sorts() {
        let kept = keep_strongest(vec![det(0.4, 0.0), det(0.9, 1.0), det(0.7, 2.0)], 0.5, 10);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 0.9);
        assert_eq!(kept[1].score, 0.7);
    }

    #[test]
    fn test_keep_strongest_caps_per_frame() {
        let kept = keep_strongest(
            vec![det(0.9, 0.0), det(0.8, 1.0), det(0.7, 2.0)],
            0.0,
            2,
        );

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].score, 0.8);
    }

    #[test]
    fn test_keep_strongest_is_stable_on_ties() {
        let kept = keep_strongest(vec![det(0.8, 1.0), det(0.8, 2.0)], 0.0, 10);
        assert_eq!(kept[0].bbox.x, 1.0);
        assert_eq!(kept[1].bbox.x, 2.0);
    }

    #[test]
    fn test_score_floor_is_inclusive() {
        let kept = keep_strongest(vec![det(0.5, 0.0)], 0.5, 10);
        assert_eq!(kept.len(), 1);
    }
}
