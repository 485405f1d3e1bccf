//! Frame sampling strategy.
//!
//! Chooses which timestamps to inspect instead of decoding every frame.
//! The hard cap bounds worst-case scan cost regardless of video length or
//! interval choice, trading temporal resolution for latency.

use reframe_models::TimeSegment;

/// Build the ordered timestamp plan for one scan.
///
/// With segments, emits `start + k * interval` while the value stays within
/// each segment (inclusive end), concatenated in segment order. Without
/// segments, emits `k * interval` while strictly below `duration`. Plans
/// longer than `max_samples` are uniformly downsampled, preserving the
/// original ascending order.
///
/// A non-positive `duration` or `interval` (or a zero cap) yields an empty
/// plan; the scanner short-circuits that to a successful empty result.
pub fn sample_timestamps(
    duration: f64,
    segments: &[TimeSegment],
    interval: f64,
    max_samples: usize,
) -> Vec<f64> {
    if interval <= 0.0 || max_samples == 0 {
        return Vec::new();
    }

    let mut times = Vec::new();

    if segments.is_empty() {
        if duration <= 0.0 {
            return Vec::new();
        }
        let mut step = 0u64;
        loop {
            let t = step as f64 * interval;
            if t >= duration {
                break;
            }
            times.push(t);
            step += 1;
        }
    } else {
        for segment in segments {
            let mut step = 0u64;
            loop {
                let t = segment.start + step as f64 * interval;
                if t > segment.end {
                    break;
                }
                times.push(t);
                step += 1;
            }
        }
    }

    if times.len() > max_samples {
        times = (0..max_samples)
            .map(|i| times[i * times.len() / max_samples])
            .collect();
    }

    times
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_plan() {
        let times = sample_timestamps(10.0, &[], 2.0, 100);
        assert_eq!(times, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_duration_is_exclusive() {
        let times = sample_timestamps(10.0, &[], 5.0, 100);
        assert_eq!(times, vec![0.0, 5.0]);
    }

    #[test]
    fn test_cap_downsamples_uniformly() {
        let times = sample_timestamps(100.0, &[], 1.0, 5);

        assert_eq!(times.len(), 5);
        assert_eq!(times[0], 0.0);
        for pair in times.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // Every kept timestamp comes from the uncapped 100-element sequence
        for t in &times {
            assert_eq!(t.fract(), 0.0);
            assert!(*t < 100.0);
        }
    }

    #[test]
    fn test_segments_concatenate_in_order() {
        let segments = vec![TimeSegment::new(10.0, 12.0), TimeSegment::new(30.0, 31.0)];
        let times = sample_timestamps(60.0, &segments, 1.0, 100);
        assert_eq!(times, vec![10.0, 11.0, 12.0, 30.0, 31.0]);
    }

    #[test]
    fn test_segment_end_is_inclusive() {
        let segments = vec![TimeSegment::new(0.0, 4.0)];
        let times = sample_timestamps(60.0, &segments, 2.0, 100);
        assert_eq!(times, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_plan() {
        assert!(sample_timestamps(0.0, &[], 1.0, 10).is_empty());
        assert!(sample_timestamps(-5.0, &[], 1.0, 10).is_empty());
        assert!(sample_timestamps(10.0, &[], 0.0, 10).is_empty());
        assert!(sample_timestamps(10.0, &[], -1.0, 10).is_empty());
        assert!(sample_timestamps(10.0, &[], 1.0, 0).is_empty());
    }

    #[test]
    fn test_plan_shorter_than_cap_is_untouched() {
        let times = sample_timestamps(3.0, &[], 1.0, 15);
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }
}
