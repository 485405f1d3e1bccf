//! Greedy IoU tracker stitching per-frame detections into subjects.
//!
//! Matching is per-detection, in detection order, against the best
//! available open subject. Detections in one frame compete: a subject
//! claimed by an earlier detection is unavailable to later ones, which then
//! open new subjects. No global assignment is attempted.

use tracing::debug;

use reframe_models::{Detection, Position, Subject};

/// Identity-association state carried across frames.
///
/// The open set keeps insertion order so IoU ties resolve to the
/// earliest-created subject, making associations deterministic.
pub struct SubjectTracker {
    /// IoU floor for a detection to join an existing subject
    iou_threshold: f64,
    /// Seconds a subject may go unobserved and still accept a match
    max_time_gap: f64,
    /// Open subjects in creation order
    subjects: Vec<Subject>,
}

impl SubjectTracker {
    /// Create a new tracker.
    pub fn new(iou_threshold: f64, max_time_gap: f64) -> Self {
        Self {
            iou_threshold,
            max_time_gap,
            subjects: Vec::new(),
        }
    }

    /// Fold one frame's filtered detections into the open set.
    ///
    /// Detections must already be score-filtered and count-capped by the
    /// caller. Subjects are never merged or removed here; two same-label
    /// subjects stay distinct tracks once diverged.
    pub fn observe(&mut self, detections: &[Detection], time: f64) {
        // Only subjects that existed before this frame are match candidates,
        // and each can be claimed by at most one detection per frame.
        let existing = self.subjects.len();
        let mut claimed = vec![false; existing];

        for detection in detections {
            let mut best: Option<(usize, f64)> = None;

            for (idx, subject) in self.subjects[..existing].iter().enumerate() {
                if claimed[idx] || subject.label != detection.label {
                    continue;
                }
                if time - subject.last_seen > self.max_time_gap {
                    continue;
                }
                let Some(last) = subject.last_position() else {
                    continue;
                };

                let iou = detection.bbox.iou(&last.bbox);
                if iou < self.iou_threshold {
                    continue;
                }
                // Strict improvement keeps the earliest-created subject on ties
                if best.map_or(true, |(_, best_iou)| iou > best_iou) {
                    best = Some((idx, iou));
                }
            }

            let position = Position::new(time, detection.bbox, detection.score);
            match best {
                Some((idx, iou)) => {
                    debug!(
                        subject_id = %self.subjects[idx].id,
                        label = %detection.label,
                        iou,
                        time,
                        "matched detection to open subject"
                    );
                    claimed[idx] = true;
                    self.subjects[idx].observe(position);
                }
                None => {
                    let subject = Subject::new(detection.label.clone(), position);
                    debug!(subject_id = %subject.id, label = %subject.label, time, "opened new subject");
                    self.subjects.push(subject);
                }
            }
        }
    }

    /// The in-progress subject set, in creation order.
    pub fn open_subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Consume the tracker, keeping subjects seen often enough.
    pub fn finish(self, min_detections: usize) -> Vec<Subject> {
        self.subjects
            .into_iter()
            .filter(|s| s.observation_count() >= min_detections)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reframe_models::BoundingBox;

    fn det(label: &str, x: f64, y: f64, score: f64) -> Detection {
        Detection::new(label, BoundingBox::new(x, y, 10.0, 10.0), score)
    }

    #[test]
    fn test_overlapping_detections_join_one_subject() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        tracker.observe(&[det("person", 1.0, 1.0, 0.8)], 1.0);

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].observation_count(), 2);
        assert_eq!(subjects[0].first_seen, 0.0);
        assert_eq!(subjects[0].last_seen, 1.0);
    }

    #[test]
    fn test_labels_never_mix() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        tracker.observe(&[det("dog", 1.0, 1.0, 0.8)], 1.0);

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 2);
        assert!(subjects.iter().all(|s| s.observation_count() == 1));
    }

    #[test]
    fn test_time_gap_splits_reappearances() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        // Identical box, but far beyond the allowed gap
        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 6.5);

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 2);
    }

    #[test]
    fn test_low_iou_opens_new_subject() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        tracker.observe(&[det("person", 8.0, 8.0, 0.9)], 1.0);

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 2);
    }

    #[test]
    fn test_same_frame_detections_compete() {
        let mut tracker = SubjectTracker::new(0.3, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        // Both overlap the open subject; the first one in order claims it
        tracker.observe(
            &[det("person", 1.0, 1.0, 0.9), det("person", 2.0, 2.0, 0.8)],
            1.0,
        );

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].observation_count(), 2);
        assert_eq!(subjects[0].last_position().unwrap().bbox.x, 1.0);
        assert_eq!(subjects[1].observation_count(), 1);
    }

    #[test]
    fn test_best_iou_wins_over_first_candidate() {
        // Threshold low enough that both open subjects qualify
        let mut tracker = SubjectTracker::new(0.05, 5.0);

        // Two open subjects, the second much closer to the next detection
        tracker.observe(
            &[det("person", 0.0, 0.0, 0.9), det("person", 6.0, 6.0, 0.9)],
            0.0,
        );
        tracker.observe(&[det("person", 6.0, 6.0, 0.9)], 1.0);

        let subjects = tracker.finish(1);
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].observation_count(), 1);
        assert_eq!(subjects[1].observation_count(), 2);
    }

    #[test]
    fn test_iou_tie_keeps_earliest_subject() {
        let mut tracker = SubjectTracker::new(0.1, 5.0);

        // Two identical open subjects; a tie must go to the first created
        tracker.observe(
            &[det("person", 0.0, 0.0, 0.9), det("person", 0.0, 0.0, 0.9)],
            0.0,
        );
        tracker.observe(&[det("person", 1.0, 1.0, 0.9)], 1.0);

        let subjects = tracker.finish(1);
        assert_eq!(subjects[0].observation_count(), 2);
        assert_eq!(subjects[1].observation_count(), 1);
    }

    #[test]
    fn test_open_subjects_exposes_in_progress_set() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);
        assert!(tracker.open_subjects().is_empty());

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        assert_eq!(tracker.open_subjects().len(), 1);
        assert_eq!(tracker.open_subjects()[0].label, "person");
    }

    #[test]
    fn test_finish_filters_sparse_subjects() {
        let mut tracker = SubjectTracker::new(0.5, 5.0);

        tracker.observe(&[det("person", 0.0, 0.0, 0.9)], 0.0);
        tracker.observe(&[det("person", 1.0, 1.0, 0.9), det("cat", 50.0, 50.0, 0.9)], 1.0);
        tracker.observe(&[det("person", 2.0, 2.0, 0.9)], 2.0);

        let subjects = tracker.finish(2);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].label, "person");
        assert_eq!(subjects[0].observation_count(), 3);
    }
}
