//! Hold-last-good stabilization for low-confidence keypoints

use pose_frame::Pose;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Stabilizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Keypoints scoring below this are replaced from the previous pose
    pub min_confidence: f64,
    /// Confidence multiplier applied to a substituted keypoint
    pub decay: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.12,
            decay: 0.9,
        }
    }
}

/// Replace low-confidence keypoints with the previous pose's keypoint.
///
/// A keypoint is substituted only when the previous pose holds a usable
/// keypoint at the same index; its confidence is decayed so repeated holds
/// eventually fall below the threshold. High-confidence keypoints are never
/// touched and no motion is extrapolated.
pub fn stabilize(pose: &Pose, prev: Option<&Pose>, config: &StabilizerConfig) -> Pose {
    let mut next = *pose;
    let Some(prev) = prev else {
        return next;
    };

    for (kp, held) in next.keypoints.iter_mut().zip(prev.keypoints.iter()) {
        if kp.score >= config.min_confidence || held.score < config.min_confidence {
            continue;
        }
        kp.x = held.x;
        kp.y = held.y;
        kp.score = held.score * config.decay;
    }
    next
}

/// Stateful stabilizer that remembers the last stabilized pose
#[derive(Debug, Clone, Default)]
pub struct PoseStabilizer {
    config: StabilizerConfig,
    previous: Option<Pose>,
}

impl PoseStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    /// Stabilize a pose against the last output and remember the result
    pub fn filter(&mut self, pose: &Pose) -> Pose {
        let next = stabilize(pose, self.previous.as_ref(), &self.config);
        trace!("Stabilized pose (had previous: {})", self.previous.is_some());
        self.previous = Some(next);
        next
    }

    /// Last stabilized pose
    pub fn previous(&self) -> Option<&Pose> {
        self.previous.as_ref()
    }

    /// Reset the stabilizer
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_frame::{Keypoint, KeypointIndex};
    use proptest::prelude::*;

    fn pose_with(score: f64, x: f64) -> Pose {
        let mut pose = Pose::default();
        for kp in pose.keypoints.iter_mut() {
            *kp = Keypoint::new(x, x, score);
        }
        pose
    }

    #[test]
    fn test_low_confidence_is_replaced() {
        let prev = pose_with(0.8, 0.2);
        let mut current = pose_with(0.9, 0.5);
        current[KeypointIndex::LeftKnee] = Keypoint::new(0.9, 0.9, 0.05);

        let out = stabilize(&current, Some(&prev), &StabilizerConfig::default());
        let knee = out[KeypointIndex::LeftKnee];
        assert_eq!((knee.x, knee.y), (0.2, 0.2));
        assert!((knee.score - 0.72).abs() < 1e-12);
        assert_eq!(out[KeypointIndex::RightKnee].x, 0.5);
    }

    #[test]
    fn test_unscored_keypoint_is_held() {
        let prev = pose_with(0.8, 0.2);
        let mut current = pose_with(0.9, 0.5);
        current[KeypointIndex::RightAnkle] = serde_json::from_str(r#"{"x":0.9,"y":0.9}"#).unwrap();

        let out = stabilize(&current, Some(&prev), &StabilizerConfig::default());
        let ankle = out[KeypointIndex::RightAnkle];
        assert_eq!((ankle.x, ankle.y), (0.2, 0.2));
        assert!((ankle.score - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_unusable_previous_passes_through() {
        let prev = pose_with(0.1, 0.2);
        let current = pose_with(0.05, 0.5);
        let out = stabilize(&current, Some(&prev), &StabilizerConfig::default());
        assert_eq!(out, current);
        assert_eq!(stabilize(&current, None, &StabilizerConfig::default()), current);
    }

    #[test]
    fn test_repeated_holds_decay_below_threshold() {
        let mut stabilizer = PoseStabilizer::default();
        stabilizer.filter(&pose_with(0.15, 0.3));

        let missing = pose_with(0.0, 0.9);
        let first = stabilizer.filter(&missing);
        assert!((first[KeypointIndex::Nose].score - 0.135).abs() < 1e-12);
        assert_eq!(first[KeypointIndex::Nose].x, 0.3);

        let second = stabilizer.filter(&missing);
        assert!((second[KeypointIndex::Nose].score - 0.1215).abs() < 1e-12);

        // third hold decays below the threshold, so the fourth passes through
        let third = stabilizer.filter(&missing);
        assert!(third[KeypointIndex::Nose].score < 0.12);
        let fourth = stabilizer.filter(&missing);
        assert_eq!(fourth[KeypointIndex::Nose].x, 0.9);
    }

    proptest! {
        #[test]
        fn prop_confident_keypoints_unchanged(
            score in 0.12f64..=1.0,
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            px in 0.0f64..1.0,
            pscore in 0.0f64..=1.0,
        ) {
            let mut current = pose_with(score, 0.5);
            current[KeypointIndex::LeftHip] = Keypoint::new(x, y, score);
            let prev = pose_with(pscore, px);
            let out = stabilize(&current, Some(&prev), &StabilizerConfig::default());
            prop_assert_eq!(out[KeypointIndex::LeftHip], current[KeypointIndex::LeftHip]);
        }
    }
}
