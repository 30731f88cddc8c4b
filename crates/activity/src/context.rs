//! Per-frame evaluation context

use kinematics::Angle;
use pose_frame::{KeypointIndex as K, Pose};

use crate::phase::Phase;

/// Angles precomputed once per frame and shared with evaluators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleCache {
    pub left_knee: Angle,
    pub right_knee: Angle,
    pub torso_lean: Angle,
}

impl AngleCache {
    /// Compute left/right knee angles and torso lean for a pose
    pub fn from_pose(pose: &Pose, min_score: f64) -> Self {
        Self {
            left_knee: Angle::joint(&pose[K::LeftHip], &pose[K::LeftKnee], &pose[K::LeftAnkle], min_score),
            right_knee: Angle::joint(
                &pose[K::RightHip],
                &pose[K::RightKnee],
                &pose[K::RightAnkle],
                min_score,
            ),
            torso_lean: Angle::torso(
                &pose[K::LeftShoulder],
                &pose[K::RightShoulder],
                &pose[K::LeftHip],
                &pose[K::RightHip],
                min_score,
            ),
        }
    }

    /// Mean of both knee angles
    pub fn avg_knee(&self) -> Angle {
        self.left_knee.mean(self.right_knee)
    }
}

/// Inputs to a single-frame evaluation beyond the frame itself
#[derive(Debug, Clone, PartialEq)]
pub struct EvalContext {
    pub phase: Phase,
    /// Standing reference for heel-lift measurement
    pub baseline_heel_y: f64,
    pub frame_index: usize,
    pub bottom_index: usize,
    pub angle_cache: Option<AngleCache>,
    /// Keypoints scoring below this make dependent angles indeterminate
    pub min_keypoint_score: f64,
}

impl EvalContext {
    pub fn new(phase: Phase, baseline_heel_y: f64) -> Self {
        Self {
            phase,
            baseline_heel_y,
            frame_index: 0,
            bottom_index: 0,
            angle_cache: None,
            min_keypoint_score: 0.0,
        }
    }

    pub fn with_indices(mut self, frame_index: usize, bottom_index: usize) -> Self {
        self.frame_index = frame_index;
        self.bottom_index = bottom_index;
        self
    }

    pub fn with_angle_cache(mut self, cache: AngleCache) -> Self {
        self.angle_cache = Some(cache);
        self
    }

    pub fn with_min_keypoint_score(mut self, min_score: f64) -> Self {
        self.min_keypoint_score = min_score;
        self
    }

    /// Cached angles, or freshly computed ones when no cache was supplied
    pub fn angles(&self, pose: &Pose) -> AngleCache {
        self.angle_cache
            .unwrap_or_else(|| AngleCache::from_pose(pose, self.min_keypoint_score))
    }
}
