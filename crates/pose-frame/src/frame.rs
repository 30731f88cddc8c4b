//! Pose and frame types

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::keypoint::{Keypoint, KeypointIndex, KEYPOINT_COUNT};
use crate::FrameError;

/// Fixed 17-keypoint skeleton
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl Pose {
    /// Wrap a keypoint array
    pub fn new(keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Midpoint between two keypoints
    pub fn midpoint(&self, a: KeypointIndex, b: KeypointIndex) -> (f64, f64) {
        let (a, b) = (self[a], self[b]);
        ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Mean Y of both hips
    pub fn hip_y(&self) -> f64 {
        self.midpoint(KeypointIndex::LeftHip, KeypointIndex::RightHip).1
    }

    /// Mean Y of both ankles
    pub fn heel_y(&self) -> f64 {
        self.midpoint(KeypointIndex::LeftAnkle, KeypointIndex::RightAnkle).1
    }

    /// Iterate keypoints with their index
    pub fn iter(&self) -> impl Iterator<Item = (KeypointIndex, &Keypoint)> {
        KeypointIndex::ALL.iter().copied().zip(self.keypoints.iter())
    }
}

impl Index<KeypointIndex> for Pose {
    type Output = Keypoint;

    fn index(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[index.index()]
    }
}

impl IndexMut<KeypointIndex> for Pose {
    fn index_mut(&mut self, index: KeypointIndex) -> &mut Keypoint {
        &mut self.keypoints[index.index()]
    }
}

/// Timestamped pose captured from the upstream estimator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds from start of capture, non-decreasing within a sequence
    pub timestamp: f64,
    /// The 17 keypoints of this frame
    pub keypoints: Pose,
}

impl Frame {
    /// Create a new frame
    pub fn new(timestamp: f64, keypoints: Pose) -> Self {
        Self { timestamp, keypoints }
    }

    /// Borrow the pose
    pub fn pose(&self) -> &Pose {
        &self.keypoints
    }
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Normalize raw pixel-space keypoints against the source frame size.
///
/// Only the first 17 keypoints are kept. Coordinates and scores are rounded
/// to 6 decimal places, matching what the capture side sends for analysis.
pub fn normalize_keypoints(raw: &[Keypoint], width: f64, height: f64) -> Result<Pose, FrameError> {
    if !width.is_finite() || !height.is_finite() {
        return Err(FrameError::InvalidDimensions { width, height });
    }
    if raw.len() < KEYPOINT_COUNT {
        return Err(FrameError::KeypointCount(raw.len()));
    }

    let w = width.max(1.0);
    let h = height.max(1.0);
    let mut pose = Pose::default();
    for (slot, kp) in pose.keypoints.iter_mut().zip(raw.iter()) {
        *slot = Keypoint {
            x: round6(kp.x / w),
            y: round6(kp.y / h),
            score: round6(kp.score),
        };
    }
    Ok(pose)
}
