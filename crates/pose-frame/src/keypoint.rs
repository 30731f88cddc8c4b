//! Keypoint and skeleton index definitions

use serde::{Deserialize, Serialize};

/// Number of keypoints in every pose (COCO layout)
pub const KEYPOINT_COUNT: usize = 17;

/// COCO keypoint indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    /// All indices in skeleton order
    pub const ALL: [KeypointIndex; KEYPOINT_COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Position in the keypoint array
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Single detected keypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// X coordinate (normalized 0-1 in batch mode, pixels before normalization)
    pub x: f64,
    /// Y coordinate, growing downward
    pub y: f64,
    /// Detector confidence (0-1); an unscored keypoint counts as undetected
    #[serde(default)]
    pub score: f64,
}

impl Keypoint {
    /// Create a new keypoint
    pub fn new(x: f64, y: f64, score: f64) -> Self {
        Self { x, y, score }
    }

    /// Whether all fields are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.score.is_finite()
    }
}
