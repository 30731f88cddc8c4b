//! Batch engine configuration

use pose_filter::{ValidationConfig, DEFAULT_SMOOTHING_CARRY};
use serde::{Deserialize, Serialize};

/// Batch preprocessing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight of the previous raw frame in the low-pass blend
    pub smoothing_carry: f64,

    /// Leading frames averaged for the standing heel reference
    pub baseline_window: usize,

    /// Keypoints scoring below this make dependent angles indeterminate
    pub min_keypoint_score: f64,

    /// Boundary checks applied before any grading
    pub validation: ValidationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_carry: DEFAULT_SMOOTHING_CARRY,
            baseline_window: 10,
            min_keypoint_score: 0.0,
            validation: ValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Normalized coordinates only, and no angles from weak keypoints
    pub fn strict() -> Self {
        Self {
            min_keypoint_score: 0.3,
            validation: ValidationConfig::normalized(),
            ..Default::default()
        }
    }

    /// No smoothing; grades raw detector output
    pub fn unsmoothed() -> Self {
        Self {
            smoothing_carry: 0.0,
            ..Default::default()
        }
    }
}
