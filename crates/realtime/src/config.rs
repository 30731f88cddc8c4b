//! Realtime evaluator configuration

use pose_filter::StabilizerConfig;
use pose_frame::DEFAULT_CAPTURE_CAPACITY;
use serde::{Deserialize, Serialize};

/// Realtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Frames kept in each session's capture buffer
    pub capture_capacity: usize,

    /// Hip-Y change ignored when inferring squat direction
    pub phase_deadband: f64,

    /// Average knee angle treated as the bottom of a squat (degrees)
    pub bottom_knee_range: (f64, f64),

    /// Weight of the previous confidence in the moving average
    pub confidence_carry: f64,

    /// A rep counts when the knee goes from above `rep_top_knee`
    /// to below `rep_bottom_knee` between consecutive samples
    pub rep_top_knee: f64,
    pub rep_bottom_knee: f64,

    /// Samples kept per trend line
    pub trend_length: usize,

    /// Coaching messages kept per session
    pub coaching_log_length: usize,

    /// Keypoints scoring below this make dependent angles indeterminate
    pub min_keypoint_score: f64,

    pub stabilizer: StabilizerConfig,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            capture_capacity: DEFAULT_CAPTURE_CAPACITY,
            phase_deadband: 0.002,
            bottom_knee_range: (80.0, 100.0),
            confidence_carry: 0.75,
            rep_top_knee: 125.0,
            rep_bottom_knee: 95.0,
            trend_length: 25,
            coaching_log_length: 30,
            min_keypoint_score: 0.0,
            stabilizer: StabilizerConfig::default(),
        }
    }
}

impl RealtimeConfig {
    /// Faster-reacting confidence for short clips
    pub fn responsive() -> Self {
        Self {
            confidence_carry: 0.5,
            ..Default::default()
        }
    }

    /// Heavier smoothing and stricter keypoint confidence
    pub fn steady() -> Self {
        Self {
            confidence_carry: 0.9,
            phase_deadband: 0.004,
            min_keypoint_score: 0.3,
            ..Default::default()
        }
    }
}
