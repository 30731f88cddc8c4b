//! Worst frame and session-level aggregates

use activity::ActivityKind;
use kinematics::StatisticalFeatures;
use serde::{Deserialize, Serialize};

use crate::preprocess::EnrichedFrame;

/// Minimum samples for a meaningful consistency score
const MIN_CONSISTENCY_SAMPLES: usize = 3;

/// Index of the first maximum; 0 for an empty slice
pub fn worst_index(errors: &[f64]) -> usize {
    let mut worst = 0;
    let mut worst_error = f64::NEG_INFINITY;
    for (i, error) in errors.iter().enumerate() {
        if *error > worst_error {
            worst_error = *error;
            worst = i;
        }
    }
    worst
}

/// Index of the frame with the highest frame error
pub fn worst_frame(frames: &[EnrichedFrame]) -> usize {
    let errors: Vec<f64> = frames.iter().map(|f| f.frame_error).collect();
    worst_index(&errors)
}

/// `100 - pstdev(series)` clamped to [0, 100]; 0 below three samples.
///
/// Standard deviation in the series' own unit (degrees for knee angles)
/// maps one-to-one onto score points.
pub fn consistency(series: &[f64]) -> f64 {
    if series.len() < MIN_CONSISTENCY_SAMPLES {
        return 0.0;
    }
    (100.0 - StatisticalFeatures::pstdev(series)).clamp(0.0, 100.0)
}

/// Consistency with the deviation scaled by an expected spread.
///
/// Scores 100 for a perfectly steady series and 50 when the deviation
/// equals `expected_std`. A non-positive `expected_std` falls back to
/// [`consistency`].
pub fn normalized_consistency(series: &[f64], expected_std: f64) -> f64 {
    if series.len() < MIN_CONSISTENCY_SAMPLES {
        return 0.0;
    }
    if expected_std <= 0.0 || !expected_std.is_finite() {
        return consistency(series);
    }
    let ratio = StatisticalFeatures::pstdev(series) / expected_std;
    (100.0 / (1.0 + ratio)).clamp(0.0, 100.0)
}

/// Typical knee-angle spread (degrees) within one activity clip
pub fn expected_variation(kind: ActivityKind) -> f64 {
    match kind {
        ActivityKind::Squat => 20.0,
        ActivityKind::Pushup => 15.0,
        ActivityKind::CoverDrive => 10.0,
        ActivityKind::Bowling => 12.0,
    }
}

/// Injury-risk band for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Classify session risk; a low score dominates any balance value
pub fn risk(overall_score: f64, balance_index: f64) -> RiskLevel {
    if overall_score < 60.0 || balance_index > 0.06 {
        RiskLevel::High
    } else if overall_score < 80.0 || balance_index > 0.04 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
