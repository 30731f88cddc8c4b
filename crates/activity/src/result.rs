//! Frame evaluation output

use std::collections::BTreeMap;

use grading::{Grade, Severity};
use pose_frame::KeypointIndex;
use serde::{Deserialize, Serialize};

/// Named graded check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Check {
    KneeGrade,
    DepthGrade,
    TorsoGrade,
    TrackGrade,
    HeelGrade,
    ElbowGrade,
    FrontKneeGrade,
    TrunkGrade,
}

/// Named frame metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    KneeAngle,
    HipDepthDelta,
    TorsoLean,
    KneeTracking,
    HeelLift,
    ElbowAngle,
    FrontKnee,
    TrunkLean,
}

/// Graded result for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Measured values; angles that could not be measured are absent
    pub metrics: BTreeMap<Metric, f64>,
    pub checks: BTreeMap<Check, Grade>,
    /// Worst level of every check touching each joint
    pub joint_severity: BTreeMap<KeypointIndex, Severity>,
    /// Weighted sum of check penalties
    pub frame_error: f64,
    /// Non-good checks in priority order
    pub reasons: Vec<String>,
}

impl EvaluationResult {
    /// No penalties and nothing to report
    pub fn is_clean(&self) -> bool {
        self.frame_error == 0.0 && self.reasons.is_empty()
    }

    /// Grade for a check, if the activity runs it
    pub fn check(&self, check: Check) -> Option<Grade> {
        self.checks.get(&check).copied()
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }

    /// First reason, used as the headline for a frame
    pub fn headline(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}
