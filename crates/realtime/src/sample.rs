//! Realtime sample output

use std::collections::BTreeMap;

use activity::Phase;
use grading::{pick_worse_severity, Severity};
use pose_frame::KeypointIndex;
use serde::{Deserialize, Serialize};

use crate::cues::CoachingCue;

/// Aggregate status per body region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStatus {
    pub knee: Severity,
    pub hip: Severity,
    pub back: Severity,
}

impl RegionStatus {
    pub fn levels(&self) -> [Severity; 3] {
        [self.knee, self.hip, self.back]
    }

    /// Share of regions graded good, warnings counting half
    pub fn ratio_good(&self) -> f64 {
        let levels = self.levels();
        levels.iter().map(|s| s.credit()).sum::<f64>() / levels.len() as f64
    }

    pub fn any_bad(&self) -> bool {
        self.levels().contains(&Severity::Bad)
    }

    /// Knee region merges two checks into the worse level
    pub(crate) fn knee_of(knee: Option<Severity>, track: Option<Severity>) -> Severity {
        pick_worse_severity(knee.unwrap_or_default(), track.unwrap_or_default())
    }
}

/// Live display values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveMetrics {
    /// Average knee angle (degrees)
    pub knee: Option<f64>,
    /// Left shoulder-hip-knee angle (degrees)
    pub hip: Option<f64>,
    /// Torso lean from vertical (degrees)
    pub back: Option<f64>,
    /// Horizontal gap between the wrists
    pub path: f64,
    /// Hip offset from frame centre, in thousandths
    pub timing: i64,
    /// Hip offset from frame centre, in percent with one decimal
    pub balance: f64,
}

/// Result of one realtime evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSample {
    pub pose_detected: bool,
    /// Absent when no pose was detected
    pub phase: Option<Phase>,
    pub metrics: LiveMetrics,
    pub status: RegionStatus,
    pub joint_severity: BTreeMap<KeypointIndex, Severity>,
    pub frame_error: f64,
    pub reasons: Vec<String>,
    pub feedback: String,
    pub cue: Option<CoachingCue>,
    /// Whether `cue` differs from the previous logged cue
    pub new_cue: bool,
    pub confidence: f64,
    pub reps: u32,
    pub baseline_heel_y: Option<f64>,
}
