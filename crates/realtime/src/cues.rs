//! Coaching cues for live display

use activity::{ActivityKind, Phase};
use serde::{Deserialize, Serialize};

use crate::sample::LiveMetrics;

/// Tone of a coaching cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    Error,
    Warning,
    Tip,
    Success,
    Info,
}

/// One coaching message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingCue {
    pub msg: String,
    pub kind: CueKind,
}

impl CoachingCue {
    fn new(msg: &str, kind: CueKind) -> Self {
        Self {
            msg: msg.to_string(),
            kind,
        }
    }
}

pub(crate) const DEFAULT_CUE: &str = "Movement detected. Maintain controlled tempo.";

/// Highest-priority cue for the current sample
pub fn technical_advice(kind: ActivityKind, metrics: &LiveMetrics, phase: Phase) -> CoachingCue {
    let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);
    let below = |value: Option<f64>, limit: f64| value.is_some_and(|v| v < limit);

    match kind {
        ActivityKind::Squat => {
            if metrics.path > 0.15 {
                return CoachingCue::new("Careful! Your knees are caving in. Drive them outward.", CueKind::Error);
            }
            if above(metrics.back, 50.0) {
                return CoachingCue::new("Keep your chest up! Avoid leaning too far forward.", CueKind::Warning);
            }
            if phase == Phase::Bottom && above(metrics.knee, 105.0) {
                return CoachingCue::new("Try to sink a bit deeper to engage your glutes fully.", CueKind::Tip);
            }
            if metrics.balance > 8.0 {
                return CoachingCue::new("Balance shifting too much. Center your weight.", CueKind::Warning);
            }
            match phase {
                Phase::Ascent => CoachingCue::new("Explode upwards! Keep the momentum.", CueKind::Success),
                Phase::Bottom => CoachingCue::new("Hold and drive! Good control.", CueKind::Success),
                _ => CoachingCue::new(DEFAULT_CUE, CueKind::Info),
            }
        }
        ActivityKind::CoverDrive => {
            if below(metrics.knee, 110.0) {
                CoachingCue::new("Lean more into the ball; bend that front knee further.", CueKind::Tip)
            } else {
                CoachingCue::new("Smooth swing path. Keep your eyes on the target.", CueKind::Success)
            }
        }
        ActivityKind::Bowling => {
            if above(metrics.back, 45.0) {
                CoachingCue::new("High trunk lean. Ensure your follow-through is smooth.", CueKind::Warning)
            } else {
                CoachingCue::new("Vibrant delivery stride. Maintain arm speed.", CueKind::Success)
            }
        }
        ActivityKind::Pushup => {
            // live metrics carry no elbow angle; the knee stands in for body line
            if above(metrics.knee, 120.0) {
                CoachingCue::new("Lower your chest closer to the floor for better engagement.", CueKind::Tip)
            } else {
                CoachingCue::new("Solid core. Keep your body in a straight line.", CueKind::Success)
            }
        }
    }
}
