//! Local batch report

use activity::{ActivityKind, Phase};
use kinematics::{KinematicSeries, Timeline};
use pose_frame::Frame;
use serde::{Deserialize, Serialize};

use crate::aggregates::{consistency, expected_variation, normalized_consistency, worst_frame};
use crate::feedback::{build_feedback_cards, FeedbackCard};
use crate::preprocess::EnrichedFrame;
use crate::remote::AnalysisResponse;

/// Everything the timeline view needs for one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Registry key the clip was graded with
    pub activity: String,
    pub frames: Vec<EnrichedFrame>,
    pub worst_index: usize,
    pub worst_phase: Option<Phase>,
    /// Kinematic signals computed locally from the raw frames
    pub timeline: Timeline,
    /// Consistency of the local knee-angle signal
    pub local_consistency: f64,
    /// Knee-angle consistency scaled by the activity's expected spread
    pub normalized_consistency: f64,
    /// Lateral hip sway over the raw frames
    pub balance_index: f64,
    pub cards: Vec<FeedbackCard>,
}

impl BatchReport {
    /// Assemble a report from graded frames; `raw` feeds the local timeline
    pub fn new(
        kind: ActivityKind,
        raw: &[Frame],
        frames: Vec<EnrichedFrame>,
        remote: Option<&AnalysisResponse>,
    ) -> Self {
        let series = KinematicSeries::from_frames(raw);
        let worst = worst_frame(&frames);
        let worst_entry = frames.get(worst);
        let worst_phase = worst_entry.map(|f| f.phase);
        let cards = match remote {
            Some(response) => build_feedback_cards(response, worst_entry),
            None => build_feedback_cards(&AnalysisResponse::default(), worst_entry),
        };

        Self {
            activity: kind.key().to_string(),
            worst_phase,
            worst_index: worst,
            timeline: series.timeline(),
            local_consistency: consistency(&series.avg_knee),
            normalized_consistency: normalized_consistency(&series.avg_knee, expected_variation(kind)),
            balance_index: series.balance_index(),
            cards,
            frames,
        }
    }

    /// Worst graded frame, if any
    pub fn worst(&self) -> Option<&EnrichedFrame> {
        self.frames.get(self.worst_index)
    }
}
