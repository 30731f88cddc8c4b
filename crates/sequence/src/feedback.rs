//! Feedback cards for the session report

use serde::{Deserialize, Serialize};

use crate::preprocess::EnrichedFrame;
use crate::remote::AnalysisResponse;

/// Most cards shown at once
pub const MAX_FEEDBACK_CARDS: usize = 6;

/// Card urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSeverity {
    Low,
    Medium,
    High,
}

/// One coaching message with its urgency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCard {
    pub msg: String,
    pub severity: CardSeverity,
}

impl FeedbackCard {
    pub fn new(msg: impl Into<String>, severity: CardSeverity) -> Self {
        Self {
            msg: msg.into(),
            severity,
        }
    }
}

/// Keyword-based urgency of a remote feedback line
pub fn classify_feedback(msg: &str) -> CardSeverity {
    let low = msg.to_lowercase();
    if ["off", "late", "deviat"].iter().any(|k| low.contains(k)) {
        CardSeverity::High
    } else if ["adjust", "focus"].iter().any(|k| low.contains(k)) {
        CardSeverity::Medium
    } else {
        CardSeverity::Low
    }
}

/// Cards from remote feedback and coaching explanations, led by the worst
/// local frame's headline reason when it has one
pub fn build_feedback_cards(response: &AnalysisResponse, worst: Option<&EnrichedFrame>) -> Vec<FeedbackCard> {
    let mut cards = Vec::new();

    if let Some(frame) = worst {
        if let Some(reason) = frame.reasons.first() {
            cards.push(FeedbackCard::new(
                format!("Worst frame at {:.2}s: {}", frame.timestamp, reason),
                CardSeverity::High,
            ));
        }
    }

    cards.extend(
        response
            .feedback
            .iter()
            .map(|f| FeedbackCard::new(f.clone(), classify_feedback(f))),
    );
    cards.extend(
        response
            .coaching_explanations
            .iter()
            .map(|f| FeedbackCard::new(f.clone(), CardSeverity::Medium)),
    );

    cards.truncate(MAX_FEEDBACK_CARDS);
    cards
}
