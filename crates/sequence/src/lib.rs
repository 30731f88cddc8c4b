//! Sequence Processing
//!
//! Batch side of the evaluation engine:
//! - Smoothing, phase detection and per-frame grading of a whole clip
//! - Worst-frame location
//! - Session aggregates (consistency, risk) from remote analysis output
//! - Feedback cards for the session report

mod aggregates;
mod config;
mod feedback;
mod preprocess;
mod remote;
mod report;
mod summary;

pub use aggregates::{
    consistency, expected_variation, normalized_consistency, risk, worst_frame, worst_index,
    RiskLevel,
};
pub use config::EngineConfig;
pub use feedback::{build_feedback_cards, classify_feedback, CardSeverity, FeedbackCard, MAX_FEEDBACK_CARDS};
pub use preprocess::{baseline_heel_y, EnrichedFrame, SequencePreprocessor};
pub use remote::{AnalysisRequest, AnalysisResponse, Biomechanics, KinematicSample, RawFrame};
pub use report::BatchReport;
pub use summary::SessionSummary;

use thiserror::Error;

/// Sequence error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    #[error("Invalid frame: {0}")]
    Validation(#[from] pose_filter::ValidationError),

    #[error(transparent)]
    Activity(#[from] activity::ActivityError),
}
