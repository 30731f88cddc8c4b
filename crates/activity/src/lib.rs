//! Activity Evaluators
//!
//! Per-activity grading of single frames:
//! - Whole-sequence phase detection
//! - Frame metrics, graded checks and joint severities
//! - Weighted frame error and human-readable reasons
//! - Read-only registry with alias resolution

pub mod bowling;
pub mod context;
pub mod cover_drive;
pub mod evaluator;
pub mod key;
pub mod phase;
pub mod pushup;
pub mod registry;
pub mod result;
pub mod squat;

pub use bowling::BowlingEvaluator;
pub use context::{AngleCache, EvalContext};
pub use cover_drive::CoverDriveEvaluator;
pub use evaluator::ActivityEvaluator;
pub use key::ActivityKey;
pub use phase::{Phase, PhaseDetection};
pub use pushup::PushupEvaluator;
pub use registry::{ActivityKind, ActivityRegistry};
pub use result::{Check, EvaluationResult, Metric};
pub use squat::{SquatEvaluator, SquatThresholds};

use thiserror::Error;

/// Activity error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActivityError {
    #[error("Unknown activity key: {0}")]
    UnknownKey(String),
}
