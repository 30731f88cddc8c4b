//! Deviation Grading
//!
//! Maps continuous deviations onto discrete severity levels and merges
//! overlapping severities with a "worse wins" rule.

mod deviation;
mod severity;

pub use deviation::{distance_to_range, grade_deviation, Grade, Tolerance};
pub use severity::{pick_worse_severity, Severity, SeverityMap};
