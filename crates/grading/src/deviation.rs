//! Deviation measurement and three-way grading

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Graded check: discrete level plus numeric penalty (0, 1 or 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub level: Severity,
    pub score: u8,
}

impl Grade {
    pub const GOOD: Grade = Grade {
        level: Severity::Good,
        score: 0,
    };
    pub const WARNING: Grade = Grade {
        level: Severity::Warning,
        score: 1,
    };
    pub const BAD: Grade = Grade {
        level: Severity::Bad,
        score: 2,
    };

    /// Grade for a check whose input could not be measured
    pub fn indeterminate() -> Self {
        Self {
            level: Severity::Neutral,
            score: 0,
        }
    }

    pub fn is_good(&self) -> bool {
        self.level == Severity::Good
    }

    /// Warning or bad
    pub fn is_flagged(&self) -> bool {
        matches!(self.level, Severity::Warning | Severity::Bad)
    }

    /// Penalty as a float for weighted sums
    pub fn penalty(&self) -> f64 {
        f64::from(self.score)
    }
}

/// Pair of grading thresholds; `good < warning` is a caller precondition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub good: f64,
    pub warning: f64,
}

impl Tolerance {
    pub const fn new(good: f64, warning: f64) -> Self {
        Self { good, warning }
    }

    /// Grade a deviation against these thresholds
    pub fn grade(&self, deviation: f64) -> Grade {
        grade_deviation(deviation, self.good, self.warning)
    }
}

/// Gap between `value` and `[lo, hi]`, zero inside the range
pub fn distance_to_range(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo - value
    } else if value > hi {
        value - hi
    } else {
        0.0
    }
}

/// Map a deviation onto good / warning / bad
pub fn grade_deviation(deviation: f64, good_threshold: f64, warning_threshold: f64) -> Grade {
    if deviation <= good_threshold {
        Grade::GOOD
    } else if deviation <= warning_threshold {
        Grade::WARNING
    } else {
        Grade::BAD
    }
}
