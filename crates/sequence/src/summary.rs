//! Session summary derived from a remote analysis

use chrono::{DateTime, Utc};
use kinematics::Timeline;
use serde::{Deserialize, Serialize};

use crate::aggregates::{consistency, risk, RiskLevel};
use crate::remote::AnalysisResponse;

/// Headline numbers for one analysed clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub activity: String,
    /// Remote score rounded to one decimal
    pub overall_score: f64,
    /// Knee-angle consistency rounded to one decimal
    pub consistency: f64,
    pub risk: RiskLevel,
    /// Estimated power in watts, rounded to a whole number
    pub power_w: f64,
    pub timeline: Timeline,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn from_remote(response: &AnalysisResponse) -> Self {
        let balance = response.biomechanics.balance_index.unwrap_or(0.0);
        let power = response.biomechanics.power_estimate_w.unwrap_or(0.0);
        Self {
            activity: response.activity.clone(),
            overall_score: round1(response.overall_score),
            consistency: round1(consistency(response.series("avg_knee"))),
            risk: risk(response.overall_score, balance),
            power_w: power.round(),
            timeline: response.timeline.clone(),
            created_at: Utc::now(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
