//! Wire types exchanged with the remote analysis service

use activity::ActivityKey;
use kinematics::Timeline;
use pose_frame::{Frame, Keypoint};
use serde::{Deserialize, Serialize};

/// Detector output for one frame, in source pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub timestamp: f64,
    /// At least 17 keypoints; extra detector points are dropped
    pub keypoints: Vec<Keypoint>,
}

/// Clip submitted for remote analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// `auto`, `squat` or `cricket_cover_drive`
    pub activity_hint: String,
    pub fps: f64,
    pub frames: Vec<Frame>,
}

impl AnalysisRequest {
    pub fn new(key: ActivityKey, fps: f64, frames: Vec<Frame>) -> Self {
        Self {
            activity_hint: key.backend_hint().to_string(),
            fps,
            frames,
        }
    }
}

/// Whole-body mechanics estimated remotely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biomechanics {
    pub force_estimate_n: Option<f64>,
    pub torque_estimate_nm: Option<f64>,
    pub momentum_estimate: Option<f64>,
    pub power_estimate_w: Option<f64>,
    /// Lateral hip sway
    pub balance_index: Option<f64>,
    pub stability_score: Option<f64>,
}

/// One sample of the remote kinematics stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicSample {
    pub timestamp: f64,
    pub knee_angle: f64,
    pub trunk_angle: f64,
    pub hip_y: f64,
    pub hip_velocity: f64,
    pub hip_acceleration: f64,
}

/// Remote analysis result; fields this engine does not consume are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    /// Activity label as classified remotely
    pub activity: String,
    /// Authoritative session score in [0, 100]
    pub overall_score: f64,
    pub biomechanics: Biomechanics,
    pub timeline: Timeline,
    pub feedback: Vec<String>,
    pub coaching_explanations: Vec<String>,
    pub kinematics_stream: Vec<KinematicSample>,
}

impl AnalysisResponse {
    /// Timeline signal by name, empty when absent
    pub fn series(&self, name: &str) -> &[f64] {
        self.timeline.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_hint() {
        let request = AnalysisRequest::new(ActivityKey::Bowling, 30.0, Vec::new());
        assert_eq!(request.activity_hint, "auto");
        let request = AnalysisRequest::new(ActivityKey::CoverDrive, 30.0, Vec::new());
        assert_eq!(request.activity_hint, "cricket_cover_drive");
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let json = r#"{
            "activity": "squat",
            "overall_score": 82.5,
            "metrics": [{"name": "knee", "value": 1.0}],
            "biomechanics": {"balance_index": 0.03, "power_estimate_w": 410.2},
            "timeline": {"avg_knee": [90.0, 95.0, 100.0]},
            "feedback": ["Adjust stance width"],
            "coaching_explanations": [],
            "kinematics_stream": [{"timestamp": 0.0, "knee_angle": 90.0}],
            "cricket_shot": null
        }"#;
        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.biomechanics.balance_index, Some(0.03));
        assert_eq!(response.series("avg_knee").len(), 3);
        assert!(response.series("trunk").is_empty());
        assert_eq!(response.kinematics_stream[0].knee_angle, 90.0);
    }
}
