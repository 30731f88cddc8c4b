//! Per-frame kinematic series

use std::collections::BTreeMap;

use pose_frame::{Frame, KeypointIndex as K};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::joint_angle;
use crate::statistics::StatisticalFeatures;

/// Named timeline signals, keyed like `avg_knee` or `hip_velocity`
pub type Timeline = BTreeMap<String, Vec<f64>>;

/// Kinematic signals extracted from a frame sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicSeries {
    pub timestamps: Vec<f64>,
    pub left_knee: Vec<f64>,
    pub right_knee: Vec<f64>,
    pub avg_knee: Vec<f64>,
    /// Shoulder-hip-knee angle on the left side
    pub trunk: Vec<f64>,
    pub hip_x: Vec<f64>,
    pub hip_y: Vec<f64>,
    pub hip_velocity: Vec<f64>,
    pub hip_acceleration: Vec<f64>,
}

impl KinematicSeries {
    /// Extract series from frames
    pub fn from_frames(frames: &[Frame]) -> Self {
        let mut series = Self::default();
        for frame in frames {
            let p = frame.pose();
            let left = joint_angle(&p[K::LeftHip], &p[K::LeftKnee], &p[K::LeftAnkle]);
            let right = joint_angle(&p[K::RightHip], &p[K::RightKnee], &p[K::RightAnkle]);
            let (hip_x, hip_y) = p.midpoint(K::LeftHip, K::RightHip);

            series.timestamps.push(frame.timestamp);
            series.left_knee.push(left);
            series.right_knee.push(right);
            series.avg_knee.push((left + right) / 2.0);
            series
                .trunk
                .push(joint_angle(&p[K::LeftShoulder], &p[K::LeftHip], &p[K::LeftKnee]));
            series.hip_x.push(hip_x);
            series.hip_y.push(hip_y);
        }

        series.hip_velocity = derivative(&series.hip_y, &series.timestamps);
        series.hip_acceleration = derivative(&series.hip_velocity, &series.timestamps);
        debug!("Extracted kinematic series over {} frames", frames.len());
        series
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Lateral hip sway (population std-dev of hip X)
    pub fn balance_index(&self) -> f64 {
        StatisticalFeatures::pstdev(&self.hip_x)
    }

    /// Timeline map in the shape session aggregates consume
    pub fn timeline(&self) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.insert("avg_knee".into(), self.avg_knee.clone());
        timeline.insert("trunk".into(), self.trunk.clone());
        timeline.insert("hip_y".into(), self.hip_y.clone());
        timeline.insert("hip_velocity".into(), self.hip_velocity.clone());
        timeline.insert("hip_acceleration".into(), self.hip_acceleration.clone());
        timeline
    }
}

/// First difference over time, with the first sample fixed at zero
fn derivative(values: &[f64], timestamps: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    out.push(0.0);
    for i in 1..values.len() {
        let dt = (timestamps[i] - timestamps[i - 1]).max(1e-6);
        out.push((values[i] - values[i - 1]) / dt);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_frame::{Keypoint, Pose};

    fn standing(ts: f64, hip_y: f64, hip_x: f64) -> Frame {
        let mut pose = Pose::default();
        for kp in pose.keypoints.iter_mut() {
            *kp = Keypoint::new(0.5, 0.5, 1.0);
        }
        pose[K::LeftShoulder] = Keypoint::new(hip_x - 0.05, hip_y - 0.3, 1.0);
        pose[K::LeftHip] = Keypoint::new(hip_x - 0.05, hip_y, 1.0);
        pose[K::RightHip] = Keypoint::new(hip_x + 0.05, hip_y, 1.0);
        pose[K::LeftKnee] = Keypoint::new(hip_x - 0.05, hip_y + 0.2, 1.0);
        pose[K::RightKnee] = Keypoint::new(hip_x + 0.05, hip_y + 0.2, 1.0);
        pose[K::LeftAnkle] = Keypoint::new(hip_x - 0.05, hip_y + 0.4, 1.0);
        pose[K::RightAnkle] = Keypoint::new(hip_x + 0.05, hip_y + 0.4, 1.0);
        Frame::new(ts, pose)
    }

    #[test]
    fn test_straight_legs() {
        let series = KinematicSeries::from_frames(&[standing(0.0, 0.5, 0.5)]);
        assert!((series.avg_knee[0] - 180.0).abs() < 1e-9);
        assert!((series.trunk[0] - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_hip_velocity() {
        let frames = [
            standing(0.0, 0.50, 0.5),
            standing(0.1, 0.52, 0.5),
            standing(0.2, 0.56, 0.5),
        ];
        let series = KinematicSeries::from_frames(&frames);
        assert_eq!(series.hip_velocity[0], 0.0);
        assert!((series.hip_velocity[1] - 0.2).abs() < 1e-9);
        assert!((series.hip_velocity[2] - 0.4).abs() < 1e-9);
        assert!((series.hip_acceleration[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_is_floored() {
        let frames = [standing(0.0, 0.5, 0.5), standing(0.0, 0.5, 0.5)];
        let series = KinematicSeries::from_frames(&frames);
        assert!(series.hip_velocity.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_balance_index() {
        let frames = [standing(0.0, 0.5, 0.48), standing(0.1, 0.5, 0.52)];
        let series = KinematicSeries::from_frames(&frames);
        assert!((series.balance_index() - 0.02).abs() < 1e-9);
        assert_eq!(KinematicSeries::default().balance_index(), 0.0);
    }

    #[test]
    fn test_timeline_keys() {
        let series = KinematicSeries::from_frames(&[standing(0.0, 0.5, 0.5)]);
        let timeline = series.timeline();
        assert!(timeline.contains_key("avg_knee"));
        assert!(timeline.contains_key("hip_velocity"));
        assert_eq!(timeline["avg_knee"].len(), 1);
    }
}
