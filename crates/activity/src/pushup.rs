//! Push-up evaluator

use grading::Tolerance;
use kinematics::Angle;
use pose_frame::{Frame, KeypointIndex as K};

use crate::context::EvalContext;
use crate::evaluator::{grade_angle, single_angle_result, ActivityEvaluator};
use crate::phase::Phase;
use crate::result::{Check, EvaluationResult, Metric};

const ELBOW_RANGE: (f64, f64) = (70.0, 110.0);
const ELBOW_TOLERANCE: Tolerance = Tolerance::new(0.0, 15.0);

const KEY_JOINTS: [K; 8] = [
    K::LeftShoulder,
    K::RightShoulder,
    K::LeftElbow,
    K::RightElbow,
    K::LeftHip,
    K::RightHip,
    K::LeftKnee,
    K::RightKnee,
];

/// Elbow-angle check on the left arm, reported on both elbows
#[derive(Debug, Clone, Copy, Default)]
pub struct PushupEvaluator;

impl ActivityEvaluator for PushupEvaluator {
    fn name(&self) -> &'static str {
        "pushup"
    }

    fn key_joints(&self) -> &'static [K] {
        &KEY_JOINTS
    }

    fn default_phase(&self) -> Phase {
        Phase::Work
    }

    fn evaluate_frame(&self, frame: &Frame, ctx: &EvalContext) -> EvaluationResult {
        let p = frame.pose();
        let elbow = Angle::joint(
            &p[K::LeftShoulder],
            &p[K::LeftElbow],
            &p[K::LeftWrist],
            ctx.min_keypoint_score,
        );
        let grade = grade_angle(elbow, ELBOW_RANGE, ELBOW_TOLERANCE);
        single_angle_result(
            Metric::ElbowAngle,
            Check::ElbowGrade,
            elbow,
            grade,
            &[K::LeftElbow, K::RightElbow],
            "Elbow angle",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grading::{Grade, Severity};
    use pose_frame::{Keypoint, Pose};

    fn arm(elbow_deg: f64) -> Frame {
        let mut pose = Pose::default();
        for kp in pose.keypoints.iter_mut() {
            *kp = Keypoint::new(0.5, 0.5, 0.9);
        }
        let theta = elbow_deg.to_radians();
        pose[K::LeftElbow] = Keypoint::new(0.5, 0.5, 0.9);
        pose[K::LeftShoulder] = Keypoint::new(0.7, 0.5, 0.9);
        pose[K::LeftWrist] = Keypoint::new(0.5 + 0.2 * theta.cos(), 0.5 + 0.2 * theta.sin(), 0.9);
        Frame::new(0.0, pose)
    }

    #[test]
    fn test_elbow_in_range() {
        let result = PushupEvaluator.evaluate_frame(&arm(90.0), &EvalContext::new(Phase::Work, 0.0));
        assert_eq!(result.check(Check::ElbowGrade), Some(Grade::GOOD));
        assert!(result.is_clean());
        assert_eq!(result.joint_severity[&K::RightElbow], Severity::Good);
    }

    #[test]
    fn test_locked_out_elbow() {
        let result = PushupEvaluator.evaluate_frame(&arm(170.0), &EvalContext::new(Phase::Work, 0.0));
        assert_eq!(result.check(Check::ElbowGrade), Some(Grade::BAD));
        assert_eq!(result.frame_error, 4.0);
        assert_eq!(result.reasons, vec!["Elbow angle 170.0°"]);
    }

    #[test]
    fn test_constant_phase() {
        let frames = vec![arm(90.0); 4];
        let detection = PushupEvaluator.detect_phases(&frames);
        assert_eq!(detection.phases, vec![Phase::Work; 4]);
        assert_eq!(detection.bottom_idx, 0);
    }
}
