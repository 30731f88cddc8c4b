//! Cricket cover-drive evaluator

use grading::Tolerance;
use kinematics::Angle;
use pose_frame::{Frame, KeypointIndex as K};

use crate::context::EvalContext;
use crate::evaluator::{grade_angle, single_angle_result, ActivityEvaluator};
use crate::phase::Phase;
use crate::result::{Check, EvaluationResult, Metric};

const FRONT_KNEE_RANGE: (f64, f64) = (110.0, 150.0);
const FRONT_KNEE_TOLERANCE: Tolerance = Tolerance::new(0.0, 15.0);

const KEY_JOINTS: [K; 8] = [
    K::LeftHip,
    K::RightHip,
    K::LeftKnee,
    K::RightKnee,
    K::LeftShoulder,
    K::RightShoulder,
    K::LeftWrist,
    K::RightWrist,
];

/// Front-knee bend check shared by every batting shot
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverDriveEvaluator;

impl ActivityEvaluator for CoverDriveEvaluator {
    fn name(&self) -> &'static str {
        "coverDrive"
    }

    fn key_joints(&self) -> &'static [K] {
        &KEY_JOINTS
    }

    fn default_phase(&self) -> Phase {
        Phase::Swing
    }

    fn evaluate_frame(&self, frame: &Frame, ctx: &EvalContext) -> EvaluationResult {
        let p = frame.pose();
        // front knee is the left hip-knee-ankle chain, the same angle the cache holds
        let front_knee = ctx.angle_cache.map(|c| c.left_knee).unwrap_or_else(|| {
            Angle::joint(&p[K::LeftHip], &p[K::LeftKnee], &p[K::LeftAnkle], ctx.min_keypoint_score)
        });
        let grade = grade_angle(front_knee, FRONT_KNEE_RANGE, FRONT_KNEE_TOLERANCE);
        single_angle_result(
            Metric::FrontKnee,
            Check::FrontKneeGrade,
            front_knee,
            grade,
            &[K::LeftKnee, K::LeftAnkle],
            "Front knee",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squat::tests::deep_squat;
    use grading::Grade;

    #[test]
    fn test_deep_bend_flagged() {
        // deep squat puts the front knee at 90°, 20° under the range
        let result = CoverDriveEvaluator.evaluate_frame(&deep_squat(0.0), &EvalContext::new(Phase::Swing, 0.0));
        assert_eq!(result.check(Check::FrontKneeGrade), Some(Grade::BAD));
        assert_eq!(result.reasons, vec!["Front knee 90.0°"]);
        assert_eq!(result.joint_severity.len(), 2);
    }

    #[test]
    fn test_uses_cached_left_knee() {
        let cache = crate::context::AngleCache {
            left_knee: Angle::Measured(130.0),
            right_knee: Angle::Measured(60.0),
            torso_lean: Angle::Measured(10.0),
        };
        let ctx = EvalContext::new(Phase::Swing, 0.0).with_angle_cache(cache);
        let result = CoverDriveEvaluator.evaluate_frame(&deep_squat(0.0), &ctx);
        assert!(result.is_clean());
        assert_eq!(result.metric(Metric::FrontKnee), Some(130.0));
    }
}
