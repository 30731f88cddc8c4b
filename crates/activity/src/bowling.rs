//! Bowling evaluator

use grading::Tolerance;
use kinematics::Angle;
use pose_frame::{Frame, KeypointIndex as K};

use crate::context::EvalContext;
use crate::evaluator::{grade_angle, single_angle_result, ActivityEvaluator};
use crate::phase::Phase;
use crate::result::{Check, EvaluationResult, Metric};

const TRUNK_RANGE: (f64, f64) = (10.0, 40.0);
const TRUNK_TOLERANCE: Tolerance = Tolerance::new(0.0, 12.0);

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

/// Trunk-lean check at delivery
#[derive(Debug, Clone, Copy, Default)]
pub struct BowlingEvaluator;

impl ActivityEvaluator for BowlingEvaluator {
    fn name(&self) -> &'static str {
        "bowling"
    }

    fn key_joints(&self) -> &'static [K] {
        &KEY_JOINTS
    }

    fn default_phase(&self) -> Phase {
        Phase::Delivery
    }

    fn evaluate_frame(&self, frame: &Frame, ctx: &EvalContext) -> EvaluationResult {
        let p = frame.pose();
        let trunk = ctx.angle_cache.map(|c| c.torso_lean).unwrap_or_else(|| {
            Angle::torso(
                &p[K::LeftShoulder],
                &p[K::RightShoulder],
                &p[K::LeftHip],
                &p[K::RightHip],
                ctx.min_keypoint_score,
            )
        });
        let grade = grade_angle(trunk, TRUNK_RANGE, TRUNK_TOLERANCE);
        single_angle_result(
            Metric::TrunkLean,
            Check::TrunkGrade,
            trunk,
            grade,
            &[K::LeftShoulder, K::RightShoulder, K::LeftHip, K::RightHip],
            "Trunk lean",
        )
    }
}
