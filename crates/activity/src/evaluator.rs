//! Activity evaluator interface

use pose_frame::{Frame, KeypointIndex};

use crate::context::EvalContext;
use crate::phase::{Phase, PhaseDetection};
use crate::result::EvaluationResult;

/// Grading strategy for one activity.
///
/// Implementations are pure: no I/O and no state across calls.
pub trait ActivityEvaluator: Send + Sync {
    /// Registry key
    fn name(&self) -> &'static str;

    /// Joints relevant for display
    fn key_joints(&self) -> &'static [KeypointIndex];

    /// Phase used when detection yields none for a frame
    fn default_phase(&self) -> Phase;

    /// Label every frame of a sequence
    fn detect_phases(&self, frames: &[Frame]) -> PhaseDetection {
        PhaseDetection::constant(frames.len(), self.default_phase())
    }

    /// Grade one frame
    fn evaluate_frame(&self, frame: &Frame, ctx: &EvalContext) -> EvaluationResult;
}

/// Grade an angle against a target range; unmeasured angles grade neutral
pub(crate) fn grade_angle(angle: kinematics::Angle, range: (f64, f64), tolerance: grading::Tolerance) -> grading::Grade {
    match angle.degrees() {
        Some(degrees) => tolerance.grade(grading::distance_to_range(degrees, range.0, range.1)),
        None => grading::Grade::indeterminate(),
    }
}

/// Result for activities graded by a single angle check
pub(crate) fn single_angle_result(
    metric: crate::result::Metric,
    check: crate::result::Check,
    angle: kinematics::Angle,
    grade: grading::Grade,
    joints: &[KeypointIndex],
    label: &str,
) -> EvaluationResult {
    let mut result = EvaluationResult {
        frame_error: grade.penalty() * 2.0,
        ..Default::default()
    };
    if let Some(degrees) = angle.degrees() {
        result.metrics.insert(metric, degrees);
        if grade.is_flagged() {
            result.reasons.push(format!("{} {:.1}°", label, degrees));
        }
    }
    result.checks.insert(check, grade);
    for joint in joints {
        result.joint_severity.insert(*joint, grade.level);
    }
    result
}
