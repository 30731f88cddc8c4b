//! Squat evaluator

use grading::{Grade, SeverityMap, Tolerance};
use pose_frame::{Frame, KeypointIndex as K};
use serde::{Deserialize, Serialize};

use crate::context::EvalContext;
use crate::evaluator::{grade_angle, ActivityEvaluator};
use crate::phase::{Phase, PhaseDetection};
use crate::result::{Check, EvaluationResult, Metric};

/// Frames within this many indices of the deepest frame are `bottom`
const BOTTOM_WINDOW: usize = 2;

/// Squat grading thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    /// Target average knee angle (degrees)
    pub knee_range: (f64, f64),
    pub knee_tolerance: Tolerance,
    pub knee_tolerance_bottom: Tolerance,

    /// Hip-above-knee gap ignored before depth is penalized
    pub depth_deadband: f64,
    pub depth_tolerance: Tolerance,
    pub depth_tolerance_bottom: Tolerance,

    /// Target torso lean from vertical (degrees)
    pub torso_range: (f64, f64),
    pub torso_tolerance: Tolerance,
    pub torso_tolerance_bottom: Tolerance,

    /// Medial knee collapse relative to hip width
    pub tracking_tolerance: Tolerance,
    /// Heel rise above the standing baseline
    pub heel_tolerance: Tolerance,

    /// Frame error weights
    pub knee_weight: f64,
    pub depth_weight: f64,
    pub torso_weight: f64,
    pub tracking_weight: f64,
    pub heel_weight: f64,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            knee_range: (80.0, 100.0),
            knee_tolerance: Tolerance::new(0.0, 10.0),
            knee_tolerance_bottom: Tolerance::new(0.0, 6.0),
            depth_deadband: 0.005,
            depth_tolerance: Tolerance::new(0.005, 0.03),
            depth_tolerance_bottom: Tolerance::new(0.005, 0.02),
            torso_range: (20.0, 45.0),
            torso_tolerance: Tolerance::new(0.0, 12.0),
            torso_tolerance_bottom: Tolerance::new(0.0, 8.0),
            tracking_tolerance: Tolerance::new(0.08, 0.16),
            heel_tolerance: Tolerance::new(0.01, 0.03),
            knee_weight: 2.4,
            depth_weight: 1.8,
            torso_weight: 1.4,
            tracking_weight: 1.5,
            heel_weight: 0.8,
        }
    }
}

impl SquatThresholds {
    /// Bottom-phase strictness in every phase
    pub fn strict() -> Self {
        let base = Self::default();
        Self {
            knee_tolerance: base.knee_tolerance_bottom,
            depth_tolerance: base.depth_tolerance_bottom,
            torso_tolerance: base.torso_tolerance_bottom,
            ..base
        }
    }

    /// Wider warning bands for beginners
    pub fn lenient() -> Self {
        Self {
            knee_tolerance: Tolerance::new(0.0, 15.0),
            knee_tolerance_bottom: Tolerance::new(0.0, 10.0),
            torso_tolerance: Tolerance::new(0.0, 18.0),
            torso_tolerance_bottom: Tolerance::new(0.0, 12.0),
            tracking_tolerance: Tolerance::new(0.1, 0.22),
            ..Default::default()
        }
    }
}

/// Reference activity with five weighted checks
#[derive(Debug, Clone, Default)]
pub struct SquatEvaluator {
    thresholds: SquatThresholds,
}

impl SquatEvaluator {
    pub fn new(thresholds: SquatThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SquatThresholds {
        &self.thresholds
    }
}

const KEY_JOINTS: [K; 8] = [
    K::LeftHip,
    K::RightHip,
    K::LeftKnee,
    K::RightKnee,
    K::LeftAnkle,
    K::RightAnkle,
    K::LeftShoulder,
    K::RightShoulder,
];

impl ActivityEvaluator for SquatEvaluator {
    fn name(&self) -> &'static str {
        "squat"
    }

    fn key_joints(&self) -> &'static [K] {
        &KEY_JOINTS
    }

    fn default_phase(&self) -> Phase {
        Phase::Descent
    }

    fn detect_phases(&self, frames: &[Frame]) -> PhaseDetection {
        let hip_y: Vec<f64> = frames.iter().map(|f| f.pose().hip_y()).collect();

        // Image Y grows downward: the deepest frame has the largest hip Y.
        // Strict comparison keeps the earliest maximum.
        let mut bottom_idx = 0;
        for (i, y) in hip_y.iter().enumerate() {
            if *y > hip_y[bottom_idx] {
                bottom_idx = i;
            }
        }

        let phases = (0..hip_y.len())
            .map(|i| {
                if i.abs_diff(bottom_idx) <= BOTTOM_WINDOW {
                    Phase::Bottom
                } else if i < bottom_idx {
                    Phase::Descent
                } else {
                    Phase::Ascent
                }
            })
            .collect();

        PhaseDetection { bottom_idx, phases }
    }

    fn evaluate_frame(&self, frame: &Frame, ctx: &EvalContext) -> EvaluationResult {
        let t = &self.thresholds;
        let p = frame.pose();
        let angles = ctx.angles(p);
        let knee_angle = angles.avg_knee();
        let torso_lean = angles.torso_lean;

        let hip_y = p.hip_y();
        let knee_y = p.midpoint(K::LeftKnee, K::RightKnee).1;
        let depth_deviation = (knee_y - hip_y - t.depth_deadband).max(0.0);

        let hip_width = (p[K::LeftHip].x - p[K::RightHip].x).abs().max(1e-6);
        let left_medial = (p[K::LeftKnee].x - p[K::LeftAnkle].x).max(0.0);
        let right_medial = (p[K::RightAnkle].x - p[K::RightKnee].x).max(0.0);
        let tracking_deviation = (left_medial + right_medial) / hip_width;

        let heel_lift = (ctx.baseline_heel_y - p.heel_y()).max(0.0);

        let bottom = ctx.phase == Phase::Bottom;
        let pick = |bottom_tol: Tolerance, tol: Tolerance| if bottom { bottom_tol } else { tol };

        let knee_grade = grade_angle(
            knee_angle,
            t.knee_range,
            pick(t.knee_tolerance_bottom, t.knee_tolerance),
        );
        let depth_grade = pick(t.depth_tolerance_bottom, t.depth_tolerance).grade(depth_deviation);
        let torso_grade = grade_angle(
            torso_lean,
            t.torso_range,
            pick(t.torso_tolerance_bottom, t.torso_tolerance),
        );
        let track_grade = t.tracking_tolerance.grade(tracking_deviation);
        let heel_grade = t.heel_tolerance.grade(heel_lift);

        let mut joints = SeverityMap::new();
        joints.apply(&[K::LeftKnee, K::RightKnee], knee_grade.level);
        joints.apply(&[K::LeftHip, K::RightHip], depth_grade.level);
        joints.apply(
            &[K::LeftShoulder, K::RightShoulder, K::LeftHip, K::RightHip],
            torso_grade.level,
        );
        joints.apply(
            &[K::LeftKnee, K::RightKnee, K::LeftAnkle, K::RightAnkle],
            track_grade.level,
        );
        joints.apply(&[K::LeftAnkle, K::RightAnkle], heel_grade.level);

        let mut reasons = Vec::new();
        if let Some(deg) = knee_angle.degrees().filter(|_| knee_grade.is_flagged()) {
            reasons.push(format!("Knee angle {:.1}°", deg));
        }
        if depth_grade.is_flagged() {
            reasons.push("Hip depth insufficient".to_string());
        }
        if let Some(deg) = torso_lean.degrees().filter(|_| torso_grade.is_flagged()) {
            reasons.push(format!("Torso lean {:.1}°", deg));
        }
        if track_grade.is_flagged() {
            reasons.push("Knee tracking collapse".to_string());
        }
        if heel_grade == Grade::BAD {
            reasons.push("Heel lift detected".to_string());
        }

        let mut result = EvaluationResult {
            joint_severity: joints.into_inner(),
            frame_error: knee_grade.penalty() * t.knee_weight
                + depth_grade.penalty() * t.depth_weight
                + torso_grade.penalty() * t.torso_weight
                + track_grade.penalty() * t.tracking_weight
                + heel_grade.penalty() * t.heel_weight,
            reasons,
            ..Default::default()
        };

        if let Some(deg) = knee_angle.degrees() {
            result.metrics.insert(Metric::KneeAngle, deg);
        }
        result.metrics.insert(Metric::HipDepthDelta, hip_y - knee_y);
        if let Some(deg) = torso_lean.degrees() {
            result.metrics.insert(Metric::TorsoLean, deg);
        }
        result.metrics.insert(Metric::KneeTracking, tracking_deviation);
        result.metrics.insert(Metric::HeelLift, heel_lift);

        result.checks.insert(Check::KneeGrade, knee_grade);
        result.checks.insert(Check::DepthGrade, depth_grade);
        result.checks.insert(Check::TorsoGrade, torso_grade);
        result.checks.insert(Check::TrackGrade, track_grade);
        result.checks.insert(Check::HeelGrade, heel_grade);
        result
    }
}
