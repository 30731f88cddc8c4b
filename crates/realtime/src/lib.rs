//! Realtime Evaluation
//!
//! Streaming counterpart of batch preprocessing:
//! - Causal phase inference from the previous sample
//! - Carried heel baseline and confidence moving average
//! - Region status, live metrics, rep counting and coaching cues
//!
//! All carry lives in a [`RealtimeSession`] owned by one stream.

mod config;
mod cues;
mod phase;
mod sample;
mod session;

pub use config::RealtimeConfig;
pub use cues::{technical_advice, CoachingCue, CueKind};
pub use phase::infer_live_squat_phase;
pub use sample::{LiveMetrics, RealtimeSample, RegionStatus};
pub use session::{RealtimeSession, SampleCarry, TrendHistory};

use std::collections::BTreeMap;
use std::sync::Arc;

use activity::{ActivityKind, ActivityRegistry, AngleCache, Check, EvalContext};
use kinematics::Angle;
use pose_filter::{FrameValidator, ValidationError};
use pose_frame::{Frame, KeypointIndex as K, Pose};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Realtime error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RealtimeError {
    #[error("Invalid frame: {0}")]
    Validation(#[from] ValidationError),

    #[error("Frame at {timestamp}s arrived after {previous}s")]
    OutOfOrder { timestamp: f64, previous: f64 },
}

const MISSING_POSE_FEEDBACK: &str = "Keep full body visible for tracking.";
const CLEAN_SQUAT_FEEDBACK: &str = "Strong squat pattern. Keep depth and knee tracking consistent.";

/// Per-sample evaluator over a shared activity registry
#[derive(Debug, Clone)]
pub struct RealtimeEvaluator {
    registry: Arc<ActivityRegistry>,
    config: RealtimeConfig,
    validator: FrameValidator,
}

impl RealtimeEvaluator {
    pub fn new(registry: Arc<ActivityRegistry>, config: RealtimeConfig) -> Self {
        info!(
            "Realtime evaluator ready (capture={}, confidence carry={})",
            config.capture_capacity, config.confidence_carry
        );
        Self {
            registry,
            config,
            validator: FrameValidator::default(),
        }
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Fresh session configured for this evaluator
    pub fn new_session(&self) -> RealtimeSession {
        RealtimeSession::new(&self.config)
    }

    /// Activity graded live; `auto` and unknown keys use squat
    pub fn live_kind(&self, activity_key: &str) -> ActivityKind {
        if activity_key == "auto" {
            return ActivityKind::Squat;
        }
        self.registry.kind_of(activity_key).unwrap_or_else(|| {
            warn!("Unknown live activity '{}', using squat", activity_key);
            ActivityKind::Squat
        })
    }

    /// Evaluate one frame in arrival order
    pub fn evaluate(
        &self,
        session: &mut RealtimeSession,
        activity_key: &str,
        frame: Frame,
    ) -> Result<RealtimeSample, RealtimeError> {
        self.validator.validate_frame(session.samples as usize, &frame)?;
        let prev = session.carry;
        if let Some(carry) = prev {
            if frame.timestamp < carry.timestamp {
                return Err(RealtimeError::OutOfOrder {
                    timestamp: frame.timestamp,
                    previous: carry.timestamp,
                });
            }
        }

        let kind = self.live_kind(activity_key);
        let evaluator = self.registry.evaluator(kind);
        let min_score = self.config.min_keypoint_score;

        let pose = session.stabilizer.filter(frame.pose());
        let stable = Frame::new(frame.timestamp, pose);
        let cache = AngleCache::from_pose(&pose, min_score);
        let knee = cache.avg_knee().degrees();
        let hip_y = pose.hip_y();

        let phase = if kind == ActivityKind::Squat {
            infer_live_squat_phase(
                knee,
                prev.map(|c| c.hip_y),
                hip_y,
                self.config.bottom_knee_range,
                self.config.phase_deadband,
            )
        } else {
            evaluator.default_phase()
        };
        let baseline = prev.map_or_else(|| pose.heel_y(), |c| c.baseline_heel_y);

        let ctx = EvalContext::new(phase, baseline)
            .with_indices(session.samples as usize, 0)
            .with_angle_cache(cache)
            .with_min_keypoint_score(min_score);
        let result = evaluator.evaluate_frame(&stable, &ctx);

        let level = |check: Check| result.check(check).map(|g| g.level);
        let status = RegionStatus {
            knee: RegionStatus::knee_of(level(Check::KneeGrade), level(Check::TrackGrade)),
            hip: level(Check::DepthGrade).unwrap_or_default(),
            back: level(Check::TorsoGrade).unwrap_or_default(),
        };

        let carry_weight = self.config.confidence_carry;
        session.confidence =
            (session.confidence * carry_weight + status.ratio_good() * 100.0 * (1.0 - carry_weight)).clamp(0.0, 100.0);

        if kind == ActivityKind::Squat {
            if let (Some(prev_knee), Some(knee)) = (prev.and_then(|c| c.knee_angle), knee) {
                if prev_knee > self.config.rep_top_knee && knee < self.config.rep_bottom_knee {
                    session.reps += 1;
                    info!("Rep {} completed", session.reps);
                }
            }
        }

        let metrics = live_metrics(&pose, &cache, min_score);
        let feedback = match result.headline() {
            Some(reason) => format!("Phase: {}. {}.", phase, reason),
            None if kind == ActivityKind::Squat => CLEAN_SQUAT_FEEDBACK.to_string(),
            None => cues::DEFAULT_CUE.to_string(),
        };

        let cue = technical_advice(kind, &metrics, phase);
        let new_cue = session.log_cue(&cue);
        session.push_trend(metrics.knee, metrics.hip, metrics.back);
        if session.reference_pose.is_none() && !status.any_bad() {
            debug!("Captured reference pose at {:.3}s", frame.timestamp);
            session.reference_pose = Some(pose);
        }

        session.capture.push(frame);
        session.carry = Some(SampleCarry {
            timestamp: frame.timestamp,
            hip_y,
            baseline_heel_y: baseline,
            knee_angle: knee,
        });
        session.samples += 1;

        Ok(RealtimeSample {
            pose_detected: true,
            phase: Some(phase),
            metrics,
            status,
            joint_severity: result.joint_severity,
            frame_error: result.frame_error,
            reasons: result.reasons,
            feedback,
            cue: Some(cue),
            new_cue,
            confidence: session.confidence,
            reps: session.reps,
            baseline_heel_y: Some(baseline),
        })
    }

    /// Sample for a tick with no detected pose; carry is left untouched
    pub fn evaluate_missing(&self, session: &mut RealtimeSession) -> RealtimeSample {
        session.missing += 1;
        debug!("No pose in sample ({} missing so far)", session.missing);
        RealtimeSample {
            pose_detected: false,
            phase: None,
            metrics: LiveMetrics::default(),
            status: RegionStatus::default(),
            joint_severity: BTreeMap::new(),
            frame_error: 0.0,
            reasons: Vec::new(),
            feedback: MISSING_POSE_FEEDBACK.to_string(),
            cue: None,
            new_cue: false,
            confidence: session.confidence,
            reps: session.reps,
            baseline_heel_y: session.carry.map(|c| c.baseline_heel_y),
        }
    }
}

fn live_metrics(pose: &Pose, cache: &AngleCache, min_score: f64) -> LiveMetrics {
    let hip_x = pose.midpoint(K::LeftHip, K::RightHip).0;
    let offset = (hip_x - 0.5).abs();
    LiveMetrics {
        knee: cache.avg_knee().degrees(),
        hip: Angle::joint(&pose[K::LeftShoulder], &pose[K::LeftHip], &pose[K::LeftKnee], min_score).degrees(),
        back: cache.torso_lean.degrees(),
        path: (pose[K::LeftWrist].x - pose[K::RightWrist].x).abs(),
        timing: (offset * 1000.0).round() as i64,
        balance: (offset * 1000.0).round() / 10.0,
    }
}
