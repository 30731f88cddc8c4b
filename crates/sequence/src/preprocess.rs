//! Whole-clip preprocessing

use std::collections::BTreeMap;
use std::sync::Arc;

use activity::{
    ActivityEvaluator, ActivityKey, ActivityKind, ActivityRegistry, AngleCache, EvalContext, EvaluationResult, Metric,
    Phase,
};
use grading::Severity;
use pose_filter::{smooth_sequence, FrameValidator, ValidationError};
use pose_frame::{normalize_keypoints, Frame, KeypointIndex, Pose};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::remote::{AnalysisRequest, RawFrame};
use crate::SequenceError;

/// Smoothed frame with its grading attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFrame {
    pub timestamp: f64,
    pub keypoints: Pose,
    pub phase: Phase,
    pub frame_error: f64,
    pub joint_severity: BTreeMap<KeypointIndex, Severity>,
    pub metrics: BTreeMap<Metric, f64>,
    pub reasons: Vec<String>,
}

impl EnrichedFrame {
    fn new(frame: &Frame, phase: Phase, result: EvaluationResult) -> Self {
        Self {
            timestamp: frame.timestamp,
            keypoints: frame.keypoints,
            phase,
            frame_error: result.frame_error,
            joint_severity: result.joint_severity,
            metrics: result.metrics,
            reasons: result.reasons,
        }
    }
}

/// Mean ankle Y over the first `min(window, N)` frames; 0 for no frames
pub fn baseline_heel_y(frames: &[Frame], window: usize) -> f64 {
    let n = frames.len().min(window.max(1));
    if n == 0 {
        return 0.0;
    }
    frames[..n].iter().map(|f| f.pose().heel_y()).sum::<f64>() / n as f64
}

/// Batch preprocessor over a shared activity registry
#[derive(Debug, Clone)]
pub struct SequencePreprocessor {
    registry: Arc<ActivityRegistry>,
    config: EngineConfig,
    validator: FrameValidator,
}

impl SequencePreprocessor {
    pub fn new(registry: Arc<ActivityRegistry>, config: EngineConfig) -> Self {
        let validator = FrameValidator::new(config.validation.clone());
        info!(
            "Sequence preprocessor ready (carry={}, baseline window={})",
            config.smoothing_carry, config.baseline_window
        );
        Self {
            registry,
            config,
            validator,
        }
    }

    pub fn registry(&self) -> &ActivityRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a clip, then grade every frame; unknown keys fall back to squat
    pub fn preprocess(&self, frames: &[Frame], activity_key: &str) -> Result<Vec<EnrichedFrame>, SequenceError> {
        let evaluator = self.registry.resolve_or_default(activity_key);
        self.run(frames, evaluator)
    }

    /// Validate a clip, then grade it with the evaluator for `kind`
    pub fn preprocess_kind(&self, frames: &[Frame], kind: ActivityKind) -> Result<Vec<EnrichedFrame>, SequenceError> {
        self.run(frames, self.registry.evaluator(kind))
    }

    /// Normalize pixel-space detections against the source size and
    /// package them for remote analysis
    pub fn prepare_request(
        &self,
        key: ActivityKey,
        fps: f64,
        source: (f64, f64),
        raw: &[RawFrame],
    ) -> Result<AnalysisRequest, SequenceError> {
        let (width, height) = source;
        let frames = raw
            .iter()
            .enumerate()
            .map(|(i, f)| {
                normalize_keypoints(&f.keypoints, width, height)
                    .map(|pose| Frame::new(f.timestamp, pose))
                    .map_err(|e| ValidationError::from_frame_error(i, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.validator.validate_sequence(&frames)?;

        debug!(
            "Prepared {} frames for remote analysis ({}x{}, hint '{}')",
            frames.len(),
            width,
            height,
            key.backend_hint()
        );
        Ok(AnalysisRequest::new(key, fps, frames))
    }

    fn run(&self, frames: &[Frame], evaluator: &dyn ActivityEvaluator) -> Result<Vec<EnrichedFrame>, SequenceError> {
        self.validator.validate_sequence(frames)?;
        if frames.is_empty() {
            return Ok(Vec::new());
        }

        // phases and baseline come from raw frames, grading from smoothed ones
        let detection = evaluator.detect_phases(frames);
        let baseline = baseline_heel_y(frames, self.config.baseline_window);
        let smoothed = smooth_sequence(frames, self.config.smoothing_carry);
        let min_score = self.config.min_keypoint_score;

        let mut clean = 0;
        let enriched: Vec<EnrichedFrame> = smoothed
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let phase = detection.phase_at(i).unwrap_or_else(|| evaluator.default_phase());
                let ctx = EvalContext::new(phase, baseline)
                    .with_indices(i, detection.bottom_idx)
                    .with_angle_cache(AngleCache::from_pose(frame.pose(), min_score))
                    .with_min_keypoint_score(min_score);
                let result = evaluator.evaluate_frame(frame, &ctx);
                if result.is_clean() {
                    clean += 1;
                }
                EnrichedFrame::new(frame, phase, result)
            })
            .collect();

        debug!(
            "Preprocessed {} frames as '{}' ({} clean, bottom={}, baseline heel y={:.4})",
            enriched.len(),
            evaluator.name(),
            clean,
            detection.bottom_idx,
            baseline
        );
        Ok(enriched)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pose_frame::{Keypoint, KeypointIndex as K};

    /// Squat clip: hips drop to knee level then rise back
    pub(crate) fn squat_clip(len: usize) -> Vec<Frame> {
        (0..len)
            .map(|i| {
                let t = i as f64 / (len.max(2) - 1) as f64;
                let depth = 1.0 - (2.0 * t - 1.0).abs();
                let hip_y = 0.45 + 0.15 * depth;
                let mut pose = Pose::default();
                for kp in pose.keypoints.iter_mut() {
                    *kp = Keypoint::new(0.5, 0.2, 0.9);
                }
                pose[K::LeftShoulder] = Keypoint::new(0.45, hip_y - 0.3, 0.9);
                pose[K::RightShoulder] = Keypoint::new(0.65, hip_y - 0.3, 0.9);
                pose[K::LeftHip] = Keypoint::new(0.40, hip_y, 0.9);
                pose[K::RightHip] = Keypoint::new(0.60, hip_y, 0.9);
                pose[K::LeftKnee] = Keypoint::new(0.30, 0.60, 0.9);
                pose[K::RightKnee] = Keypoint::new(0.70, 0.60, 0.9);
                pose[K::LeftAnkle] = Keypoint::new(0.30, 0.80, 0.9);
                pose[K::RightAnkle] = Keypoint::new(0.70, 0.80, 0.9);
                Frame::new(i as f64 / 30.0, pose)
            })
            .collect()
    }

    fn preprocessor() -> SequencePreprocessor {
        SequencePreprocessor::new(Arc::new(ActivityRegistry::new()), EngineConfig::default())
    }

    fn uniform(ts: f64, x: f64) -> Frame {
        let mut pose = Pose::default();
        for kp in pose.keypoints.iter_mut() {
            *kp = Keypoint::new(x, 0.5, 0.9);
        }
        Frame::new(ts, pose)
    }

    #[test]
    fn test_empty_input() {
        assert!(preprocessor().preprocess(&[], "squat").unwrap().is_empty());
    }

    #[test]
    fn test_smoothing_applied_before_grading() {
        let frames = [uniform(0.0, 0.0), uniform(0.1, 1.0)];
        let enriched = preprocessor().preprocess(&frames, "pushup").unwrap();
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].keypoints, frames[0].keypoints);
        assert!((enriched[1].keypoints[K::LeftWrist].x - 0.65).abs() < 1e-12);
        assert_eq!(enriched[1].keypoints[K::LeftWrist].score, 0.9);
        assert_eq!(enriched[1].timestamp, 0.1);
    }

    #[test]
    fn test_squat_clip_phases() {
        let frames = squat_clip(11);
        let enriched = preprocessor().preprocess(&frames, "squat").unwrap();

        assert_eq!(enriched.len(), 11);
        assert_eq!(enriched[0].phase, Phase::Descent);
        assert_eq!(enriched[5].phase, Phase::Bottom);
        assert_eq!(enriched[10].phase, Phase::Ascent);
        assert!(enriched.iter().all(|f| f.metrics.contains_key(&Metric::KneeAngle)));
    }

    #[test]
    fn test_constant_phase_for_single_impulse_activity() {
        let enriched = preprocessor().preprocess(&squat_clip(6), "cricketSweep").unwrap();
        assert!(enriched.iter().all(|f| f.phase == Phase::Swing));
        assert!(enriched.iter().all(|f| f.metrics.contains_key(&Metric::FrontKnee)));
    }

    #[test]
    fn test_unknown_key_uses_squat() {
        let frames = squat_clip(5);
        let p = preprocessor();
        assert_eq!(p.preprocess(&frames, "yoga"), p.preprocess(&frames, "squat"));
        assert!(p.preprocess(&frames, "yoga").is_ok());
    }

    #[test]
    fn test_baseline_window() {
        let mut frames = squat_clip(12);
        for (i, frame) in frames.iter_mut().enumerate() {
            let y = if i < 10 { 0.8 } else { 0.5 };
            frame.keypoints[K::LeftAnkle].y = y;
            frame.keypoints[K::RightAnkle].y = y;
        }
        assert!((baseline_heel_y(&frames, 10) - 0.8).abs() < 1e-12);
        assert!((baseline_heel_y(&frames[..4], 10) - 0.8).abs() < 1e-12);
        assert_eq!(baseline_heel_y(&[], 10), 0.0);
    }

    #[test]
    fn test_rejects_nan_knees() {
        let mut frames = squat_clip(9);
        frames[4].keypoints[K::LeftKnee].x = f64::NAN;
        frames[4].keypoints[K::RightKnee].x = f64::NAN;
        let p = preprocessor();
        assert!(matches!(
            p.preprocess(&frames, "squat"),
            Err(SequenceError::Validation(ValidationError::NonFinite { frame: 4, field: "x" }))
        ));
        assert!(matches!(
            p.preprocess_kind(&frames, ActivityKind::Squat),
            Err(SequenceError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_decreasing_timestamps() {
        let mut frames = squat_clip(5);
        frames[3].timestamp = 0.0;
        assert!(matches!(
            preprocessor().preprocess(&frames, "pushup"),
            Err(SequenceError::Validation(ValidationError::TimestampRegression { frame: 3, .. }))
        ));
    }

    fn raw_frame(ts: f64, count: usize) -> RawFrame {
        RawFrame {
            timestamp: ts,
            keypoints: (0..count).map(|i| Keypoint::new(i as f64 * 20.0, 240.0, 0.8)).collect(),
        }
    }

    #[test]
    fn test_prepare_request_normalizes() {
        let raw = [raw_frame(0.0, 17), raw_frame(0.1, 33)];
        let request = preprocessor()
            .prepare_request(ActivityKey::CoverDrive, 30.0, (640.0, 480.0), &raw)
            .unwrap();

        assert_eq!(request.activity_hint, "cricket_cover_drive");
        assert_eq!(request.frames.len(), 2);
        assert_eq!(request.frames[1].timestamp, 0.1);
        assert_eq!(request.frames[0].keypoints[K::RightAnkle].x, 0.5);
        assert_eq!(request.frames[0].keypoints[K::Nose].y, 0.5);
    }

    #[test]
    fn test_prepare_request_rejects_short_pose() {
        let raw = [raw_frame(0.0, 17), raw_frame(0.1, 12)];
        assert_eq!(
            preprocessor().prepare_request(ActivityKey::Auto, 30.0, (640.0, 480.0), &raw),
            Err(SequenceError::Validation(ValidationError::KeypointCount { frame: 1, count: 12 }))
        );
    }

    #[test]
    fn test_prepare_request_rejects_nan() {
        let mut raw = [raw_frame(0.0, 17)];
        raw[0].keypoints[3].y = f64::NAN;
        assert!(matches!(
            preprocessor().prepare_request(ActivityKey::Squat, 30.0, (640.0, 480.0), &raw),
            Err(SequenceError::Validation(ValidationError::NonFinite { frame: 0, field: "y" }))
        ));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let frames = squat_clip(8);
        let copy = frames.clone();
        let _ = preprocessor().preprocess(&frames, "squat").unwrap();
        assert_eq!(frames, copy);
    }
}
