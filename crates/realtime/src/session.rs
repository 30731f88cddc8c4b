//! Per-stream carry

use std::collections::VecDeque;

use pose_filter::PoseStabilizer;
use pose_frame::{CaptureBuffer, Pose};
use serde::{Deserialize, Serialize};

use crate::config::RealtimeConfig;
use crate::cues::CoachingCue;

/// Values carried from one sample to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleCarry {
    pub timestamp: f64,
    pub hip_y: f64,
    pub baseline_heel_y: f64,
    /// Average knee angle, absent when it could not be measured
    pub knee_angle: Option<f64>,
}

/// Rolling angle history for live trend lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendHistory {
    pub knee: VecDeque<f64>,
    pub hip: VecDeque<f64>,
    pub back: VecDeque<f64>,
}

impl TrendHistory {
    fn push(series: &mut VecDeque<f64>, value: Option<f64>, limit: usize) {
        let Some(value) = value else { return };
        if series.len() >= limit {
            series.pop_front();
        }
        series.push_back((value * 100.0).round() / 100.0);
    }
}

/// State owned by exactly one stream.
///
/// Samples must be fed in arrival order; nothing here is shared across
/// sessions.
#[derive(Debug, Clone)]
pub struct RealtimeSession {
    pub(crate) stabilizer: PoseStabilizer,
    pub(crate) capture: CaptureBuffer,
    pub(crate) carry: Option<SampleCarry>,
    pub(crate) confidence: f64,
    pub(crate) reps: u32,
    pub(crate) trend: TrendHistory,
    pub(crate) coaching_log: VecDeque<CoachingCue>,
    pub(crate) reference_pose: Option<Pose>,
    pub(crate) samples: u64,
    pub(crate) missing: u64,
    trend_length: usize,
    coaching_log_length: usize,
}

impl RealtimeSession {
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            stabilizer: PoseStabilizer::new(config.stabilizer),
            capture: CaptureBuffer::new(config.capture_capacity),
            carry: None,
            confidence: 0.0,
            reps: 0,
            trend: TrendHistory::default(),
            coaching_log: VecDeque::new(),
            reference_pose: None,
            samples: 0,
            missing: 0,
            trend_length: config.trend_length.max(1),
            coaching_log_length: config.coaching_log_length.max(1),
        }
    }

    /// Confidence moving average in [0, 100]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Carry from the last evaluated sample
    pub fn carry(&self) -> Option<&SampleCarry> {
        self.carry.as_ref()
    }

    pub fn capture(&self) -> &CaptureBuffer {
        &self.capture
    }

    pub fn trend(&self) -> &TrendHistory {
        &self.trend
    }

    /// Most recent coaching messages, newest first
    pub fn coaching_log(&self) -> impl Iterator<Item = &CoachingCue> {
        self.coaching_log.iter()
    }

    /// First stabilized pose with no region graded bad
    pub fn reference_pose(&self) -> Option<&Pose> {
        self.reference_pose.as_ref()
    }

    /// Samples evaluated with a pose
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Samples that arrived without a pose
    pub fn missing(&self) -> u64 {
        self.missing
    }

    pub(crate) fn push_trend(&mut self, knee: Option<f64>, hip: Option<f64>, back: Option<f64>) {
        TrendHistory::push(&mut self.trend.knee, knee, self.trend_length);
        TrendHistory::push(&mut self.trend.hip, hip, self.trend_length);
        TrendHistory::push(&mut self.trend.back, back, self.trend_length);
    }

    /// Log a cue unless it repeats the latest one; returns whether it was new
    pub(crate) fn log_cue(&mut self, cue: &CoachingCue) -> bool {
        if self.coaching_log.front().is_some_and(|last| last.msg == cue.msg) {
            return false;
        }
        self.coaching_log.push_front(cue.clone());
        self.coaching_log.truncate(self.coaching_log_length);
        true
    }

    /// Drop all carry (new athlete or restarted stream)
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        self.capture.clear();
        self.carry = None;
        self.confidence = 0.0;
        self.reps = 0;
        self.trend = TrendHistory::default();
        self.coaching_log.clear();
        self.reference_pose = None;
        self.samples = 0;
        self.missing = 0;
    }
}

impl Default for RealtimeSession {
    fn default() -> Self {
        Self::new(&RealtimeConfig::default())
    }
}
