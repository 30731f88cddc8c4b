//! Pose Frame Types
//!
//! Keypoint, pose and frame types shared by every stage of the evaluation
//! engine, plus a bounded buffer for frames captured from a live stream.

mod buffer;
mod frame;
mod keypoint;

pub use buffer::{CaptureBuffer, DEFAULT_CAPTURE_CAPACITY};
pub use frame::{normalize_keypoints, Frame, Pose};
pub use keypoint::{Keypoint, KeypointIndex, KEYPOINT_COUNT};

use thiserror::Error;

/// Errors raised while building poses from detector output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// Detector produced fewer keypoints than the fixed skeleton requires
    #[error("expected 17 keypoints, got {0}")]
    KeypointCount(usize),

    /// Source frame dimensions are not usable for normalization
    #[error("invalid source dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}
