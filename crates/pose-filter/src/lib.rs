//! Pose Validation and Filtering
//!
//! Provides boundary validation, hold-last-good stabilization of
//! low-confidence keypoints, and exponential smoothing across frames.

mod error;
mod smoothing;
mod stabilizer;
mod validator;

pub use error::ValidationError;
pub use smoothing::{blend_pose, smooth_sequence, DEFAULT_SMOOTHING_CARRY};
pub use stabilizer::{stabilize, PoseStabilizer, StabilizerConfig};
pub use validator::{FrameValidator, ValidationConfig};
