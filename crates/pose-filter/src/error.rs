//! Validation Error Types

use pose_frame::FrameError;
use thiserror::Error;

/// Precondition violations rejected at the engine boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Wrong number of keypoints in a pose
    #[error("frame {frame}: expected 17 keypoints, got {count}")]
    KeypointCount { frame: usize, count: usize },

    /// NaN or infinite coordinate, score or timestamp
    #[error("frame {frame}: non-finite {field}")]
    NonFinite { frame: usize, field: &'static str },

    /// Value out of allowed range
    #[error("frame {frame}: {field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        frame: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Timestamp lower than its predecessor
    #[error("frame {frame}: timestamp {timestamp} precedes previous {previous}")]
    TimestampRegression {
        frame: usize,
        timestamp: f64,
        previous: f64,
    },
}

impl ValidationError {
    /// Attach the frame position to a pose construction error
    pub fn from_frame_error(frame: usize, err: FrameError) -> Self {
        match err {
            FrameError::KeypointCount(count) => ValidationError::KeypointCount { frame, count },
            FrameError::InvalidDimensions { .. } => ValidationError::NonFinite {
                frame,
                field: "source dimensions",
            },
        }
    }
}
