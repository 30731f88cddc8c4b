//! Frame validation at the engine boundary

use pose_frame::{Frame, Keypoint};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Valid confidence range
    pub score_range: (f64, f64),
    /// Optional coordinate range; `None` accepts any finite value (pixel space)
    pub coordinate_range: Option<(f64, f64)>,
    /// Reject sequences whose timestamps decrease
    pub require_monotonic: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            score_range: (0.0, 1.0),
            coordinate_range: None,
            require_monotonic: true,
        }
    }
}

impl ValidationConfig {
    /// Config for normalized batch input, coordinates inside [0, 1]
    pub fn normalized() -> Self {
        Self {
            coordinate_range: Some((0.0, 1.0)),
            ..Default::default()
        }
    }
}

/// Validator for keypoint frames
#[derive(Debug, Clone, Default)]
pub struct FrameValidator {
    config: ValidationConfig,
}

impl FrameValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single frame
    pub fn validate_frame(&self, index: usize, frame: &Frame) -> Result<(), ValidationError> {
        if !frame.timestamp.is_finite() {
            return Err(ValidationError::NonFinite {
                frame: index,
                field: "timestamp",
            });
        }

        for (_, kp) in frame.pose().iter() {
            self.validate_keypoint(index, kp)?;
        }
        Ok(())
    }

    fn validate_keypoint(&self, frame: usize, kp: &Keypoint) -> Result<(), ValidationError> {
        for (field, value) in [("x", kp.x), ("y", kp.y), ("score", kp.score)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { frame, field });
            }
        }

        self.validate_range(frame, "score", kp.score, self.config.score_range)?;
        if let Some(range) = self.config.coordinate_range {
            self.validate_range(frame, "x", kp.x, range)?;
            self.validate_range(frame, "y", kp.y, range)?;
        }
        Ok(())
    }

    fn validate_range(
        &self,
        frame: usize,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                frame,
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate an ordered sequence; stops at the first violation
    pub fn validate_sequence(&self, frames: &[Frame]) -> Result<(), ValidationError> {
        let mut previous: Option<f64> = None;
        for (i, frame) in frames.iter().enumerate() {
            self.validate_frame(i, frame)?;
            if self.config.require_monotonic {
                if let Some(prev) = previous {
                    if frame.timestamp < prev {
                        warn!("Rejecting sequence: timestamp regression at frame {}", i);
                        return Err(ValidationError::TimestampRegression {
                            frame: i,
                            timestamp: frame.timestamp,
                            previous: prev,
                        });
                    }
                }
            }
            previous = Some(frame.timestamp);
        }
        Ok(())
    }
}
