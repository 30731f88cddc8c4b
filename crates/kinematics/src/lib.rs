//! Kinematics
//!
//! Joint-angle geometry over 2D keypoints, descriptive statistics, and
//! per-frame kinematic series used for session timelines.

mod geometry;
mod series;
mod statistics;

pub use geometry::{joint_angle, torso_lean, Angle};
pub use series::{KinematicSeries, Timeline};
pub use statistics::StatisticalFeatures;
