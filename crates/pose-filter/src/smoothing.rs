//! Low-pass blending of consecutive frames

use pose_frame::{Frame, Pose};
use tracing::debug;

/// Weight carried over from the previous frame
pub const DEFAULT_SMOOTHING_CARRY: f64 = 0.35;

/// Blend coordinates as `prev * carry + current * (1 - carry)`; scores are kept
pub fn blend_pose(prev: &Pose, current: &Pose, carry: f64) -> Pose {
    let keep = 1.0 - carry;
    let mut out = *current;
    for (kp, p) in out.keypoints.iter_mut().zip(prev.keypoints.iter()) {
        kp.x = p.x * carry + kp.x * keep;
        kp.y = p.y * carry + kp.y * keep;
    }
    out
}

/// Smoothed copy of a sequence.
///
/// Frame 0 is unchanged; every later frame is blended with its raw
/// predecessor. Input frames are never mutated.
pub fn smooth_sequence(frames: &[Frame], carry: f64) -> Vec<Frame> {
    let carry = carry.clamp(0.0, 1.0);
    let mut out = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        if i == 0 {
            out.push(*frame);
            continue;
        }
        let prev = &frames[i - 1];
        out.push(Frame::new(
            frame.timestamp,
            blend_pose(prev.pose(), frame.pose(), carry),
        ));
    }
    debug!("Smoothed {} frames (carry={})", frames.len(), carry);
    out
}
