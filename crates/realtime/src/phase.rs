//! Causal squat phase inference

use activity::Phase;

/// Squat phase from the current knee angle and hip motion.
///
/// A knee inside `bottom_range` is the bottom. Otherwise hip Y moving down
/// the image by more than `deadband` is descent, moving up is ascent, and
/// anything in between (or no previous sample) stays descent.
pub fn infer_live_squat_phase(
    knee_angle: Option<f64>,
    prev_hip_y: Option<f64>,
    hip_y: f64,
    bottom_range: (f64, f64),
    deadband: f64,
) -> Phase {
    if let Some(knee) = knee_angle {
        if knee >= bottom_range.0 && knee <= bottom_range.1 {
            return Phase::Bottom;
        }
    }
    let Some(prev) = prev_hip_y else {
        return Phase::Descent;
    };
    let dy = hip_y - prev;
    if dy > deadband {
        Phase::Descent
    } else if dy < -deadband {
        Phase::Ascent
    } else {
        Phase::Descent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: (f64, f64) = (80.0, 100.0);

    #[test]
    fn test_bottom_by_knee() {
        assert_eq!(infer_live_squat_phase(Some(80.0), None, 0.5, RANGE, 0.002), Phase::Bottom);
        assert_eq!(infer_live_squat_phase(Some(100.0), Some(0.4), 0.5, RANGE, 0.002), Phase::Bottom);
    }

    #[test]
    fn test_direction_with_deadband() {
        assert_eq!(infer_live_squat_phase(Some(150.0), None, 0.5, RANGE, 0.002), Phase::Descent);
        assert_eq!(infer_live_squat_phase(Some(150.0), Some(0.50), 0.51, RANGE, 0.002), Phase::Descent);
        assert_eq!(infer_live_squat_phase(Some(150.0), Some(0.51), 0.50, RANGE, 0.002), Phase::Ascent);
        assert_eq!(infer_live_squat_phase(Some(150.0), Some(0.500), 0.501, RANGE, 0.002), Phase::Descent);
        assert_eq!(infer_live_squat_phase(Some(150.0), Some(0.501), 0.500, RANGE, 0.002), Phase::Descent);
    }

    #[test]
    fn test_unmeasured_knee_uses_motion() {
        assert_eq!(infer_live_squat_phase(None, Some(0.6), 0.5, RANGE, 0.002), Phase::Ascent);
    }
}
