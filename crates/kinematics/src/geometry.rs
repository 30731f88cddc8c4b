//! Joint angle and torso lean geometry

use pose_frame::Keypoint;
use serde::{Deserialize, Serialize};

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees [0, 180].
///
/// Returns 180 when either ray has zero length.
pub fn joint_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> f64 {
    ray_angle(a, b, c).unwrap_or(180.0)
}

fn ray_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> Option<f64> {
    let (abx, aby) = (a.x - b.x, a.y - b.y);
    let (cbx, cby) = (c.x - b.x, c.y - b.y);
    let mag_ab = abx.hypot(aby);
    let mag_cb = cbx.hypot(cby);
    if mag_ab == 0.0 || mag_cb == 0.0 {
        return None;
    }
    let cos = ((abx * cbx + aby * cby) / (mag_ab * mag_cb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Lean of the hip→shoulder line away from vertical-up, in degrees [0, 180]
pub fn torso_lean(
    left_shoulder: &Keypoint,
    right_shoulder: &Keypoint,
    left_hip: &Keypoint,
    right_hip: &Keypoint,
) -> f64 {
    let (vx, vy) = torso_vector(left_shoulder, right_shoulder, left_hip, right_hip);
    let mag = vx.hypot(vy);
    let mag = if mag == 0.0 { 1e-6 } else { mag };
    // Image Y grows downward, so vertical-up is (0, -1)
    (-vy / mag).clamp(-1.0, 1.0).acos().to_degrees()
}

fn torso_vector(ls: &Keypoint, rs: &Keypoint, lh: &Keypoint, rh: &Keypoint) -> (f64, f64) {
    let shoulder = ((ls.x + rs.x) / 2.0, (ls.y + rs.y) / 2.0);
    let hip = ((lh.x + rh.x) / 2.0, (lh.y + rh.y) / 2.0);
    (shoulder.0 - hip.0, shoulder.1 - hip.1)
}

fn usable(kp: &Keypoint, min_score: f64) -> bool {
    kp.is_finite() && kp.score >= min_score
}

/// Angle measurement that may be missing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "degrees", rename_all = "lowercase")]
pub enum Angle {
    /// Angle computed from usable geometry
    Measured(f64),
    /// Degenerate geometry or a keypoint below the confidence floor
    Indeterminate,
}

impl Angle {
    /// Joint angle at `b`, indeterminate for zero-length rays, non-finite
    /// keypoints or keypoints scoring below `min_score`
    pub fn joint(a: &Keypoint, b: &Keypoint, c: &Keypoint, min_score: f64) -> Self {
        if [a, b, c].iter().any(|kp| !usable(kp, min_score)) {
            return Angle::Indeterminate;
        }
        ray_angle(a, b, c).map_or(Angle::Indeterminate, Angle::Measured)
    }

    /// Torso lean, indeterminate when midpoints coincide or any keypoint is
    /// non-finite or scores below `min_score`
    pub fn torso(
        left_shoulder: &Keypoint,
        right_shoulder: &Keypoint,
        left_hip: &Keypoint,
        right_hip: &Keypoint,
        min_score: f64,
    ) -> Self {
        let points = [left_shoulder, right_shoulder, left_hip, right_hip];
        if points.iter().any(|kp| !usable(kp, min_score)) {
            return Angle::Indeterminate;
        }
        let (vx, vy) = torso_vector(left_shoulder, right_shoulder, left_hip, right_hip);
        if vx.hypot(vy) == 0.0 {
            return Angle::Indeterminate;
        }
        Angle::Measured(torso_lean(left_shoulder, right_shoulder, left_hip, right_hip))
    }

    pub fn degrees(self) -> Option<f64> {
        match self {
            Angle::Measured(d) => Some(d),
            Angle::Indeterminate => None,
        }
    }

    /// Mean of two angles; indeterminate if either side is
    pub fn mean(self, other: Angle) -> Angle {
        match (self, other) {
            (Angle::Measured(a), Angle::Measured(b)) => Angle::Measured((a + b) / 2.0),
            _ => Angle::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kp(x: f64, y: f64) -> Keypoint {
        Keypoint::new(x, y, 1.0)
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(&kp(0.0, 1.0), &kp(0.0, 0.0), &kp(1.0, 0.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line() {
        let angle = joint_angle(&kp(0.0, 0.0), &kp(0.0, 0.5), &kp(0.0, 1.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_returns_180() {
        assert_eq!(joint_angle(&kp(0.3, 0.3), &kp(0.3, 0.3), &kp(0.5, 0.9)), 180.0);
        assert_eq!(joint_angle(&kp(0.1, 0.2), &kp(0.5, 0.5), &kp(0.5, 0.5)), 180.0);
    }

    #[test]
    fn test_upright_torso_has_zero_lean() {
        let lean = torso_lean(&kp(0.4, 0.3), &kp(0.6, 0.3), &kp(0.4, 0.6), &kp(0.6, 0.6));
        assert!(lean.abs() < 1e-9);
    }

    #[test]
    fn test_forward_lean_45() {
        let lean = torso_lean(&kp(0.7, 0.3), &kp(0.7, 0.3), &kp(0.4, 0.6), &kp(0.4, 0.6));
        assert!((lean - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_torso_midpoints() {
        let p = kp(0.5, 0.5);
        assert!((torso_lean(&p, &p, &p, &p) - 90.0).abs() < 1e-9);
        assert_eq!(Angle::torso(&p, &p, &p, &p, 0.0), Angle::Indeterminate);
    }

    #[test]
    fn test_angle_indeterminate_on_degenerate() {
        let p = kp(0.5, 0.5);
        assert_eq!(Angle::joint(&p, &p, &kp(0.1, 0.1), 0.0), Angle::Indeterminate);
    }

    #[test]
    fn test_angle_indeterminate_on_low_confidence() {
        let weak = Keypoint::new(0.0, 1.0, 0.05);
        let angle = Angle::joint(&weak, &kp(0.0, 0.0), &kp(1.0, 0.0), 0.12);
        assert_eq!(angle, Angle::Indeterminate);
        let angle = Angle::joint(&weak, &kp(0.0, 0.0), &kp(1.0, 0.0), 0.0);
        assert!(angle.degrees().is_some());
    }

    #[test]
    fn test_angle_indeterminate_on_nan() {
        let nan = kp(f64::NAN, 0.5);
        assert_eq!(Angle::joint(&nan, &kp(0.0, 0.0), &kp(1.0, 0.0), 0.0), Angle::Indeterminate);
        let p = kp(0.5, 0.5);
        assert_eq!(Angle::torso(&nan, &p, &p, &kp(0.5, 0.9), 0.0), Angle::Indeterminate);
    }

    #[test]
    fn test_angle_mean() {
        assert_eq!(Angle::Measured(80.0).mean(Angle::Measured(100.0)), Angle::Measured(90.0));
        assert_eq!(Angle::Measured(80.0).mean(Angle::Indeterminate), Angle::Indeterminate);
    }

    proptest! {
        #[test]
        fn prop_joint_angle_in_range(
            ax in -1.0f64..2.0, ay in -1.0f64..2.0,
            bx in -1.0f64..2.0, by in -1.0f64..2.0,
            cx in -1.0f64..2.0, cy in -1.0f64..2.0,
        ) {
            let angle = joint_angle(&kp(ax, ay), &kp(bx, by), &kp(cx, cy));
            prop_assert!((0.0..=180.0).contains(&angle));
        }

        #[test]
        fn prop_coincident_points_give_180(x in 0.0f64..1.0, y in 0.0f64..1.0, cx in 0.0f64..1.0, cy in 0.0f64..1.0) {
            prop_assert_eq!(joint_angle(&kp(x, y), &kp(x, y), &kp(cx, cy)), 180.0);
        }

        #[test]
        fn prop_torso_lean_in_range(
            sx in 0.0f64..1.0, sy in 0.0f64..1.0,
            hx in 0.0f64..1.0, hy in 0.0f64..1.0,
        ) {
            let lean = torso_lean(&kp(sx, sy), &kp(sx, sy), &kp(hx, hy), &kp(hx, hy));
            prop_assert!((0.0..=180.0).contains(&lean));
        }
    }
}
