//! Angle, gradient and rounding helpers
//!
//! Angles handed to and from the UI are in degrees; everything internal
//! to the physics crate works in radians.

use crate::Vec2;

/// Round `value` to `decimals` places after the point
#[inline]
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let scale = 10f32.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Slope of the line through two points
///
/// Returns `None` for a vertical line (equal x), which has no finite slope.
pub fn gradient(p1: Vec2, p2: Vec2) -> Option<f32> {
    if p1.x == p2.x {
        None
    } else {
        Some((p2.y - p1.y) / (p2.x - p1.x))
    }
}

/// Angle in degrees (rounded to 2 places) of the line from `origin` to `pos`
///
/// Screen coordinates grow downwards, so a point above and to the right of
/// the origin yields a negative angle.
pub fn aim_angle(pos: Vec2, origin: Vec2) -> Option<f32> {
    gradient(pos, origin).map(|m| round_to(m.atan().to_degrees(), 2))
}

/// Point on the circle of `radius` around `origin` at `theta_deg` degrees
pub fn point_on_circle(theta_deg: f32, origin: Vec2, radius: f32) -> Vec2 {
    origin + Vec2::from_angle(theta_deg.to_radians()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(40.816_326, 2), 40.82);
        assert_eq!(round_to(2.886_2, 2), 2.89);
        assert_eq!(round_to(0.012_345, 4), 0.0123);
        assert_eq!(round_to(-12.345, 1), -12.3);
    }

    #[test]
    fn test_gradient() {
        let m = gradient(Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0));
        assert_eq!(m, Some(2.0));
        assert_eq!(gradient(Vec2::new(5.0, 0.0), Vec2::new(5.0, 9.0)), None);
    }

    #[test]
    fn test_aim_angle_up_and_right_is_negative() {
        let origin = Vec2::new(20.0, 340.0);
        let theta = aim_angle(Vec2::new(120.0, 240.0), origin).unwrap();
        assert_eq!(theta, -45.0);
    }

    #[test]
    fn test_aim_angle_left_of_origin_is_positive() {
        let origin = Vec2::new(20.0, 340.0);
        let theta = aim_angle(Vec2::new(0.0, 320.0), origin).unwrap();
        assert_eq!(theta, 45.0);
    }

    #[test]
    fn test_aim_angle_vertical() {
        let origin = Vec2::new(20.0, 340.0);
        assert_eq!(aim_angle(Vec2::new(20.0, 100.0), origin), None);
    }

    #[test]
    fn test_point_on_circle() {
        let origin = Vec2::new(20.0, 340.0);
        let p = point_on_circle(-90.0, origin, 250.0);
        assert!((p.x - 20.0).abs() < 1e-3);
        assert!((p.y - 90.0).abs() < 1e-3);

        let q = point_on_circle(0.0, origin, 250.0);
        assert_eq!(q, Vec2::new(270.0, 340.0));
    }
}
