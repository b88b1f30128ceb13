//! Math foundation for 2D world-space calculations
//!
//! Thin aliases over nalgebra so the rest of the engine never names the
//! backing library directly.

/// 2D vector in world units
pub type Vec2 = nalgebra::Vector2<f32>;

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate_vec(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Squared distance between two points
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (b - a).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate_vec(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_squared_matches_norm() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_relative_eq!(distance_squared(a, b), 25.0);
    }
}
