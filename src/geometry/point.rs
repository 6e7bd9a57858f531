use nalgebra::Vector2;

/// Rescale `v` to `length`. A zero vector stays zero.
pub fn normalize_to(v: Vector2<f64>, length: f64) -> Vector2<f64> {
    if v == Vector2::zeros() {
        return v;
    }
    v.scale(length / v.norm())
}

pub fn unit_heading(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Rotation in degrees of a shape drawn pointing along -y so that it faces along `v`.
/// `None` for a zero vector, in which case the current rotation should be kept.
pub fn display_rotation(v: &Vector2<f64>) -> Option<f64> {
    if *v == Vector2::zeros() {
        None
    } else {
        Some(v.x.atan2(-v.y).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_to() {
        let v = normalize_to(Vector2::new(3.0, 4.0), 10.0);
        assert_relative_eq!(v, Vector2::new(6.0, 8.0), epsilon = 1e-12);
        assert_eq!(normalize_to(Vector2::zeros(), 5.0), Vector2::zeros());
    }

    #[test]
    fn test_unit_heading() {
        assert_relative_eq!(unit_heading(FRAC_PI_2), Vector2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_display_rotation() {
        // Facing -y is the unrotated shape, +x is a quarter turn clockwise.
        assert_relative_eq!(display_rotation(&Vector2::new(0.0, -1.0)).unwrap(), 0.0);
        assert_relative_eq!(display_rotation(&Vector2::new(1.0, 0.0)).unwrap(), 90.0);
        assert_eq!(display_rotation(&Vector2::zeros()), None);
    }
}
