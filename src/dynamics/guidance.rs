//! Predator steering laws.
//!
//! Pure pursuit heads straight at the prey. Parallel navigation picks the
//! heading that keeps the line of sight to the prey at a fixed bearing,
//! assuming the prey holds its current velocity. Each predator flies a blend
//! of the two weighted by its lambda.

use nalgebra::Vector2;

use crate::geometry::point::normalize_to;

/// Unit vector from the predator towards the prey.
pub fn naive_direction(predator: &Vector2<f64>, prey: &Vector2<f64>) -> Vector2<f64> {
    normalize_to(prey - predator, 1.0)
}

/// Larger root of `zz α² - 2 zv α + (vv - a²) = 0`.
///
/// `None` when the root is not real or the predator sits on the prey.
pub fn intercept_alpha(z: &Vector2<f64>, v: &Vector2<f64>, a: f64) -> Option<f64> {
    let zz = z.dot(z);
    let zv = z.dot(v);
    let vv = v.dot(v);
    let discriminant = zv * zv + zz * (a * a - vv);
    if zz == 0.0 || discriminant < 0.0 {
        return None;
    }
    Some((zv + discriminant.sqrt()) / zz)
}

/// Unit heading for parallel navigation, in units where the prey speed is 1.
pub fn parallel_direction(
    predator: &Vector2<f64>,
    prey: &Vector2<f64>,
    prey_velocity: &Vector2<f64>,
    prey_speed: f64,
    predators_speed: f64,
) -> Option<Vector2<f64>> {
    let a = predators_speed / prey_speed;
    let z = (predator - prey) / prey_speed;
    let v = normalize_to(*prey_velocity, prey_speed);
    let alpha = intercept_alpha(&z, &v, a)?;
    Some(normalize_to(v - z.scale(alpha), 1.0))
}

/// Blend of parallel navigation (weight `lambda`) and pure pursuit.
///
/// Parallel navigation falls back to pure pursuit where it has no solution.
pub fn steering_direction(
    lambda: f64,
    predator: &Vector2<f64>,
    prey: &Vector2<f64>,
    prey_velocity: &Vector2<f64>,
    prey_speed: f64,
    predators_speed: f64,
) -> Vector2<f64> {
    let naive = naive_direction(predator, prey);
    if lambda == 0.0 {
        return naive;
    }
    let parallel =
        parallel_direction(predator, prey, prey_velocity, prey_speed, predators_speed)
            .unwrap_or(naive);
    parallel.scale(lambda) + naive.scale(1.0 - lambda)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_naive_direction() {
        let d = naive_direction(&Vector2::new(4.0, 0.0), &Vector2::new(0.0, 3.0));
        assert_relative_eq!(d, Vector2::new(-0.8, 0.6), epsilon = 1e-12);
        assert_eq!(
            naive_direction(&Vector2::new(1.0, 1.0), &Vector2::new(1.0, 1.0)),
            Vector2::zeros()
        );
    }

    #[test]
    fn test_head_on_intercept() {
        // Prey runs straight at the predator; the collision course is the line of sight.
        let d = parallel_direction(
            &Vector2::new(10.0, 0.0),
            &Vector2::zeros(),
            &Vector2::new(1.0, 0.0),
            1.0,
            2.0,
        )
        .unwrap();
        assert_relative_eq!(d, Vector2::new(-1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_intercept_point_is_shared() {
        let predator = Vector2::new(0.0, -5.0);
        let prey = Vector2::new(-3.0, 2.0);
        let prey_velocity = Vector2::new(1.0, 0.0);
        let (prey_speed, predators_speed) = (1.0, 2.5);
        let d = parallel_direction(&predator, &prey, &prey_velocity, prey_speed, predators_speed)
            .unwrap();
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);

        // Both arrive at the same point at the same time.
        let v = prey_velocity.scale(prey_speed);
        let w = d.scale(predators_speed);
        let rel = prey - predator;
        let dv = w - v;
        let t = rel.dot(&dv) / dv.dot(&dv);
        assert!(t > 0.0);
        assert_relative_eq!(predator + w * t, prey + v * t, epsilon = 1e-9);
    }

    #[test]
    fn test_unreachable_prey() {
        // A slower predator abeam of a fleeing prey has no collision course.
        assert!(intercept_alpha(&Vector2::new(0.0, 1.0), &Vector2::new(1.0, 0.0), 0.5).is_none());
        assert!(intercept_alpha(&Vector2::zeros(), &Vector2::new(1.0, 0.0), 2.0).is_none());

        let d = steering_direction(
            1.0,
            &Vector2::new(0.0, 1.0),
            &Vector2::zeros(),
            &Vector2::new(1.0, 0.0),
            1.0,
            0.5,
        );
        assert_relative_eq!(d, Vector2::new(0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_blend_weights() {
        let predator = Vector2::new(0.0, -4.0);
        let prey = Vector2::zeros();
        let velocity = Vector2::new(1.0, 0.0);
        let naive = naive_direction(&predator, &prey);
        let parallel = parallel_direction(&predator, &prey, &velocity, 1.0, 2.0).unwrap();

        let pursuit = steering_direction(0.0, &predator, &prey, &velocity, 1.0, 2.0);
        assert_relative_eq!(pursuit, naive, epsilon = 1e-12);
        let pn = steering_direction(1.0, &predator, &prey, &velocity, 1.0, 2.0);
        assert_relative_eq!(pn, parallel, epsilon = 1e-12);
        let half = steering_direction(0.5, &predator, &prey, &velocity, 1.0, 2.0);
        assert_relative_eq!(half, (naive + parallel) / 2.0, epsilon = 1e-12);
    }
}
