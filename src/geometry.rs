use nalgebra::Vector2;

pub mod point;

// Angle of `v` measured counter-clockwise from +x, in (-pi, pi]. Zero for a zero vector.
pub fn angle_to_x(v: &Vector2<f64>) -> f64 {
    if *v == Vector2::zeros() {
        0.0
    } else {
        v.y.atan2(v.x)
    }
}

pub fn distance(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (a - b).norm()
}
