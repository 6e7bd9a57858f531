#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct SimParams {
    pub prey_speed: f64,
    // Shared by every predator.
    pub predators_speed: f64,
    // Trail dash and gap lengths, in simulation seconds.
    pub trail_dash: f64,
    pub trail_gap: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            prey_speed: 1.0,
            predators_speed: 1.2,
            trail_dash: 0.05,
            trail_gap: 0.02,
        }
    }
}

impl SimParams {
    // Capture radius for one step of length `dt`.
    pub fn closing_distance(&self, dt: f64) -> f64 {
        (self.predators_speed - self.prey_speed) * dt
    }
}
