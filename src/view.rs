//! Control surface for an interactive front end.
//!
//! No drawing happens here: a front end feeds key and mouse input into
//! `Controls`, calls `frame` once per rendered frame and shows `info_text`.
//! On screen the y axis points down, so the text panel flips y.

use log::debug;
use nalgebra::Vector2;

use crate::config::setup::parameters::display::DisplayParams;
use crate::state::SimState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub running: bool,
    pub time_scale: f64,
    pub zoom: f64,
    // Radians per second applied by `Turn` input.
    pub prey_rotation_speed: f64,
    scale_speed: f64,
    rotation_acceleration: f64,
    base_radius: f64,
}

impl Controls {
    pub fn new(display: &DisplayParams) -> Self {
        Controls {
            running: false,
            time_scale: 1.0,
            zoom: display.zoom,
            prey_rotation_speed: 1.0,
            scale_speed: display.scale_speed,
            rotation_acceleration: display.rotation_acceleration,
            base_radius: display.point_radius,
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn faster(&mut self) {
        self.time_scale *= 2.0;
    }

    pub fn slower(&mut self) {
        self.time_scale *= 0.5;
    }

    /// Zoom by a vertical drag of `dy` pixels.
    pub fn zoom_by(&mut self, dy: f64) -> f64 {
        let ratio = (self.scale_speed * dy).exp();
        self.zoom *= ratio;
        ratio
    }

    /// Marker radius in world units, so markers keep their size on screen.
    pub fn point_radius(&self) -> f64 {
        self.zoom * self.base_radius
    }

    pub fn accelerate_rotation(&mut self, dt: f64) {
        self.prey_rotation_speed *= (self.rotation_acceleration * dt).exp();
    }

    pub fn decelerate_rotation(&mut self, dt: f64) {
        self.prey_rotation_speed *= (-self.rotation_acceleration * dt).exp();
    }

    /// Apply one rendered frame of `real_elapsed` wall-clock seconds with the
    /// turn keys in `turns` held.
    ///
    /// Each held key is applied as its own rotation, and any of them hands the
    /// prey over to manual control. The simulation only advances while running.
    pub fn frame(&self, state: &mut SimState, real_elapsed: f64, turns: &[Turn]) {
        let elapsed = real_elapsed * self.time_scale;
        for turn in turns {
            let angle = self.prey_rotation_speed * elapsed;
            match turn {
                Turn::Left => state.rotate_prey_velocity(-angle),
                Turn::Right => state.rotate_prey_velocity(angle),
            }
        }
        if self.running {
            state.simulate(elapsed);
        } else {
            debug!("paused at t={}", state.time());
        }
    }
}

fn screen(v: &Vector2<f64>) -> String {
    format!("({}, {})", v.x, -v.y)
}

pub fn info_text(state: &SimState, controls: &Controls, compact: bool) -> String {
    let prey_velocity = state.prey_velocity();
    let mut lines = vec![
        format!("Timer: {}", state.time()),
        format!("Time scale: {}", controls.time_scale),
        format!("Simulation substeps: {}", state.substeps),
        format!("Prey position: {}", screen(&state.prey().position)),
        format!("Prey velocity: {}", screen(&prey_velocity)),
        format!("Prey speed: {}", prey_velocity.norm()),
    ];

    for (i, predator) in state.predators().iter().enumerate() {
        let velocity = predator.velocity;
        if compact {
            let status = match predator.when_reached {
                Some(t) => format!("[{}]", t),
                None => screen(&velocity),
            };
            lines.push(format!(
                "Predator {} {} {}",
                predator.lambda,
                screen(&predator.position),
                status
            ));
        } else {
            let reached = predator
                .when_reached
                .map_or_else(|| "-".to_string(), |t| t.to_string());
            lines.push(format!("Predator {}:", i + 1));
            lines.push(format!("|||Lambda: {}", predator.lambda));
            lines.push(format!("|||Position: {}", screen(&predator.position)));
            lines.push(format!("|||Velocity: {}", screen(&velocity)));
            lines.push(format!("|||Speed: {}", velocity.norm()));
            lines.push(format!("|||When reached: {}", reached));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::setup::SetupConfig;
    use approx::assert_relative_eq;

    const CONFIG: &str = "\
PreyPosition = 1 2
ScaleSpeed = 0.5
RotationAcceleration = 2
PointRadius = 10
Zoom = 0.1
Predator:
Position = 3 4
Lambda = 0.5
PreyControl:
1 0
";

    fn setup() -> (SimState, Controls) {
        let config = SetupConfig::parse(CONFIG).unwrap();
        let controls = Controls::new(&config.display);
        (SimState::new(&config), controls)
    }

    #[test]
    fn test_time_scale() {
        let (_, mut controls) = setup();
        controls.faster();
        controls.faster();
        controls.slower();
        assert_eq!(controls.time_scale, 2.0);
    }

    #[test]
    fn test_zoom() {
        let (_, mut controls) = setup();
        assert_relative_eq!(controls.point_radius(), 1.0, epsilon = 1e-12);
        let ratio = controls.zoom_by(2.0);
        assert_relative_eq!(ratio, 1f64.exp());
        assert_relative_eq!(controls.zoom, 0.1 * 1f64.exp());
    }

    #[test]
    fn test_rotation_acceleration() {
        let (_, mut controls) = setup();
        controls.accelerate_rotation(0.5);
        assert_relative_eq!(controls.prey_rotation_speed, 1f64.exp());
        controls.decelerate_rotation(0.5);
        assert_relative_eq!(controls.prey_rotation_speed, 1.0);
    }

    #[test]
    fn test_paused_frame() {
        let (mut state, controls) = setup();
        controls.frame(&mut state, 0.5, &[]);
        assert_eq!(state.time(), 0.0);
        assert!(state.move_by_plan());
    }

    #[test]
    fn test_running_frame() {
        let (mut state, mut controls) = setup();
        controls.toggle_running();
        controls.faster();
        controls.frame(&mut state, 0.25, &[]);
        assert_relative_eq!(state.time(), 0.5);
        assert_relative_eq!(state.prey().position, Vector2::new(1.5, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_steering_frame() {
        let (mut state, controls) = setup();
        controls.frame(&mut state, std::f64::consts::FRAC_PI_2, &[Turn::Right]);
        assert!(!state.move_by_plan());
        assert_relative_eq!(state.prey_velocity(), Vector2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_both_turn_keys_held() {
        let (mut state, controls) = setup();
        controls.frame(&mut state, 0.5, &[Turn::Left, Turn::Right]);
        assert!(!state.move_by_plan());
        assert_relative_eq!(state.prey_velocity(), Vector2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_info_text() {
        let (state, controls) = setup();
        let text = info_text(&state, &controls, false);
        assert!(text.starts_with("Timer: 0\n"));
        assert!(text.contains("Prey position: (1, -2)"));
        assert!(text.contains("Predator 1:\n|||Lambda: 0.5\n|||Position: (3, -4)"));
        assert!(text.contains("|||When reached: -"));

        let compact = info_text(&state, &controls, true);
        assert!(compact.ends_with("Predator 0.5 (3, -4) (0, -0)"));
    }
}
