pub mod guidance;
pub mod movement;
pub mod trail;

use log::{debug, info, warn};
use nalgebra::Vector2;

use crate::config::run::RunParams;
use crate::dynamics::guidance::steering_direction;
use crate::dynamics::movement::prey_velocity;
use crate::geometry::{
    distance,
    point::{display_rotation, normalize_to},
};
use crate::state::SimState;

impl SimState {
    /// Advance by `elapsed` seconds in `substeps` equal slices.
    pub fn simulate(&mut self, elapsed: f64) {
        if self.substeps <= 0 {
            return;
        }
        let dt = elapsed / self.substeps as f64;
        for _ in 0..self.substeps {
            self.single_step(dt);
        }
    }

    fn single_step(&mut self, dt: f64) {
        let prey_speed = self.sim_params.prey_speed;
        let predators_speed = self.sim_params.predators_speed;

        // Capture uses the previous step's length.
        let closing = self.sim_params.closing_distance(self.elapsed_last);
        for (i, predator) in self.predators.iter_mut().enumerate() {
            if predator.is_active() && distance(&self.prey.position, &predator.position) < closing {
                debug!("t={}: predator {} (lambda={}) reached the prey", self.t, i, predator.lambda);
                predator.when_reached = Some(self.t);
            }
        }

        if self.move_by_plan {
            self.prey.velocity = prey_velocity(
                &self.program,
                &mut self.cursor,
                self.t,
                dt,
                self.prey.velocity,
                prey_speed,
            );
        }
        if let Some(heading) = display_rotation(&self.prey.velocity) {
            self.prey.heading = heading;
        }

        for predator in self.predators.iter_mut().filter(|p| p.is_active()) {
            let direction = steering_direction(
                predator.lambda,
                &predator.position,
                &self.prey.position,
                &self.prey.velocity,
                prey_speed,
                predators_speed,
            );
            let movement = normalize_to(direction, predators_speed * dt);
            predator.position += movement;
            predator.velocity = if dt == 0.0 {
                Vector2::zeros()
            } else {
                movement / dt
            };
            if let Some(heading) = display_rotation(&direction) {
                predator.heading = heading;
            }
        }

        self.prey.position += normalize_to(self.prey.velocity, prey_speed * dt);

        if self.trail_timer.tick(dt) {
            for predator in self.predators.iter_mut().filter(|p| p.is_active()) {
                predator.trail.push(predator.position, predator.color);
            }
            self.prey.trail.push(self.prey.position, self.prey.color);
        }

        self.t += dt;
        self.elapsed_last = dt;
    }
}

/// Outcome of a headless run for one predator.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub predator: usize,
    pub lambda: f64,
    pub reached_at: Option<f64>,
}

impl CaptureReport {
    pub fn line(&self, compact: bool) -> String {
        let reached_at = match self.reached_at {
            Some(t) => t.to_string(),
            None => "none".to_string(),
        };
        if compact {
            format!("{} {}", self.lambda, reached_at)
        } else {
            format!("Lambda {} reached at {}", self.lambda, reached_at)
        }
    }
}

/// Tick until every predator has reached the prey, or until `t_max`.
pub fn run_headless(state: &mut SimState, run_params: &RunParams) -> Vec<CaptureReport> {
    info!(
        "Running {} predator(s) with step {}s",
        state.predators().len(),
        run_params.step
    );

    while !state.all_reached() {
        if let Some(t_max) = run_params.t_max {
            if state.time() >= t_max {
                warn!("Stopping at t={}s with predators still chasing", state.time());
                break;
            }
        }
        let t_before = state.time();
        state.simulate(run_params.step);
        if state.time() <= t_before {
            warn!("Simulation time does not advance with step {}s, stopping", run_params.step);
            break;
        }
    }
    info!("Finished at t={}s", state.time());

    state
        .predators()
        .iter()
        .enumerate()
        .map(|(predator, p)| CaptureReport {
            predator,
            lambda: p.lambda,
            reached_at: p.when_reached,
        })
        .collect()
}
