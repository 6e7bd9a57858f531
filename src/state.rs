use std::fmt;

use log::debug;
use nalgebra::Vector2;

use crate::{
    config::setup::{
        parameters::{display::DisplayParams, simulation::SimParams},
        SetupConfig,
    },
    dynamics::{
        movement::{MovementProgram, MovementSegment, ProgramCursor},
        trail::TrailTimer,
    },
    geometry::{
        angle_to_x,
        point::{display_rotation, normalize_to, unit_heading},
    },
};

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Red for parallel navigation, green for pure pursuit.
    pub fn pursuit_blend(lambda: f64) -> Self {
        let channel = |x: f64| (255.0 * x).floor().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(lambda), channel(1.0 - lambda), 0)
    }
}

// Same layout as a colour value in the configuration text.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vector2<f64>,
    pub color: Rgb,
}

/// Sampled past positions. Consecutive pairs of samples form the drawn dashes.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct Trail {
    samples: Vec<TrailSample>,
}

impl Trail {
    pub fn push(&mut self, position: Vector2<f64>, color: Rgb) {
        self.samples.push(TrailSample { position, color });
    }

    pub fn samples(&self) -> &[TrailSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn dashes(&self) -> impl Iterator<Item = (&TrailSample, &TrailSample)> {
        self.samples.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Prey {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub color: Rgb,
    // Display rotation in degrees.
    pub heading: f64,
    pub trail: Trail,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Predator {
    pub lambda: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub color: Rgb,
    pub heading: f64,
    pub trail: Trail,
    // Set once, at the first capture.
    pub when_reached: Option<f64>,
}

impl Predator {
    pub fn is_active(&self) -> bool {
        self.when_reached.is_none()
    }
}

/// A running chase. Only buildable from a validated `SetupConfig`.
#[derive(Debug, Clone)]
pub struct SimState {
    // Slices per `simulate` call; zero or less makes `simulate` a no-op.
    pub substeps: i32,
    pub(crate) t: f64,
    pub(crate) elapsed_last: f64,
    pub(crate) move_by_plan: bool,
    pub(crate) cursor: ProgramCursor,
    pub(crate) trail_timer: TrailTimer,
    pub(crate) program: MovementProgram,
    pub(crate) sim_params: SimParams,
    pub(crate) display: DisplayParams,
    pub(crate) prey: Prey,
    pub(crate) predators: Vec<Predator>,
}

impl SimState {
    pub fn new(config: &SetupConfig) -> SimState {
        let sim_params = config.sim_params.clone();
        // Only the first segment sets off the prey; a bootstrap heading is just drawn.
        let start_heading = config
            .program
            .first()
            .and_then(MovementSegment::initial_heading);
        let velocity = start_heading.map_or_else(Vector2::zeros, |h| {
            normalize_to(unit_heading(h), sim_params.prey_speed)
        });
        let heading = start_heading
            .or(config.prey.bootstrap_heading)
            .and_then(|h| display_rotation(&unit_heading(h)))
            .unwrap_or(0.0);
        let prey = Prey {
            position: config.prey.position,
            velocity,
            color: config.prey.color,
            heading,
            trail: Trail::default(),
        };
        let predators = config
            .predators
            .iter()
            .map(|p| Predator {
                lambda: p.lambda,
                position: p.position,
                velocity: Vector2::zeros(),
                color: p.color,
                heading: 0.0,
                trail: Trail::default(),
                when_reached: None,
            })
            .collect();
        debug!(
            "SimState::new(prey at {:?}, velocity {:?})",
            prey.position, prey.velocity
        );

        SimState {
            substeps: 1,
            t: 0.0,
            elapsed_last: 0.0,
            move_by_plan: true,
            cursor: ProgramCursor::new(&config.program),
            trail_timer: TrailTimer::new(sim_params.trail_dash, sim_params.trail_gap),
            program: config.program.clone(),
            sim_params,
            display: config.display.clone(),
            prey,
            predators,
        }
    }

    pub fn prey(&self) -> &Prey {
        &self.prey
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn sim_params(&self) -> &SimParams {
        &self.sim_params
    }

    pub fn display(&self) -> &DisplayParams {
        &self.display
    }

    pub fn program(&self) -> &MovementProgram {
        &self.program
    }

    pub fn cursor(&self) -> &ProgramCursor {
        &self.cursor
    }

    pub fn move_by_plan(&self) -> bool {
        self.move_by_plan
    }

    pub fn prey_velocity(&self) -> Vector2<f64> {
        normalize_to(self.prey.velocity, self.sim_params.prey_speed)
    }

    pub fn predator_velocity(&self, i: usize) -> Option<Vector2<f64>> {
        self.predators.get(i).map(|p| p.velocity)
    }

    pub fn all_reached(&self) -> bool {
        self.predators.iter().all(|p| !p.is_active())
    }

    // Construction from an unchecked configuration is impossible, so every state is valid.
    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn add_substep(&mut self) {
        self.substeps += 1;
    }

    // Never below one through this path; `substeps` itself may be set lower.
    pub fn remove_substep(&mut self) {
        if self.substeps > 1 {
            self.substeps -= 1;
        }
    }

    /// Steer the prey by hand. Plan-driven motion stays off from here on.
    pub fn set_prey_velocity(&mut self, velocity: Vector2<f64>) {
        self.take_manual_control();
        self.prey.velocity = normalize_to(velocity, self.sim_params.prey_speed);
        if let Some(heading) = display_rotation(&self.prey.velocity) {
            self.prey.heading = heading;
        }
    }

    /// Turn the prey counter-clockwise by `angle` radians.
    pub fn rotate_prey_velocity(&mut self, angle: f64) {
        let current = angle_to_x(&self.prey.velocity);
        self.set_prey_velocity(unit_heading(current + angle));
    }

    pub fn set_prey_position(&mut self, position: Vector2<f64>) {
        self.prey.position = position;
    }

    fn take_manual_control(&mut self) {
        if self.move_by_plan {
            debug!("t={}: prey switched to manual control", self.t);
            self.move_by_plan = false;
        }
    }
}
