use log::debug;
use nalgebra::Vector2;

use crate::geometry::{
    angle_to_x,
    point::{normalize_to, unit_heading},
};

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub enum MovementSegment {
    // Direction is unit-less; only its orientation matters.
    Straight {
        direction: Vector2<f64>,
        duration: f64,
    },
    Rotating {
        // Radians per second, counter-clockwise positive.
        angular_speed: f64,
        duration: f64,
        // Angle from +x the prey snaps to on entering the segment.
        start_heading: Option<f64>,
    },
}

impl MovementSegment {
    pub fn duration(&self) -> f64 {
        match self {
            MovementSegment::Straight { duration, .. } => *duration,
            MovementSegment::Rotating { duration, .. } => *duration,
        }
    }

    fn set_duration(&mut self, value: f64) {
        match self {
            MovementSegment::Straight { duration, .. } => *duration = value,
            MovementSegment::Rotating { duration, .. } => *duration = value,
        }
    }

    pub fn start_heading(&self) -> Option<f64> {
        match self {
            MovementSegment::Straight { .. } => None,
            MovementSegment::Rotating { start_heading, .. } => *start_heading,
        }
    }

    /// Heading the prey faces when this segment begins, if the segment fixes one.
    pub fn initial_heading(&self) -> Option<f64> {
        match self {
            MovementSegment::Straight { direction, .. } => {
                (*direction != Vector2::zeros()).then(|| angle_to_x(direction))
            }
            MovementSegment::Rotating { start_heading, .. } => *start_heading,
        }
    }
}

/// The prey's scripted motion. Once closed, the last segment is the only
/// open-ended one.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct MovementProgram {
    segments: Vec<MovementSegment>,
}

impl MovementProgram {
    pub fn segments(&self) -> &[MovementSegment] {
        &self.segments
    }

    pub fn get(&self, i: usize) -> Option<&MovementSegment> {
        self.segments.get(i)
    }

    pub fn first(&self) -> Option<&MovementSegment> {
        self.segments.first()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drop a trailing zero-duration segment, which only holds a place until
    /// the next directive arrives.
    fn discard_placeholder(&mut self) {
        if self.segments.last().is_some_and(|s| s.duration() == 0.0) {
            self.segments.pop();
        }
    }

    fn push(&mut self, segment: MovementSegment) {
        self.segments.push(segment);
    }

    /// Append with placeholder coalescing. True when `segment` became the
    /// first segment of the program.
    pub fn append(&mut self, segment: MovementSegment) -> bool {
        self.discard_placeholder();
        self.push(segment);
        self.segments.len() == 1
    }

    pub fn close(&mut self) {
        if let Some(last) = self.segments.last_mut() {
            last.set_duration(f64::INFINITY);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramCursor {
    index: usize,
    next_boundary: f64,
}

impl ProgramCursor {
    pub fn new(program: &MovementProgram) -> Self {
        ProgramCursor {
            index: 0,
            next_boundary: program.first().map_or(f64::INFINITY, |s| s.duration()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next_boundary(&self) -> f64 {
        self.next_boundary
    }
}

/// Advance `cursor` to the segment active at time `t` and return the prey
/// velocity for a step of length `dt`.
///
/// A single call may cross several short segments. Entering a rotating
/// segment with a start heading snaps the velocity to that heading before
/// the rotation of this step is applied.
pub fn prey_velocity(
    program: &MovementProgram,
    cursor: &mut ProgramCursor,
    t: f64,
    dt: f64,
    velocity: Vector2<f64>,
    prey_speed: f64,
) -> Vector2<f64> {
    let mut velocity = velocity;
    while t >= cursor.next_boundary && cursor.index + 1 < program.len() {
        cursor.index += 1;
        let segment = &program.segments[cursor.index];
        cursor.next_boundary += segment.duration();
        debug!(
            "t={}: entering movement segment {} ({:?})",
            t, cursor.index, segment
        );
        if let Some(heading) = segment.start_heading() {
            velocity = normalize_to(unit_heading(heading), prey_speed);
        }
    }

    match program.get(cursor.index) {
        Some(MovementSegment::Straight { direction, .. }) => normalize_to(*direction, prey_speed),
        Some(MovementSegment::Rotating { angular_speed, .. }) => {
            let angle = angle_to_x(&velocity) + dt * angular_speed;
            normalize_to(unit_heading(angle), prey_speed)
        }
        None => velocity,
    }
}
