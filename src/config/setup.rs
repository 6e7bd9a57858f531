pub mod agents;
pub mod parameters;
pub mod properties;

use std::{fmt, fs::File, io::Read, path::Path};

use log::{debug, warn};
use nalgebra::Vector2;

use crate::dynamics::movement::{MovementProgram, MovementSegment};

use self::{
    agents::{PredatorDraft, PredatorSetup, PreySetup},
    parameters::{display::DisplayParams, simulation::SimParams},
};
use super::{
    grammar::{self, ControlLine, SectionLine},
    ConfigError, LineError,
};

/// A fully validated configuration: defaults filled in, predator colours
/// resolved and the movement program closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupConfig {
    pub sim_params: SimParams,
    pub display: DisplayParams,
    pub prey: PreySetup,
    pub predators: Vec<PredatorSetup>,
    pub program: MovementProgram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Started,
    Predator,
    Control,
}

#[derive(Default)]
struct Reader {
    config: SetupConfig,
    predators: Vec<PredatorDraft>,
    // Bootstrap heading set by a leading rotate directive.
    bootstrap_heading: Option<f64>,
}

impl Reader {
    fn read_section_line(&mut self, section: &mut Section, line: &str) -> Result<(), LineError> {
        match grammar::section_line(line) {
            SectionLine::Blank => Ok(()),
            SectionLine::Property { key, value } => match *section {
                Section::Started => properties::set_global(&mut self.config, key, value),
                _ => match self.predators.last_mut() {
                    Some(draft) => properties::set_predator(draft, key, value),
                    None => Err(LineError::Unrecognized),
                },
            },
            SectionLine::PredatorMarker => {
                self.predators.push(PredatorDraft::default());
                *section = Section::Predator;
                Ok(())
            }
            SectionLine::ControlMarker => {
                *section = Section::Control;
                Ok(())
            }
            SectionLine::Unrecognized => Err(LineError::Unrecognized),
        }
    }

    fn read_control_line(&mut self, line: &str) -> Result<(), LineError> {
        let segment = match grammar::control_line(line) {
            ControlLine::Blank => return Ok(()),
            ControlLine::Unrecognized => return Err(LineError::Unrecognized),
            ControlLine::Straight { x, y, duration } => MovementSegment::Straight {
                direction: Vector2::new(x.value, y.value),
                duration: duration.map_or(0.0, |d| d.value),
            },
            ControlLine::Rotate {
                speed,
                duration,
                start,
            } => {
                if duration.is_some_and(|d| d.degrees) {
                    return Err(LineError::DegreeDuration);
                }
                MovementSegment::Rotating {
                    angular_speed: speed.radians(),
                    duration: duration.map_or(0.0, |d| d.value),
                    start_heading: start.map(|s| s.radians()),
                }
            }
        };

        let start_heading = segment.start_heading();
        if self.config.program.append(segment) && start_heading.is_some() {
            self.bootstrap_heading = start_heading;
        }
        Ok(())
    }

    fn finish(self) -> SetupConfig {
        let Reader {
            mut config,
            predators,
            bootstrap_heading,
        } = self;
        config.predators = predators.into_iter().map(PredatorDraft::resolve).collect();
        // A first segment with its own heading overrides the bootstrap one.
        let first_fixes_heading = config
            .program
            .first()
            .and_then(MovementSegment::initial_heading)
            .is_some();
        if !first_fixes_heading {
            config.prey.bootstrap_heading = bootstrap_heading;
        }
        config.program.close();
        config
    }
}

impl SetupConfig {
    /// Read a configuration, reporting the last offending line if any line fails.
    ///
    /// Reading always continues to the end of the text so that every bad line
    /// gets logged.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut reader = Reader::default();
        let mut section = Section::Started;
        let mut last_failure: Option<(usize, &str)> = None;
        let mut failures = 0;

        for (i, line) in text.lines().enumerate() {
            let result = match section {
                Section::Started | Section::Predator => reader.read_section_line(&mut section, line),
                Section::Control => reader.read_control_line(line),
            };
            if let Err(e) = result {
                warn!("Line {}: {}: \"{}\"", i + 1, e, line);
                failures += 1;
                last_failure = Some((i + 1, line));
            }
        }

        if let Some((line, text)) = last_failure {
            return Err(ConfigError::Syntax {
                line,
                text: text.to_string(),
                failures,
            });
        }
        if reader.config.program.is_empty() {
            return Err(ConfigError::NoControl);
        }

        let config = reader.finish();
        debug!(
            "Read configuration with {} predator(s) and {} movement segment(s)",
            config.predators.len(),
            config.program.len()
        );
        Ok(config)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::parse(&contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

// Canonical text form. Parsing it back yields an equal `SetupConfig`.
impl fmt::Display for SetupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SetupConfig {
            sim_params: sim,
            display,
            prey,
            predators,
            program,
        } = self;

        writeln!(f, "PreyPosition = {} {}", prey.position.x, prey.position.y)?;
        writeln!(f, "PreySpeed = {}", sim.prey_speed)?;
        writeln!(f, "PredatorsSpeed = {}", sim.predators_speed)?;
        writeln!(f, "PreyColor = {}", prey.color)?;
        writeln!(f, "BackgroundColor = {}", display.background_color)?;
        writeln!(f, "TextColor = {}", display.text_color)?;
        writeln!(f, "CharacterSize = {}", display.character_size)?;
        writeln!(f, "PointRadius = {}", display.point_radius)?;
        writeln!(f, "Trail = {} {}", sim.trail_dash, sim.trail_gap)?;
        writeln!(f, "ScaleSpeed = {}", display.scale_speed)?;
        writeln!(f, "RotationAcceleration = {}", display.rotation_acceleration)?;
        writeln!(f, "Zoom = {}", display.zoom)?;

        for predator in predators {
            writeln!(f)?;
            writeln!(f, "{}", grammar::PREDATOR_MARKER)?;
            writeln!(f, "Position = {} {}", predator.position.x, predator.position.y)?;
            writeln!(f, "Color = {}", predator.color)?;
            writeln!(f, "Lambda = {}", predator.lambda)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", grammar::CONTROL_MARKER)?;

        // Written back as the leading placeholder rotation it was read from.
        if let Some(heading) = prey.bootstrap_heading {
            writeln!(f, "{} 0 0 {}", grammar::ROTATE_KEYWORD, heading)?;
        }

        let last = program.len().saturating_sub(1);
        for (i, segment) in program.segments().iter().enumerate() {
            // The open-ended last segment is written without a duration.
            let duration = (i != last).then(|| segment.duration());
            match segment {
                MovementSegment::Straight { direction, .. } => {
                    write!(f, "{} {}", direction.x, direction.y)?;
                    if let Some(duration) = duration {
                        write!(f, " {}", duration)?;
                    }
                }
                MovementSegment::Rotating {
                    angular_speed,
                    start_heading,
                    ..
                } => {
                    write!(f, "{} {}", grammar::ROTATE_KEYWORD, angular_speed)?;
                    match (duration, start_heading) {
                        (Some(duration), Some(start)) => write!(f, " {} {}", duration, start)?,
                        (Some(duration), None) => write!(f, " {}", duration)?,
                        (None, Some(start)) => write!(f, " 0 {}", start)?,
                        (None, None) => {}
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
