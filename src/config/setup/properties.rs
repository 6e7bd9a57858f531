//! Property name to setter tables for the `key = value` lines.
//!
//! Each setter returns `None` when the value does not fit the property's
//! numeric grammar or range.

use nalgebra::Vector2;

use crate::config::{
    grammar::{expect_numbers, Sign},
    LineError,
};
use crate::state::Rgb;

use super::{agents::PredatorDraft, SetupConfig};

pub type GlobalSetter = fn(&mut SetupConfig, &str) -> Option<()>;
pub type PredatorSetter = fn(&mut PredatorDraft, &str) -> Option<()>;

pub const GLOBAL_SETTERS: &[(&str, GlobalSetter)] = &[
    ("PreyPosition", set_prey_position),
    ("PreySpeed", set_prey_speed),
    ("PredatorsSpeed", set_predators_speed),
    ("PreyColor", set_prey_color),
    ("BackgroundColor", set_background_color),
    ("TextColor", set_text_color),
    ("CharacterSize", set_character_size),
    ("PointRadius", set_point_radius),
    ("Trail", set_trail),
    ("ScaleSpeed", set_scale_speed),
    ("RotationAcceleration", set_rotation_acceleration),
    ("Zoom", set_zoom),
];

pub const PREDATOR_SETTERS: &[(&str, PredatorSetter)] = &[
    ("Position", set_predator_position),
    ("Color", set_predator_color),
    ("Lambda", set_lambda),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, setter)| *setter)
}

fn apply<T>(
    table: &[(&str, fn(&mut T, &str) -> Option<()>)],
    target: &mut T,
    key: &str,
    value: &str,
) -> Result<(), LineError> {
    let setter = lookup(table, key).ok_or_else(|| LineError::UnknownProperty(key.to_string()))?;
    setter(target, value).ok_or_else(|| LineError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub fn set_global(config: &mut SetupConfig, key: &str, value: &str) -> Result<(), LineError> {
    apply(GLOBAL_SETTERS, config, key, value)
}

pub fn set_predator(draft: &mut PredatorDraft, key: &str, value: &str) -> Result<(), LineError> {
    apply(PREDATOR_SETTERS, draft, key, value)
}

// Value parsers.

fn vector(value: &str) -> Option<Vector2<f64>> {
    let xs = expect_numbers(value, 2, Sign::Any)?;
    Some(Vector2::new(xs[0], xs[1]))
}

fn non_negative(value: &str) -> Option<f64> {
    Some(expect_numbers(value, 1, Sign::NonNegative)?[0])
}

fn positive(value: &str) -> Option<f64> {
    non_negative(value).filter(|x| *x > 0.0)
}

fn integer(value: &str) -> Option<u32> {
    let x = non_negative(value)?;
    (x.fract() == 0.0 && x <= u32::MAX as f64).then_some(x as u32)
}

fn color(value: &str) -> Option<Rgb> {
    let channels = expect_numbers(value, 3, Sign::NonNegative)?;
    let channel = |x: f64| (x.fract() == 0.0 && x <= 255.0).then_some(x as u8);
    Some(Rgb::new(
        channel(channels[0])?,
        channel(channels[1])?,
        channel(channels[2])?,
    ))
}

// Global setters.

fn set_prey_position(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.prey.position = vector(value)?;
    Some(())
}

fn set_prey_speed(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.sim_params.prey_speed = positive(value)?;
    Some(())
}

fn set_predators_speed(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.sim_params.predators_speed = positive(value)?;
    Some(())
}

fn set_prey_color(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.prey.color = color(value)?;
    Some(())
}

fn set_background_color(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.background_color = color(value)?;
    Some(())
}

fn set_text_color(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.text_color = color(value)?;
    Some(())
}

fn set_character_size(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.character_size = integer(value)?;
    Some(())
}

fn set_point_radius(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.point_radius = non_negative(value)?;
    Some(())
}

fn set_trail(config: &mut SetupConfig, value: &str) -> Option<()> {
    let xs = expect_numbers(value, 2, Sign::NonNegative)?;
    config.sim_params.trail_dash = xs[0];
    config.sim_params.trail_gap = xs[1];
    Some(())
}

fn set_scale_speed(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.scale_speed = non_negative(value)?;
    Some(())
}

fn set_rotation_acceleration(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.rotation_acceleration = non_negative(value)?;
    Some(())
}

fn set_zoom(config: &mut SetupConfig, value: &str) -> Option<()> {
    config.display.zoom = non_negative(value)?;
    Some(())
}

// Predator setters.

fn set_predator_position(draft: &mut PredatorDraft, value: &str) -> Option<()> {
    draft.position = vector(value)?;
    Some(())
}

fn set_predator_color(draft: &mut PredatorDraft, value: &str) -> Option<()> {
    draft.color = Some(color(value)?);
    Some(())
}

fn set_lambda(draft: &mut PredatorDraft, value: &str) -> Option<()> {
    draft.lambda = non_negative(value).filter(|l| *l <= 1.0)?;
    Some(())
}
