use crate::state::Rgb;

// Tuning for whatever draws the simulation. Nothing here affects the dynamics.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct DisplayParams {
    pub background_color: Rgb,
    pub text_color: Rgb,
    pub character_size: u32,
    // World-space radius of an agent marker at zoom 1.
    pub point_radius: f64,
    pub zoom: f64,
    // Zoom sensitivity per pixel of vertical mouse drag.
    pub scale_speed: f64,
    // Growth rate of the interactive prey turn speed.
    pub rotation_acceleration: f64,
}

impl Default for DisplayParams {
    fn default() -> Self {
        DisplayParams {
            background_color: Rgb::new(247, 247, 247),
            text_color: Rgb::new(16, 16, 16),
            character_size: 20,
            point_radius: 15.0,
            zoom: 0.02,
            scale_speed: 0.003,
            rotation_acceleration: 1.0,
        }
    }
}
