use nalgebra::Vector2;

use crate::state::Rgb;

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct PreySetup {
    pub position: Vector2<f64>,
    pub color: Rgb,
    // Drawn heading from a leading placeholder rotation, as an angle from +x.
    // Only kept when the first segment does not fix a heading of its own.
    pub bootstrap_heading: Option<f64>,
}

impl Default for PreySetup {
    fn default() -> Self {
        PreySetup {
            position: Vector2::zeros(),
            color: Rgb::new(0, 0, 255),
            bootstrap_heading: None,
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct PredatorSetup {
    pub lambda: f64,
    pub position: Vector2<f64>,
    pub color: Rgb,
}

// A predator block still being read; its colour is only known once the block is closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredatorDraft {
    pub lambda: f64,
    pub position: Vector2<f64>,
    pub color: Option<Rgb>,
}

impl PredatorDraft {
    pub fn resolve(self) -> PredatorSetup {
        PredatorSetup {
            lambda: self.lambda,
            position: self.position,
            color: self
                .color
                .unwrap_or_else(|| Rgb::pursuit_blend(self.lambda)),
        }
    }
}
