/// Settings for a headless batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    // Simulated seconds per tick.
    pub step: f64,
    // Give up once the simulation clock passes this.
    pub t_max: Option<f64>,
    pub compact: bool,
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            step: 1e-3,
            t_max: None,
            compact: false,
        }
    }
}
