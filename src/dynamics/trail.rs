/// Alternates between a dash phase and a gap phase. A sample is due at every
/// phase change, so each dash is bounded by a pair of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailTimer {
    dash: f64,
    gap: f64,
    remaining: f64,
    in_gap: bool,
}

impl TrailTimer {
    pub fn new(dash: f64, gap: f64) -> Self {
        // Starts as an expired gap so the first tick opens a dash.
        TrailTimer {
            dash,
            gap,
            remaining: 0.0,
            in_gap: true,
        }
    }

    /// Advance by `dt`; true when a sample should be taken this tick.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        if self.remaining >= 0.0 {
            return false;
        }
        self.remaining += if self.in_gap { self.dash } else { self.gap };
        self.in_gap = !self.in_gap;
        true
    }

    pub fn in_gap(&self) -> bool {
        self.in_gap
    }
}
