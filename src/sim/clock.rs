//! Fixed timestep accumulator
//!
//! Render frames arrive at whatever rate the host manages; the simulation
//! always advances in whole `SIM_DT` steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Leftover time not yet consumed by a step
    #[inline]
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame delta and return how many fixed steps to run.
    ///
    /// Frame deltas are capped at 0.1 s, and time beyond `max_substeps`
    /// steps is discarded so a stalled host cannot queue up a backlog.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
