//! Run-control settings for `simulate`
//!
//! Selects the rest threshold and the budgets that stop
//! a run which never settles (e.g. zero friction)

use std::time::Duration;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub epsilon: f64, // speed below which the bob is at rest
    pub max_iters: usize, // hard cap on steps per run
    pub time_budget: Option<Duration>, // optional wall-clock cap per run
    pub record_trajectory: bool, // false keeps only the final state
}

pub const DEFAULT_EPSILON: f64 = 1e-7;
pub const DEFAULT_MAX_ITERS: usize = 100_000;

impl Default for Engine {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iters: DEFAULT_MAX_ITERS,
            time_budget: None,
            record_trajectory: true,
        }
    }
}

impl Engine {
    pub fn new(epsilon: f64, max_iters: usize) -> Self {
        Self { epsilon, max_iters, ..Self::default() }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SimError::InvalidConfig(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if self.max_iters == 0 {
            return Err(SimError::InvalidConfig("max_iters must be at least 1".into()));
        }
        Ok(())
    }
}
