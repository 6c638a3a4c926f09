//! Configuration types for loading pendulum scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`MagnetConfig`]     – count and ring radius of the magnets
//! - [`ParametersConfig`] – physical constants and step size
//! - [`EngineConfig`]     – rest threshold and run budgets (optional)
//! - [`PendulumConfig`]   – initial state of each bob to simulate (optional)
//! - [`BasinConfig`]      – view used when rendering basins of attraction (optional)
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! magnets:
//!   count: 3
//!   radius: 1.0
//!
//! parameters:
//!   magnetic_exponent: 4.0
//!   magnetic_constant: 1.0
//!   friction: 0.1
//!   height: 0.5
//!   dt: 0.01
//!
//! engine:
//!   epsilon: 1.0e-7
//!   max_iters: 100000
//!   time_budget_ms: 2000    # optional
//!
//! pendulums:
//!   - x: [ 1.0, 1.0 ]
//!   - x: [ -0.8, 0.3 ]
//!     v: [ 0.0, 0.1 ]
//!
//! basin:
//!   resolution: 256
//!   center: [ 0.0, 0.0 ]
//!   extents: 4.0
//! ```
//!
//! [`crate::Scenario::build_scenario`] maps this into validated runtime types.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::engine::{DEFAULT_EPSILON, DEFAULT_MAX_ITERS};

/// Magnet ring layout
#[derive(Deserialize, Debug, Clone)]
pub struct MagnetConfig {
    pub count: usize, // number of magnets, evenly spaced
    pub radius: f64,  // radius of the circle they sit on
}

/// Physical constants and step size, in natural units (g = 1, m = 1)
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub magnetic_exponent: f64, // n such that the magnet force goes as K / r^(n+1)
    pub magnetic_constant: f64, // K, relative to gravity
    pub friction: f64,          // damping coefficient
    pub height: f64,            // bob height above the magnet plane
    pub dt: f64,                // time step
}

/// Stopping rules for each run
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64, // speed threshold for "at rest"
    #[serde(default = "default_max_iters")]
    pub max_iters: usize, // hard step cap
    #[serde(default)]
    pub time_budget_ms: Option<u64>, // optional wall-clock cap per run
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iters: DEFAULT_MAX_ITERS,
            time_budget_ms: None,
        }
    }
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_max_iters() -> usize {
    DEFAULT_MAX_ITERS
}

/// Initial state of one bob; velocity defaults to rest
#[derive(Deserialize, Debug, Clone)]
pub struct PendulumConfig {
    pub x: [f64; 2],
    #[serde(default)]
    pub v: [f64; 2],
}

/// Square view of the plane sampled for the basin map
#[derive(Deserialize, Debug, Clone)]
pub struct BasinConfig {
    pub resolution: usize, // pixels per side
    #[serde(default)]
    pub center: [f64; 2],
    pub extents: f64, // half width of the view
}

impl Default for BasinConfig {
    fn default() -> Self {
        Self {
            resolution: 256,
            center: [0.0, 0.0],
            extents: 4.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub magnets: MagnetConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub pendulums: Vec<PendulumConfig>,
    #[serde(default)]
    pub basin: BasinConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
