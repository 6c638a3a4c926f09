//! Build fully-initialized pendulum scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - run-control settings (`Engine`)
//! - physical constants (`Parameters`)
//! - the magnet ring (`MagnetSet`)
//! - one initial `State` per configured bob
//! - the view used for basin maps (`BasinGrid`)
//!
//! Everything is validated here, so a built `Scenario` is always runnable

use std::time::Duration;

use log::{info, warn};

use crate::configuration::config::{PendulumConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::basin::{BasinGrid, BasinMap};
use crate::simulation::engine::Engine;
use crate::simulation::integrator::{simulate_batch, SimulationRun, Termination};
use crate::simulation::magnets::MagnetSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, State};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub magnets: MagnetSet,
    pub pendulums: Vec<State>,
    pub basin: BasinGrid,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Magnets: evenly spaced on the configured ring
        let magnets = MagnetSet::ring(cfg.magnets.count, cfg.magnets.radius)?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            magnetic_exponent: p_cfg.magnetic_exponent,
            magnetic_constant: p_cfg.magnetic_constant,
            friction: p_cfg.friction,
            height: p_cfg.height,
            dt: p_cfg.dt,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            epsilon: e_cfg.epsilon,
            max_iters: e_cfg.max_iters,
            time_budget: e_cfg.time_budget_ms.map(Duration::from_millis),
            record_trajectory: true,
        };
        engine.validate()?;

        // Bobs: map `PendulumConfig` -> runtime `State`
        let pendulums = cfg.pendulums.iter().enumerate().map(|(i, pc): (usize, &PendulumConfig)| {
            let state = State {
                x: NVec2::new(pc.x[0], pc.x[1]),
                v: NVec2::new(pc.v[0], pc.v[1]),
            };
            if !state.is_finite() {
                return Err(SimError::InvalidConfig(format!("pendulum {i} has a non-finite position or velocity")));
            }
            Ok(state)
        }).collect::<Result<Vec<_>>>()?;

        let b_cfg = cfg.basin;
        let basin = BasinGrid::new(b_cfg.resolution, NVec2::new(b_cfg.center[0], b_cfg.center[1]), b_cfg.extents)?;

        Ok(Self {
            engine,
            parameters,
            magnets,
            pendulums,
            basin,
        })
    }

    /// Simulate every configured bob, in parallel, in configuration order
    pub fn run(&self) -> Vec<Result<SimulationRun>> {
        info!("simulating {} pendulum(s) over {} magnets", self.pendulums.len(), self.magnets.len());
        let runs = simulate_batch(&self.pendulums, &self.magnets, &self.parameters, &self.engine);

        for (i, run) in runs.iter().enumerate() {
            match run {
                Ok(r) if r.termination == Termination::Converged => {
                    let (magnet, d2) = self.magnets.nearest(&r.final_state.x);
                    info!("pendulum {i}: settled near magnet {magnet} (distance {:.4}) after {} steps", d2.sqrt(), r.steps);
                }
                Ok(r) => warn!("pendulum {i}: stopped by {:?} after {} steps", r.termination, r.steps),
                Err(e) => warn!("pendulum {i}: {e}"),
            }
        }
        runs
    }

    pub fn render_basin(&self) -> Result<BasinMap> {
        self.basin.render(&self.magnets, &self.parameters, &self.engine)
    }
}
