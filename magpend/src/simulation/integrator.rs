//! Fixed-step time integrator for the pendulum
//!
//! Provides the damped semi-implicit Euler `step` and the `simulate`
//! loop that repeats it until the bob comes to rest or a budget runs out

use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{Result, SimError};
use super::engine::Engine;
use super::forces::{Acceleration, PendulumField};
use super::magnets::MagnetSet;
use super::params::Parameters;
use super::states::{is_finite, State, Trajectory};

/// Why a `simulate` run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Speed fell below epsilon after the last step
    Converged,
    /// `max_iters` steps taken without settling
    IterationCap,
    /// Wall-clock budget elapsed before settling
    TimeBudget,
}

/// Outcome of one `simulate` run
///
/// `trajectory` holds the position after every step except the one that
/// converged; `final_state` always holds the state after the last step taken
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub trajectory: Trajectory,
    pub final_state: State,
    pub steps: usize,
    pub termination: Termination,
}

impl SimulationRun {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Advance `state` in place by one step of `dt` under `field`.
/// On error `state` is left as it was
pub fn step_in_place<F: Acceleration>(state: &mut State, dt: f64, friction: f64, field: &F) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::InvalidConfig(format!("dt must be positive, got {dt}")));
    }

    let force = field.force(&state.x)?;

    // Kick with the current force, then damp, then drift with the damped velocity.
    // The order fixes the discretization
    let mut v = state.v + dt * force;
    v *= 1.0 - dt * friction;
    let x = state.x + dt * v;

    if !is_finite(&v) {
        return Err(SimError::NonFinite { step: 0, quantity: "velocity" });
    }
    if !is_finite(&x) {
        return Err(SimError::NonFinite { step: 0, quantity: "position" });
    }

    state.v = v;
    state.x = x;
    Ok(())
}

/// Advance the bob by one semi-implicit Euler step:
/// - v <- v + dt * F(x)
/// - v <- v * (1 - dt * friction)
/// - x <- x + dt * v
pub fn step(state: &State, dt: f64, magnets: &MagnetSet, params: &Parameters) -> Result<State> {
    Parameters { dt, ..params.clone() }.validate()?;
    let field = PendulumField::new(magnets, params);
    let mut next = *state;
    step_in_place(&mut next, dt, params.friction, &field)?;
    Ok(next)
}

/// Run from `initial` until `|v| < epsilon` or `max_iters` steps
pub fn simulate(
    initial: &State,
    dt: f64,
    magnets: &MagnetSet,
    params: &Parameters,
    epsilon: f64,
    max_iters: usize,
) -> Result<SimulationRun> {
    let params = Parameters { dt, ..params.clone() };
    simulate_with(initial, magnets, &params, &Engine::new(epsilon, max_iters))
}

/// Run from `initial` with the step size in `params` and the stopping
/// rules in `engine`
pub fn simulate_with(initial: &State, magnets: &MagnetSet, params: &Parameters, engine: &Engine) -> Result<SimulationRun> {
    params.validate()?;
    engine.validate()?;
    if !initial.is_finite() {
        return Err(SimError::NonFinite { step: 0, quantity: "initial state" });
    }

    let field = PendulumField::new(magnets, params);
    let started = Instant::now();

    let mut state = *initial;
    let mut trajectory = Trajectory::new();
    let mut termination = Termination::IterationCap;
    let mut steps = 0;

    while steps < engine.max_iters {
        step_in_place(&mut state, params.dt, params.friction, &field).map_err(|e| at_step(e, steps + 1))?;
        steps += 1;

        // The converging step is not recorded
        if state.speed() < engine.epsilon {
            termination = Termination::Converged;
            break;
        }
        if engine.record_trajectory {
            trajectory.push(state.x);
        }
        trace!("step {steps}: x = ({:.6}, {:.6}), |v| = {:.3e}", state.x.x, state.x.y, state.speed());

        if let Some(budget) = engine.time_budget {
            if started.elapsed() >= budget {
                termination = Termination::TimeBudget;
                break;
            }
        }
    }

    match termination {
        Termination::Converged => debug!(
            "converged after {steps} steps at ({:.4}, {:.4})",
            state.x.x, state.x.y
        ),
        Termination::IterationCap => debug!("no convergence within {} steps", engine.max_iters),
        Termination::TimeBudget => debug!("time budget exhausted after {steps} steps"),
    }

    Ok(SimulationRun {
        trajectory,
        final_state: state,
        steps,
        termination,
    })
}

/// Run every initial state independently, in parallel.
/// Results come back in the order of `initials`
pub fn simulate_batch(initials: &[State], magnets: &MagnetSet, params: &Parameters, engine: &Engine) -> Vec<Result<SimulationRun>> {
    initials
        .par_iter()
        .map(|initial| simulate_with(initial, magnets, params, engine))
        .collect()
}

fn at_step(err: SimError, step: usize) -> SimError {
    match err {
        SimError::NonFinite { quantity, .. } => SimError::NonFinite { step, quantity },
        other => other,
    }
}
