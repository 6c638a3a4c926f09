use std::hint::black_box;
use std::time::Instant;

use crate::error::Result;
use crate::simulation::basin::BasinGrid;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{Acceleration, PendulumField};
use crate::simulation::integrator::{simulate_batch, simulate_with};
use crate::simulation::magnets::MagnetSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, State};

/// Time one force evaluation for rings of increasing size
pub fn bench_force_field() -> Result<()> {
    let counts = [3, 6, 12, 24, 48, 96];
    let evals = 200_000;
    let params = Parameters::default();

    for count in counts {
        let magnets = MagnetSet::ring(count, 1.0)?;
        let field = PendulumField::new(&magnets, &params);
        let samples = make_starts(64, 2.0);

        // Warm up
        for x in &samples {
            black_box(field.force(&x.x)?);
        }

        let t0 = Instant::now();
        for i in 0..evals {
            black_box(field.force(&samples[i % samples.len()].x)?);
        }
        let ns_per_eval = t0.elapsed().as_secs_f64() * 1e9 / evals as f64;

        println!("K = {count:3}, force = {ns_per_eval:8.2} ns/eval");
    }
    Ok(())
}

/// Compare sequential and parallel runs to rest over the same release points
pub fn bench_simulate() -> Result<()> {
    let sizes = [8, 32, 128, 512];
    let magnets = MagnetSet::ring(3, 1.0)?;
    let params = Parameters::default();
    let engine = Engine { record_trajectory: false, ..Engine::default() };

    for n in sizes {
        let starts = make_starts(n, 2.0);

        let t0 = Instant::now();
        let mut steps = 0;
        for s in &starts {
            steps += simulate_with(s, &magnets, &params, &engine)?.steps;
        }
        let seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        let par_runs = simulate_batch(&starts, &magnets, &params, &engine);
        let par = t1.elapsed().as_secs_f64();
        let settled = par_runs.iter().filter(|r| matches!(r, Ok(run) if run.converged())).count();

        println!(
            "N = {n:4}, sequential = {seq:8.4} s, parallel = {par:8.4} s, {:6.1} ns/step, settled {settled}/{n}",
            seq * 1e9 / steps.max(1) as f64,
        );
    }
    Ok(())
}

/// Basin render time against resolution
/// Paste output directly into a spreadsheet to graph
pub fn bench_basin_curve() -> Result<()> {
    let magnets = MagnetSet::ring(3, 1.0)?;
    let params = Parameters::default();
    let engine = Engine { max_iters: 10_000, epsilon: 1e-2, ..Engine::default() };

    println!("resolution,ms,us_per_cell");
    for resolution in (16..=128).step_by(16) {
        let grid = BasinGrid::new(resolution, NVec2::zeros(), 4.0)?;

        let t0 = Instant::now();
        black_box(grid.render(&magnets, &params, &engine)?);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.3},{:.3}", resolution, ms, ms * 1000.0 / (resolution * resolution) as f64);
    }
    Ok(())
}

/// Deterministic release points spread over a square of half width `extent`
fn make_starts(n: usize, extent: f64) -> Vec<State> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            State::at_rest(NVec2::new(
                (i_f * 0.37).sin() * extent,
                (i_f * 0.13 + 0.5).cos() * extent,
            ))
        })
        .collect()
}
