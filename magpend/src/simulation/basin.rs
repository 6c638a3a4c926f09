//! Basins of attraction
//!
//! Every cell of a square grid over the plane is used as a release point
//! (bob at rest); the run is carried to convergence and the cell records
//! which magnet the bob settled next to. Cells are independent, so the
//! grid is evaluated in parallel over shared read-only inputs. A cell whose
//! run fails (e.g. released exactly on a magnet at zero height) is kept as
//! a failed cell; the rest of the map is still produced.

use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::{Result, SimError};
use super::engine::Engine;
use super::integrator::simulate_with;
use super::magnets::MagnetSet;
use super::params::Parameters;
use super::states::{NVec2, State};

/// Square view of the plane, `resolution` cells per side
#[derive(Debug, Clone, PartialEq)]
pub struct BasinGrid {
    pub resolution: usize,
    pub center: NVec2,
    pub extents: f64, // half width of the view
}

impl BasinGrid {
    pub fn new(resolution: usize, center: NVec2, extents: f64) -> Result<Self> {
        if resolution == 0 {
            return Err(SimError::InvalidConfig("basin resolution must be at least 1".into()));
        }
        if !extents.is_finite() || extents <= 0.0 {
            return Err(SimError::InvalidConfig(format!("basin extents must be positive, got {extents}")));
        }
        Ok(Self { resolution, center, extents })
    }

    /// Release point at the center of cell (`col`, `row`); row 0 is the top edge
    pub fn cell_position(&self, col: usize, row: usize) -> NVec2 {
        let n = self.resolution as f64;
        let u = (col as f64 + 0.5) / n;
        let w = (row as f64 + 0.5) / n;
        self.center + self.extents * NVec2::new(2.0 * u - 1.0, 1.0 - 2.0 * w)
    }

    /// Run every cell to rest and classify it by nearest magnet.
    /// Only invalid settings are returned as errors; per-cell failures
    /// are recorded in the map
    pub fn render(&self, magnets: &MagnetSet, params: &Parameters, engine: &Engine) -> Result<BasinMap> {
        let n = self.resolution;
        let started = Instant::now();

        params.validate()?;
        engine.validate()?;

        // Only the resting point matters here
        let engine = Engine { record_trajectory: false, ..engine.clone() };

        let cells: Vec<BasinCell> = (0..n * n)
            .into_par_iter()
            .map(|index| {
                let (row, col) = (index / n, index % n);
                let initial = State::at_rest(self.cell_position(col, row));
                match simulate_with(&initial, magnets, params, &engine) {
                    Ok(run) => BasinCell {
                        magnet: run.converged().then(|| magnets.nearest(&run.final_state.x).0),
                        steps: run.steps,
                        failed: false,
                    },
                    Err(e) => {
                        debug!("basin cell ({col}, {row}) at {:?} failed: {e}", initial.x);
                        BasinCell { magnet: None, steps: 0, failed: true }
                    }
                }
            })
            .collect();

        let map = BasinMap { resolution: n, cells };
        let failed = map.failed();
        if failed > 0 {
            warn!("basin {n}x{n}: {failed} cells failed and are drawn as unsettled");
        }

        let elapsed = started.elapsed();
        info!(
            "basin {n}x{n} around ({:.4}, {:.4}) +/- {:.4}: {:.1} ms ({:.2} us/cell)",
            self.center.x,
            self.center.y,
            self.extents,
            elapsed.as_secs_f64() * 1e3,
            elapsed.as_secs_f64() * 1e6 / (n * n) as f64,
        );

        Ok(map)
    }
}

/// Result for one release point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasinCell {
    pub magnet: Option<usize>, // None if the run hit a budget or failed
    pub steps: usize,
    pub failed: bool, // the run returned an error
}

/// Row-major grid of classified cells
#[derive(Debug, Clone)]
pub struct BasinMap {
    pub resolution: usize,
    pub cells: Vec<BasinCell>,
}

impl BasinMap {
    pub fn get(&self, col: usize, row: usize) -> Option<&BasinCell> {
        if col >= self.resolution || row >= self.resolution {
            return None;
        }
        self.cells.get(row * self.resolution + col)
    }

    /// Number of cells that settled at each magnet
    pub fn histogram(&self, magnet_count: usize) -> Vec<usize> {
        let mut counts = vec![0; magnet_count];
        for cell in &self.cells {
            if let Some(m) = cell.magnet {
                if m < magnet_count {
                    counts[m] += 1;
                }
            }
        }
        counts
    }

    /// Cells not classified by a magnet, failed cells included
    pub fn unsettled(&self) -> usize {
        self.cells.iter().filter(|c| c.magnet.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.cells.iter().filter(|c| c.failed).count()
    }
}

/// Camera path for a zoom sequence: the center reaches the target halfway
/// through, the zoom follows a smoothstep on a log scale
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPath {
    pub start_center: NVec2,
    pub target_center: NVec2,
    pub start_extents: f64,
    pub target_extents: f64,
    pub frames: usize,
}

impl ZoomPath {
    pub fn new(start_center: NVec2, target_center: NVec2, start_extents: f64, target_extents: f64, frames: usize) -> Result<Self> {
        if frames == 0 {
            return Err(SimError::InvalidConfig("zoom needs at least one frame".into()));
        }
        for e in [start_extents, target_extents] {
            if !e.is_finite() || e <= 0.0 {
                return Err(SimError::InvalidConfig(format!("zoom extents must be positive, got {e}")));
            }
        }
        Ok(Self { start_center, target_center, start_extents, target_extents, frames })
    }

    /// View center and half width of frame `i`
    pub fn frame(&self, i: usize) -> (NVec2, f64) {
        let a = if self.frames > 1 {
            (i.min(self.frames - 1)) as f64 / (self.frames - 1) as f64
        } else {
            0.0
        };

        let t_pos = (2.0 * a).min(1.0);
        let center = t_pos * self.target_center + (1.0 - t_pos) * self.start_center;

        let t_zoom = a * a * (3.0 - 2.0 * a); // smoothstep
        let log_ext = t_zoom * self.target_extents.ln() + (1.0 - t_zoom) * self.start_extents.ln();

        (center, log_ext.exp())
    }
}
