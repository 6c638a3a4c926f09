//! Fixed ring of point magnets under the pendulum.

use std::f64::consts::PI;

use crate::error::{Result, SimError};
use super::states::NVec2;

/// Magnets placed evenly on a circle, magnet `i` at angle `2*pi*i/count`.
/// Positions never change after construction
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetSet {
    positions: Vec<NVec2>,
}

impl MagnetSet {
    /// Build `count` magnets on a ring of `radius`
    pub fn ring(count: usize, radius: f64) -> Result<Self> {
        if count == 0 {
            return Err(SimError::InvalidConfig("magnet count must be at least 1".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidConfig(format!("magnet radius must be positive, got {radius}")));
        }

        let positions = (0..count)
            .map(|i| {
                let angle = 2.0 * i as f64 * PI / count as f64;
                radius * NVec2::new(angle.cos(), angle.sin())
            })
            .collect();

        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[NVec2] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index and squared distance of the magnet closest to `x`
    pub fn nearest(&self, x: &NVec2) -> (usize, f64) {
        let mut nearest = 0;
        let mut d2_min = f64::MAX;
        for (i, p) in self.positions.iter().enumerate() {
            let d2 = (x - p).norm_squared();
            if d2 < d2_min {
                nearest = i;
                d2_min = d2;
            }
        }
        (nearest, d2_min)
    }
}
