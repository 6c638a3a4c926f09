//! Force contributors for the pendulum bob
//!
//! Defines the `Acceleration` trait, the two physical terms
//! (central restoring pull and the magnet ring) and `PendulumField`,
//! which sums them into the net force used by the integrator

use crate::error::{Result, SimError};
use crate::simulation::magnets::MagnetSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{is_finite, NVec2};

/// Trait for planar force sources acting on the bob.
/// Implementations add their contribution at position `x` into `out`
pub trait Acceleration {
    fn accumulate(&self, x: &NVec2, out: &mut NVec2) -> Result<()>;

    /// Net contribution of this source alone, starting from zero
    fn force(&self, x: &NVec2) -> Result<NVec2> {
        let mut out = NVec2::zeros();
        self.accumulate(x, &mut out)?;
        Ok(out)
    }
}

/// Gravity folded into natural units: a unit spring toward the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralRestoring;

impl Acceleration for CentralRestoring {
    fn accumulate(&self, x: &NVec2, out: &mut NVec2) -> Result<()> {
        *out -= x;
        Ok(())
    }
}

/// Inverse-power attraction toward every magnet of a `MagnetSet`
///
/// The bob hangs `height` above the magnet plane, so the true distance
/// to a magnet is `sqrt(d2 + h^2)`. The term added per magnet is
/// `K * diff / (d2 + h^2)^((n+1)/2)`, i.e. `K / r^(n+1)` with `r` the
/// 3D distance, applied along `diff` in the plane
#[derive(Debug, Clone, Copy)]
pub struct MagnetRing<'a> {
    magnets: &'a MagnetSet,
    k: f64, // magnetic constant
    h2: f64, // height squared
    exponent: f64, // (n + 1) / 2
}

impl<'a> MagnetRing<'a> {
    pub fn new(magnets: &'a MagnetSet, params: &Parameters) -> Self {
        Self {
            magnets,
            k: params.magnetic_constant,
            h2: params.height * params.height,
            exponent: params.distance_exponent(),
        }
    }
}

impl Acceleration for MagnetRing<'_> {
    fn accumulate(&self, x: &NVec2, out: &mut NVec2) -> Result<()> {
        for (i, p) in self.magnets.positions().iter().enumerate() {
            // diff points from the bob to the magnet
            let diff = p - x;
            let d2 = diff.dot(&diff);

            // Only reachable with zero height
            let r2 = d2 + self.h2;
            if r2 == 0.0 {
                return Err(SimError::Singularity { magnet: i, position: *x });
            }

            let magnitude = self.k / r2.powf(self.exponent);
            *out += magnitude * diff;
        }
        Ok(())
    }
}

/// Net force on the bob: restoring pull plus all magnets
#[derive(Debug, Clone, Copy)]
pub struct PendulumField<'a> {
    restoring: CentralRestoring,
    magnets: MagnetRing<'a>,
}

impl<'a> PendulumField<'a> {
    pub fn new(magnets: &'a MagnetSet, params: &Parameters) -> Self {
        Self {
            restoring: CentralRestoring,
            magnets: MagnetRing::new(magnets, params),
        }
    }
}

impl Acceleration for PendulumField<'_> {
    fn accumulate(&self, x: &NVec2, out: &mut NVec2) -> Result<()> {
        self.restoring.accumulate(x, out)?;
        self.magnets.accumulate(x, out)?;
        if !is_finite(out) {
            return Err(SimError::NonFinite { step: 0, quantity: "force" });
        }
        Ok(())
    }
}

/// Net force at `x` for the given magnets and constants
pub fn force_field(x: &NVec2, magnets: &MagnetSet, params: &Parameters) -> Result<NVec2> {
    PendulumField::new(magnets, params).force(x)
}
