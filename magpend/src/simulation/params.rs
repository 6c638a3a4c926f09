//! Physical and numerical constants for a pendulum run
//!
//! `Parameters` holds the settings that shape the dynamics:
//! - magnetic exponent `n` and constant `K` (force ~ K / r^(n+1)),
//! - friction coefficient,
//! - pendulum height above the magnet plane,
//! - integration step size `dt`

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub magnetic_exponent: f64, // n
    pub magnetic_constant: f64, // K
    pub friction: f64, // fraction of velocity removed per unit time
    pub height: f64, // bob height above the magnet plane
    pub dt: f64, // step size
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            magnetic_exponent: 4.0,
            magnetic_constant: 1.0,
            friction: 0.1,
            height: 0.5,
            dt: 0.01,
        }
    }
}

impl Parameters {
    /// Reject constants that would make the dynamics undefined.
    /// `height == 0` is allowed; landing exactly on a magnet is then
    /// reported by the force field.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("magnetic_exponent", self.magnetic_exponent),
            ("magnetic_constant", self.magnetic_constant),
            ("friction", self.friction),
            ("height", self.height),
            ("dt", self.dt),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimError::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }
        if self.dt <= 0.0 {
            return Err(SimError::InvalidConfig(format!("dt must be positive, got {}", self.dt)));
        }
        if self.height < 0.0 {
            return Err(SimError::InvalidConfig(format!("height must not be negative, got {}", self.height)));
        }
        if self.friction < 0.0 {
            return Err(SimError::InvalidConfig(format!("friction must not be negative, got {}", self.friction)));
        }
        Ok(())
    }

    /// Exponent applied to `d2 + h^2` in the magnet term
    pub fn distance_exponent(&self) -> f64 {
        0.5 * (self.magnetic_exponent + 1.0)
    }
}
