//! Core state types for the pendulum simulation.
//!
//! Defines the planar vector alias `NVec2`, the bob `State`
//! (position + velocity) and the recorded `Trajectory`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

impl State {
    /// Bob released from rest at `x`
    pub fn at_rest(x: NVec2) -> Self {
        Self { x, v: NVec2::zeros() }
    }

    pub fn new(x: NVec2, v: NVec2) -> Self {
        Self { x, v }
    }

    /// Euclidean norm of the velocity
    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    pub fn is_finite(&self) -> bool {
        is_finite(&self.x) && is_finite(&self.v)
    }
}

/// Positions recorded by `simulate`, one per step, append-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<NVec2>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn push(&mut self, x: NVec2) {
        self.points.push(x);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NVec2> {
        self.points.iter()
    }
}

pub(crate) fn is_finite(v: &NVec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
