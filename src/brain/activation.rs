//! Activation functions applied to a neuron's weighted sum.

use serde::{Deserialize, Serialize};

/// Squashing function applied by every neuron of a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Logistic function, outputs in (0, 1).
    #[default]
    Sigmoid,
    /// Hyperbolic tangent, outputs in (-1, 1).
    Tanh,
    /// Rectified linear unit, outputs in [0, inf).
    Relu,
    /// Passes the weighted sum through unchanged.
    Identity,
}

impl Activation {
    /// Applies the function to a weighted sum.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Relu => x.max(0.0),
            Activation::Identity => x,
        }
    }

    /// Closed bounds of the output range.
    pub fn range(self) -> (f32, f32) {
        match self {
            Activation::Sigmoid => (0.0, 1.0),
            Activation::Tanh => (-1.0, 1.0),
            Activation::Relu => (0.0, f32::INFINITY),
            Activation::Identity => (f32::NEG_INFINITY, f32::INFINITY),
        }
    }
}
