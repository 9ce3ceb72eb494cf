//! A single neuron: a weight vector with a trailing bias weight.

use ndarray::{Array1, ArrayView1, Axis, Slice};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use crate::error::{Error, Result};

/// Half-open interval `[low, high)` used to draw fresh weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    /// Inclusive lower bound.
    pub low: f32,
    /// Exclusive upper bound.
    pub high: f32,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl WeightRange {
    /// Creates a validated range.
    pub fn new(low: f32, high: f32) -> Result<Self> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Checks that both bounds are finite and `low < high`.
    pub fn validate(&self) -> Result<()> {
        if self.low.is_finite() && self.high.is_finite() && self.low < self.high {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                low: self.low,
                high: self.high,
            })
        }
    }

    /// Draws one value uniformly from the range.
    #[inline]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        self.low + rng.random::<f32>() * (self.high - self.low)
    }
}

/// How a weight picked for mutation gets its new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MutationKind {
    /// Adds uniform noise from `[-step, step)` to the current value.
    Perturb {
        /// Half-width of the perturbation.
        step: f32,
    },
    /// Replaces the value with a fresh draw from the range.
    Redraw(WeightRange),
}

impl Default for MutationKind {
    fn default() -> Self {
        MutationKind::Perturb { step: 0.5 }
    }
}

impl MutationKind {
    /// Checks that the policy can produce finite weights.
    pub fn validate(&self) -> Result<()> {
        match self {
            MutationKind::Perturb { step } if step.is_finite() && *step > 0.0 => Ok(()),
            MutationKind::Perturb { step } => Err(Error::InvalidParams(format!(
                "mutation step must be positive and finite, got {step}"
            ))),
            MutationKind::Redraw(range) => range.validate(),
        }
    }

    fn apply<R: Rng>(self, weight: f32, rng: &mut R) -> f32 {
        match self {
            MutationKind::Perturb { step } => weight + (rng.random::<f32>() * 2.0 - 1.0) * step,
            MutationKind::Redraw(range) => range.sample(rng),
        }
    }
}

/// Granularity at which crossover picks genes from the two parents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverKind {
    /// Independent fair coin per weight, bias included.
    #[default]
    Weight,
    /// One fair coin per neuron; the whole weight vector comes from the winner.
    Neuron,
    /// Arithmetic mean of both parents' weights.
    Blend,
}

/// A neuron taking `input_arity` inputs.
///
/// `weights` holds `input_arity + 1` values; the last one is the bias and is
/// multiplied by a constant 1.0 input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNeuron")]
pub struct Neuron {
    weights: Array1<f32>,
    activation: Activation,
}

/// Unchecked wire form of [`Neuron`]; deserialization goes through [`Neuron::new`].
#[derive(Deserialize)]
struct RawNeuron {
    weights: Array1<f32>,
    activation: Activation,
}

impl TryFrom<RawNeuron> for Neuron {
    type Error = Error;

    fn try_from(raw: RawNeuron) -> Result<Self> {
        Neuron::new(raw.weights.to_vec(), raw.activation)
    }
}

impl Neuron {
    /// Creates a neuron from explicit weights, bias last.
    pub fn new(weights: Vec<f32>, activation: Activation) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidParams(
                "a neuron needs at least its bias weight".to_string(),
            ));
        }
        Ok(Self {
            weights: Array1::from_vec(weights),
            activation,
        })
    }

    /// Creates a neuron with every weight drawn uniformly from `range`.
    pub fn new_random<R: Rng>(
        input_arity: usize,
        range: WeightRange,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        range.validate()?;
        Ok(Self {
            weights: Array1::from_shape_fn(input_arity + 1, |_| range.sample(rng)),
            activation,
        })
    }

    /// Number of inputs, bias excluded.
    #[inline]
    pub fn input_arity(&self) -> usize {
        self.weights.len() - 1
    }

    /// All weights, bias last.
    pub fn weights(&self) -> &Array1<f32> {
        &self.weights
    }

    /// The bias weight.
    pub fn bias(&self) -> f32 {
        self.weights[self.input_arity()]
    }

    /// Activation function of this neuron.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Weighted sum of `inputs` plus bias, passed through the activation.
    pub fn evaluate(&self, inputs: &[f32]) -> Result<f32> {
        let arity = self.input_arity();
        if inputs.len() != arity {
            return Err(Error::Dimension {
                expected: arity,
                actual: inputs.len(),
            });
        }
        let sum = self
            .weights
            .slice_axis(Axis(0), Slice::from(..arity))
            .dot(&ArrayView1::from(inputs))
            + self.weights[arity];
        Ok(self.activation.apply(sum))
    }

    /// Alters each weight with probability `expected / weight_count`, so that
    /// `expected` weights change on average. Returns how many were altered.
    pub fn mutate<R: Rng>(&mut self, expected: f64, kind: MutationKind, rng: &mut R) -> usize {
        let probability = expected / self.weights.len() as f64;
        if probability.is_nan() || probability <= 0.0 {
            return 0;
        }
        let mut altered = 0;
        for weight in self.weights.iter_mut() {
            if rng.random::<f64>() < probability {
                *weight = kind.apply(*weight, rng);
                altered += 1;
            }
        }
        altered
    }

    /// Builds a child neuron from `self` and `other`. The child keeps `self`'s
    /// activation and owns a freshly allocated weight buffer.
    pub fn crossover<R: Rng>(
        &self,
        other: &Neuron,
        kind: CrossoverKind,
        rng: &mut R,
    ) -> Result<Self> {
        if self.weights.len() != other.weights.len() {
            return Err(Error::TopologyMismatch);
        }
        let weights = match kind {
            CrossoverKind::Weight => Array1::from_shape_fn(self.weights.len(), |i| {
                if rng.random::<bool>() {
                    self.weights[i]
                } else {
                    other.weights[i]
                }
            }),
            CrossoverKind::Neuron => {
                if rng.random::<bool>() {
                    self.weights.clone()
                } else {
                    other.weights.clone()
                }
            }
            CrossoverKind::Blend => &self.weights * 0.5 + &other.weights * 0.5,
        };
        Ok(Self {
            weights,
            activation: self.activation,
        })
    }

    /// Sum of squared weight differences against a neuron of equal arity.
    pub(crate) fn squared_distance(&self, other: &Neuron) -> Result<f32> {
        if self.weights.len() != other.weights.len() {
            return Err(Error::TopologyMismatch);
        }
        Ok(self
            .weights
            .iter()
            .zip(other.weights.iter())
            .map(|(w1, w2)| {
                let diff = w1 - w2;
                diff * diff
            })
            .sum())
    }
}
