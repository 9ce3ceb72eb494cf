//! A layer of neurons that all read the same input vector.

use std::fmt;
use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::neuron::{CrossoverKind, MutationKind, Neuron, WeightRange};
use crate::error::{Error, Result};

/// Ordered, non-empty collection of neurons sharing one input arity.
///
/// Neuron order is significant: output `i` of [`Layer::evaluate`] comes from
/// neuron `i` and feeds input `i` of the next layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct Layer {
    neurons: Vec<Neuron>,
}

#[derive(Deserialize)]
struct RawLayer {
    neurons: Vec<Neuron>,
}

impl TryFrom<RawLayer> for Layer {
    type Error = Error;

    fn try_from(raw: RawLayer) -> Result<Self> {
        Layer::new(raw.neurons)
    }
}

impl Layer {
    /// Builds a layer, rejecting an empty list or neurons of differing arity.
    pub fn new(neurons: Vec<Neuron>) -> Result<Self> {
        let Some(first) = neurons.first() else {
            return Err(Error::EmptyLayer);
        };
        let expected = first.input_arity();
        if let Some((index, neuron)) = neurons
            .iter()
            .enumerate()
            .find(|(_, n)| n.input_arity() != expected)
        {
            return Err(Error::ArityMismatch {
                index,
                expected,
                actual: neuron.input_arity(),
            });
        }
        Ok(Self { neurons })
    }

    /// Builds `neuron_count` random neurons taking `input_arity` inputs each.
    pub fn new_random<R: Rng>(
        neuron_count: usize,
        input_arity: usize,
        range: WeightRange,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        if neuron_count == 0 {
            return Err(Error::EmptyLayer);
        }
        let neurons = (0..neuron_count)
            .map(|_| Neuron::new_random(input_arity, range, activation, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { neurons })
    }

    /// Number of inputs every neuron takes.
    pub fn input_arity(&self) -> usize {
        self.neurons[0].input_arity()
    }

    /// Number of neurons, which is also the output arity.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    /// Always `false`; layers cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Total weight count, biases included.
    pub fn weight_count(&self) -> usize {
        self.len() * (self.input_arity() + 1)
    }

    /// Iterates neurons in order. The iterator is double-ended.
    pub fn iter(&self) -> std::slice::Iter<'_, Neuron> {
        self.neurons.iter()
    }

    /// Bounds-checked read.
    pub fn neuron(&self, index: usize) -> Result<&Neuron> {
        self.neurons.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.neurons.len(),
        })
    }

    /// Bounds-checked replacement. The new neuron must match the layer's arity.
    pub fn set_neuron(&mut self, index: usize, neuron: Neuron) -> Result<()> {
        let len = self.neurons.len();
        let expected = self.input_arity();
        let slot = self
            .neurons
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        if neuron.input_arity() != expected {
            return Err(Error::ArityMismatch {
                index,
                expected,
                actual: neuron.input_arity(),
            });
        }
        *slot = neuron;
        Ok(())
    }

    /// Evaluates every neuron on the same inputs, in neuron order.
    pub fn evaluate(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let expected = self.input_arity();
        if inputs.len() != expected {
            return Err(Error::Dimension {
                expected,
                actual: inputs.len(),
            });
        }
        self.neurons.iter().map(|n| n.evaluate(inputs)).collect()
    }

    /// Spreads `expected` mutations evenly over the neurons. Returns how many
    /// weights were altered.
    pub fn mutate<R: Rng>(&mut self, expected: f64, kind: MutationKind, rng: &mut R) -> usize {
        let per_neuron = expected / self.neurons.len() as f64;
        self.neurons
            .iter_mut()
            .map(|n| n.mutate(per_neuron, kind, rng))
            .sum()
    }

    /// Pairs neurons position by position and crosses each pair.
    pub fn crossover<R: Rng>(
        &self,
        other: &Layer,
        kind: CrossoverKind,
        rng: &mut R,
    ) -> Result<Self> {
        if self.len() != other.len() || self.input_arity() != other.input_arity() {
            return Err(Error::TopologyMismatch);
        }
        let neurons = self
            .neurons
            .iter()
            .zip(&other.neurons)
            .map(|(a, b)| a.crossover(b, kind, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { neurons })
    }
}

impl Index<usize> for Layer {
    type Output = Neuron;

    fn index(&self, index: usize) -> &Neuron {
        &self.neurons[index]
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Neuron;
    type IntoIter = std::slice::Iter<'a, Neuron>;

    fn into_iter(self) -> Self::IntoIter {
        self.neurons.iter()
    }
}

/// One weight per line, neurons separated by a blank line.
impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for neuron in &self.neurons {
            for weight in neuron.weights() {
                writeln!(f, "{weight}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
