//! Feed-forward network: the genome of one bot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::layer::Layer;
use super::neuron::{CrossoverKind, MutationKind, WeightRange};
use crate::error::{Error, Result};

/// Shape of a network, independent of its weight values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Length of the sensory input vector.
    pub input_arity: usize,
    /// Neuron count of every layer, input side first.
    pub layer_sizes: Vec<usize>,
}

/// Ordered chain of layers. Layer `i`'s output arity equals layer `i + 1`'s
/// input arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Layer>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(raw: RawNetwork) -> Result<Self> {
        Network::new(raw.layers)
    }
}

impl Network {
    /// Builds a network, rejecting an empty list or layers that do not chain.
    pub fn new(layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].len() != pair[1].input_arity() {
                return Err(Error::ChainMismatch {
                    index: i + 1,
                    expected: pair[0].len(),
                    actual: pair[1].input_arity(),
                });
            }
        }
        Ok(Self { layers })
    }

    /// Creates a network with random weights. Each entry of `layer_sizes`
    /// becomes the input arity of the layer after it.
    pub fn new_random<R: Rng>(
        layer_sizes: &[usize],
        input_arity: usize,
        range: WeightRange,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        if layer_sizes.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut arity = input_arity;
        for &size in layer_sizes {
            layers.push(Layer::new_random(size, arity, range, activation, rng)?);
            arity = size;
        }
        Ok(Self { layers })
    }

    /// Layers in evaluation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Length of the sensory input vector.
    pub fn input_arity(&self) -> usize {
        self.layers[0].input_arity()
    }

    /// Length of the action vector.
    pub fn output_arity(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    /// Input arity and layer sizes.
    pub fn topology(&self) -> Topology {
        Topology {
            input_arity: self.input_arity(),
            layer_sizes: self.layers.iter().map(Layer::len).collect(),
        }
    }

    /// Total weight count across all layers, biases included.
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(Layer::weight_count).sum()
    }

    /// Runs a forward pass and returns the action vector.
    #[inline]
    pub fn evaluate(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let mut output = self.layers[0].evaluate(inputs)?;
        for layer in &self.layers[1..] {
            output = layer.evaluate(&output)?;
        }
        Ok(output)
    }

    /// Creates a child with the same topology. Neither parent is modified and
    /// the child shares no storage with them.
    pub fn crossover<R: Rng>(
        &self,
        other: &Network,
        kind: CrossoverKind,
        rng: &mut R,
    ) -> Result<Self> {
        if self.topology() != other.topology() {
            return Err(Error::TopologyMismatch);
        }
        let layers = self
            .layers
            .iter()
            .zip(&other.layers)
            .map(|(a, b)| a.crossover(b, kind, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layers })
    }

    /// Spreads `expected` mutations over the layers in proportion to their
    /// weight counts. Returns how many weights were altered.
    pub fn mutate<R: Rng>(&mut self, expected: f64, kind: MutationKind, rng: &mut R) -> usize {
        let total = self.weight_count() as f64;
        self.layers
            .iter_mut()
            .map(|layer| {
                let share = expected * layer.weight_count() as f64 / total;
                layer.mutate(share, kind, rng)
            })
            .sum()
    }

    /// Alters each weight with probability `rate`.
    pub fn mutate_rate<R: Rng>(&mut self, rate: f64, kind: MutationKind, rng: &mut R) -> usize {
        let expected = rate * self.weight_count() as f64;
        self.mutate(expected, kind, rng)
    }

    /// Euclidean distance between two networks of equal topology.
    pub fn distance(&self, other: &Network) -> Result<f32> {
        if self.topology() != other.topology() {
            return Err(Error::TopologyMismatch);
        }
        let mut sum_sq = 0.0_f32;
        for (layer1, layer2) in self.layers.iter().zip(&other.layers) {
            for (n1, n2) in layer1.iter().zip(layer2) {
                sum_sq += n1.squared_distance(n2)?;
            }
        }
        Ok(sum_sq.sqrt())
    }

    /// Flattens all weights, layer by layer and neuron by neuron, bias last
    /// within each neuron.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.weight_count());
        for layer in &self.layers {
            for neuron in layer {
                flat.extend(neuron.weights().iter().copied());
            }
        }
        flat
    }
}
