//! Feed-forward neural networks used as bot brains.
//!
//! A [`Network`] is an ordered chain of [`Layer`]s, each a row of [`Neuron`]s.
//! Networks double as genomes: crossover and mutation operate on their weights
//! and always produce freshly allocated storage.

use std::borrow::Borrow;

use rayon::prelude::*;

use crate::error::{Error, Result};

pub mod activation;
pub mod layer;
pub mod network;
pub mod neuron;

pub use activation::Activation;
pub use layer::Layer;
pub use network::{Network, Topology};
pub use neuron::{CrossoverKind, MutationKind, Neuron, WeightRange};

/// Evaluates `networks[i]` on `inputs[i]` for every bot in parallel.
///
/// Evaluation only reads weights, so genomes can be shared across threads.
/// Each bot gets its own result; a malformed input fails that bot only.
/// Accepts owned networks or references into the host's bot records.
pub fn evaluate_all<N>(networks: &[N], inputs: &[Vec<f32>]) -> Result<Vec<Result<Vec<f32>>>>
where
    N: Borrow<Network> + Sync,
{
    if networks.len() != inputs.len() {
        return Err(Error::Dimension {
            expected: networks.len(),
            actual: inputs.len(),
        });
    }
    Ok(networks
        .par_iter()
        .zip(inputs.par_iter())
        .map(|(network, input)| {
            let network: &Network = network.borrow();
            network.evaluate(input)
        })
        .collect())
}
