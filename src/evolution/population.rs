//! What the generational loop needs to know about a bot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::brain::{CrossoverKind, MutationKind, Network};
use crate::error::Result;

/// A member of a population: a genome plus the fitness the host gave it.
pub trait Individual {
    /// The bot's network.
    fn genome(&self) -> &Network;
    /// Fitness accumulated by the host simulation during the generation.
    fn fitness(&self) -> f64;
}

/// Minimal bot record for hosts that have no bot type of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    /// Display name, e.g. `gen3_12`.
    pub name: String,
    /// Network controlling the bot.
    pub genome: Network,
    /// Fitness, starts at zero.
    pub strength: f64,
}

impl Bot {
    /// Wraps a genome in a fresh bot with zero strength.
    pub fn new(name: impl Into<String>, genome: Network) -> Self {
        Self {
            name: name.into(),
            genome,
            strength: 0.0,
        }
    }

    /// Wraps the genomes of one generation, naming them `gen{generation}_{i}`.
    pub fn brood(generation: u32, genomes: Vec<Network>) -> Vec<Bot> {
        genomes
            .into_iter()
            .enumerate()
            .map(|(i, genome)| Bot::new(format!("gen{generation}_{i}"), genome))
            .collect()
    }

    /// Produces a child of `self` and `other`: crossover, then each weight
    /// mutated with probability `mutation_rate`.
    pub fn mate_with<R: Rng>(
        &self,
        other: &Bot,
        crossover: CrossoverKind,
        mutation_rate: f64,
        mutation: MutationKind,
        rng: &mut R,
    ) -> Result<Bot> {
        let mut genome = self.genome.crossover(&other.genome, crossover, rng)?;
        genome.mutate_rate(mutation_rate, mutation, rng);
        Ok(Bot::new(format!("{}x{}", self.name, other.name), genome))
    }
}

impl Individual for Bot {
    fn genome(&self) -> &Network {
        &self.genome
    }

    fn fitness(&self) -> f64 {
        self.strength
    }
}
