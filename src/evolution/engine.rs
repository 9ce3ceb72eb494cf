//! Stateful driver owning parameters, randomness and history.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use super::generation::{Generation, run_generation};
use super::population::Individual;
use super::stats::History;
use crate::brain::Network;
use crate::error::Result;
use crate::params::Params;

/// Runs generation after generation for a host simulation.
///
/// The host owns the bots and their fitness; the engine only turns a finished
/// population into the next set of genomes.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: Params,
    rng: StdRng,
    generation: u32,
    history: History,
}

impl EvolutionEngine {
    /// Creates an engine with a seeded generator. Parameters are validated.
    pub fn new(params: Params, seed: u64) -> Result<Self> {
        params.validate()?;
        let history = History::new(params.max_history);
        Ok(Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            generation: 1,
            history,
        })
    }

    /// Random genomes for the first generation.
    pub fn bootstrap(&mut self) -> Result<Vec<Network>> {
        (0..self.params.population_size)
            .map(|_| {
                Network::new_random(
                    &self.params.layer_sizes,
                    self.params.input_arity,
                    self.params.weight_range,
                    self.params.activation,
                    &mut self.rng,
                )
            })
            .collect()
    }

    /// Breeds the next generation from `population` and records the report.
    pub fn advance<B: Individual>(&mut self, population: &[B]) -> Result<Generation> {
        let config = self.params.generation_config();
        let generation = run_generation(population, &config, &mut self.rng)?;

        info!(
            generation = self.generation,
            breeder_mean = generation.report.breeder_mean,
            best = generation.report.best_fitness,
            diversity = generation.report.breeder_diversity,
            offspring = generation.report.offspring,
            "generation complete"
        );

        self.history.record(self.generation, generation.report.clone());
        self.generation += 1;
        Ok(generation)
    }

    /// Number of the generation currently being simulated, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Reports of recent generations.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }
}
