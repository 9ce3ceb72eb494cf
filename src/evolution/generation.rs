//! One generation transition: select, schedule, breed, report.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mating::{MatingSchedule, Remainder};
use super::population::Individual;
use super::selection;
use super::stats::GenerationReport;
use crate::brain::{CrossoverKind, MutationKind, Network};
use crate::error::{Error, Result};

/// Selection and breeding settings for [`run_generation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of breeders kept.
    pub select_count: usize,
    /// Requested size of the next generation.
    pub next_population_size: usize,
    /// Per-weight mutation probability applied to every offspring.
    pub mutation_rate: f64,
    /// How mutated weights get their new value.
    pub mutation: MutationKind,
    /// Crossover granularity.
    pub crossover: CrossoverKind,
    /// Handling of pairs that do not divide evenly among breeders.
    pub remainder: Remainder,
}

impl GenerationConfig {
    /// Config with default breeding operators.
    pub fn new(select_count: usize, next_population_size: usize) -> Self {
        Self {
            select_count,
            next_population_size,
            mutation_rate: 0.05,
            mutation: MutationKind::default(),
            crossover: CrossoverKind::default(),
            remainder: Remainder::default(),
        }
    }

    fn validate(&self, population_len: usize) -> Result<()> {
        if population_len == 0 {
            return Err(Error::EmptyPopulation);
        }
        if self.select_count == 0 {
            return Err(Error::NoBreeders);
        }
        if self.next_population_size == 0 {
            return Err(Error::EmptyNextGeneration);
        }
        if self.select_count > population_len {
            return Err(Error::SelectCountExceedsPopulation {
                requested: self.select_count,
                available: population_len,
            });
        }
        if self.select_count == 1 {
            return Err(Error::SingleBreeder);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidParams(format!(
                "mutation rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        self.mutation.validate()
    }
}

/// Output of [`run_generation`].
#[derive(Debug, Clone)]
pub struct Generation {
    /// Offspring genomes, grouped by first parent in rank order.
    pub offspring: Vec<Network>,
    /// Summary statistics.
    pub report: GenerationReport,
}

/// Breeds the next generation from a finished one.
///
/// The population slice is never reordered and parents are only read.
/// All parameters are checked before any offspring is produced.
pub fn run_generation<B: Individual, R: Rng>(
    population: &[B],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Generation> {
    config.validate(population.len())?;

    let breeders = selection::select(population, config.select_count)?;
    let breeder_mean = selection::mean_fitness(population, &breeders);
    debug!(
        "selected {} breeders, mean fitness {:.3}",
        breeders.len(),
        breeder_mean
    );

    let schedule = MatingSchedule::build(
        breeders.len(),
        config.next_population_size,
        config.remainder,
        rng,
    )?;

    let mut offspring = Vec::with_capacity(schedule.len());
    let mut mutated_weights = 0;
    for &(first, partner) in schedule.pairs() {
        let mother = population[breeders[first]].genome();
        let father = population[breeders[partner]].genome();
        let mut child = mother.crossover(father, config.crossover, rng)?;
        mutated_weights += child.mutate_rate(config.mutation_rate, config.mutation, rng);
        offspring.push(child);
    }

    let all: Vec<usize> = (0..population.len()).collect();
    let report = GenerationReport {
        breeder_mean,
        best_fitness: population[breeders[0]].fitness(),
        population_mean: selection::mean_fitness(population, &all),
        breeder_diversity: diversity(population, &breeders)?,
        breeders: breeders.len(),
        offspring: offspring.len(),
        dropped: schedule.dropped(),
        mutated_weights,
    };

    Ok(Generation { offspring, report })
}

/// Mean pairwise distance between the genomes at `indices`.
fn diversity<B: Individual>(population: &[B], indices: &[usize]) -> Result<f32> {
    let mut total = 0.0_f32;
    let mut pairs = 0_usize;
    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            total += population[a].genome().distance(population[b].genome())?;
            pairs += 1;
        }
    }
    Ok(if pairs == 0 { 0.0 } else { total / pairs as f32 })
}
