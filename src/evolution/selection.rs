//! Fitness ranking and truncation selection.
//!
//! Nothing here reorders the caller's population; results are index lists.

use std::cmp::Ordering;

use super::population::Individual;
use crate::error::{Error, Result};

/// Indices of `population` sorted by fitness, highest first.
///
/// Equal fitness keeps input order. NaN fitness is rejected.
pub fn rank<B: Individual>(population: &[B]) -> Result<Vec<usize>> {
    if population.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    if let Some(index) = population.iter().position(|bot| bot.fitness().is_nan()) {
        return Err(Error::NanFitness { index });
    }
    let mut order: Vec<usize> = (0..population.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(Ordering::Equal)
    });
    Ok(order)
}

/// Indices of the `count` fittest bots, best first.
pub fn select<B: Individual>(population: &[B], count: usize) -> Result<Vec<usize>> {
    if count == 0 {
        return Err(Error::NoBreeders);
    }
    if count > population.len() && !population.is_empty() {
        return Err(Error::SelectCountExceedsPopulation {
            requested: count,
            available: population.len(),
        });
    }
    let mut order = rank(population)?;
    order.truncate(count);
    Ok(order)
}

/// Mean fitness of the bots at `indices`; zero when `indices` is empty.
pub fn mean_fitness<B: Individual>(population: &[B], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| population[i].fitness()).sum::<f64>() / indices.len() as f64
}
