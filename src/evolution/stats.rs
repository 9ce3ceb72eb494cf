//! Per-generation statistics and a bounded history of them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Summary of one generation transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Mean fitness of the selected breeders.
    pub breeder_mean: f64,
    /// Highest fitness in the population.
    pub best_fitness: f64,
    /// Mean fitness of the whole population.
    pub population_mean: f64,
    /// Mean pairwise genome distance among the breeders.
    pub breeder_diversity: f32,
    /// Number of breeders selected.
    pub breeders: usize,
    /// Number of offspring produced.
    pub offspring: usize,
    /// Requested offspring not produced because of truncation.
    pub dropped: usize,
    /// Weights altered by mutation across all offspring.
    pub mutated_weights: usize,
}

/// Bounded record of recent generations, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// `(generation, report)` pairs.
    pub records: VecDeque<(u32, GenerationReport)>,
    /// Maximum number of records kept.
    pub max_history: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Creates an empty history keeping at most `max_history` records.
    pub fn new(max_history: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Appends a report, evicting the oldest one when full.
    pub fn record(&mut self, generation: u32, report: GenerationReport) {
        if self.max_history == 0 {
            return;
        }
        self.records.push_back((generation, report));
        if self.records.len() > self.max_history {
            self.records.pop_front();
        }
    }

    /// Number of records kept.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn latest(&self) -> Option<&(u32, GenerationReport)> {
        self.records.back()
    }

    /// Breeder mean per recorded generation, oldest first.
    pub fn breeder_means(&self) -> Vec<f64> {
        self.records.iter().map(|(_, r)| r.breeder_mean).collect()
    }

    /// Average of the recorded breeder means (last N generations).
    pub fn mean_of_breeder_means(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|(_, r)| r.breeder_mean).sum::<f64>()
                / self.records.len() as f64
        }
    }

    /// Highest fitness seen in any recorded generation.
    pub fn best_ever(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|(_, r)| r.best_fitness)
            .reduce(f64::max)
    }
}
