use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brain::{Activation, CrossoverKind, MutationKind, WeightRange};
use crate::error::{Error, Result};
use crate::evolution::generation::GenerationConfig;
use crate::evolution::mating::Remainder;

/// Parameters for bootstrapping and evolving a population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Length of each bot's sensory input vector.
    pub input_arity: usize,
    /// Neuron count per layer; the last entry is the action vector length.
    pub layer_sizes: Vec<usize>,
    /// Activation used by every neuron.
    pub activation: Activation,
    /// Range for initial weights.
    pub weight_range: WeightRange,
    /// Bots per generation.
    pub population_size: usize,
    /// Breeders kept from each generation.
    pub select_count: usize,
    /// Per-weight probability of mutating an offspring weight.
    pub mutation_rate: f64,
    /// How a mutated weight gets its new value.
    pub mutation: MutationKind,
    /// Crossover granularity.
    pub crossover: CrossoverKind,
    /// What to do when `population_size` is not a multiple of `select_count`.
    pub remainder: Remainder,
    /// Generation reports kept in the history.
    pub max_history: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            input_arity: 8,
            layer_sizes: vec![4],
            activation: Activation::Sigmoid,
            weight_range: WeightRange::default(),
            population_size: 20,
            select_count: 5,
            mutation_rate: 0.05,
            mutation: MutationKind::default(),
            crossover: CrossoverKind::default(),
            remainder: Remainder::Truncate,
            max_history: 100,
        }
    }
}

impl Params {
    /// Checks every value a generation run depends on.
    pub fn validate(&self) -> Result<()> {
        if self.layer_sizes.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        if let Some(index) = self.layer_sizes.iter().position(|&size| size == 0) {
            return Err(Error::InvalidParams(format!("layer {index} has no neurons")));
        }
        self.weight_range.validate()?;
        self.mutation.validate()?;
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidParams(format!(
                "mutation rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.population_size == 0 {
            return Err(Error::EmptyNextGeneration);
        }
        if self.select_count == 0 {
            return Err(Error::NoBreeders);
        }
        if self.select_count == 1 {
            return Err(Error::SingleBreeder);
        }
        if self.select_count > self.population_size {
            return Err(Error::SelectCountExceedsPopulation {
                requested: self.select_count,
                available: self.population_size,
            });
        }
        Ok(())
    }

    /// Selection and breeding settings for one generation transition.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            select_count: self.select_count,
            next_population_size: self.population_size,
            mutation_rate: self.mutation_rate,
            mutation: self.mutation,
            crossover: self.crossover,
            remainder: self.remainder,
        }
    }

    /// Saves the parameters as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file. Missing fields take
    /// their default values.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
