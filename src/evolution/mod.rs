//! Generational genetic algorithm over network genomes.
//!
//! The host simulation scores a population, then hands it to
//! [`run_generation`] (or [`EvolutionEngine::advance`]) which ranks it, keeps
//! the top breeders, pairs them up and breeds one offspring per pair.

pub mod engine;
pub mod generation;
pub mod mating;
pub mod population;
pub mod selection;
pub mod stats;

pub use engine::EvolutionEngine;
pub use generation::{Generation, GenerationConfig, run_generation};
pub use mating::{MatingSchedule, Remainder};
pub use population::{Bot, Individual};
pub use stats::{GenerationReport, History};
