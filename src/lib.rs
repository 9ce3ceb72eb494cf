//! # Gembots - Evolving Neural Network Controllers
//!
//! Core of a gem-collecting bot simulation: each bot is driven by a small
//! feed-forward network, and a generational genetic algorithm breeds the
//! fittest networks into the next population.
//!
//! ## Features
//!
//! - Neuron / layer / network evaluation with a trailing bias weight
//! - Uniform, per-neuron or blending crossover between equal-topology networks
//! - Mutation spread over layers in proportion to their weight counts
//! - Stable truncation selection and a balanced random mating schedule
//! - Parallel batch evaluation with rayon
//!
//! The grid world, gem placement and rendering belong to the host; it only
//! calls [`brain::Network::evaluate`] each turn and
//! [`evolution::run_generation`] at generation boundaries.
//!
//! ## Core Modules
//!
//! - [`brain`] - Neural network implementation
//! - [`evolution`] - Selection, mating and offspring production
//! - [`params`] - Configuration
//! - [`error`] - Error type

/// Neural network implementation for bot brains.
pub mod brain;
/// Error type shared across the crate.
pub mod error;
/// Generational genetic algorithm.
pub mod evolution;
/// Population and breeding parameters.
pub mod params;

pub use error::{Error, ErrorKind, Result};
pub use params::Params;
