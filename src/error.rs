//! Error type shared by the brain and evolution modules.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input vector had the wrong length.
    Dimension,
    /// A layer or network shape invariant was violated.
    Structural,
    /// Indexed access outside a layer's bounds.
    Index,
    /// Invalid selection, mating or initialization parameters.
    Configuration,
    /// Reading or writing a parameter file failed.
    Io,
}

/// Everything that can go wrong while building, evaluating or breeding networks.
#[derive(Debug, Error)]
pub enum Error {
    /// An input vector did not match the receiver's input arity.
    #[error("expected {expected} inputs, got {actual}")]
    Dimension {
        /// Input arity of the neuron, layer or network.
        expected: usize,
        /// Length of the vector that was supplied.
        actual: usize,
    },
    /// Layer built from no neurons.
    #[error("a layer needs at least one neuron")]
    EmptyLayer,
    /// Network built from no layers.
    #[error("a network needs at least one layer")]
    EmptyNetwork,
    /// A neuron's input arity differs from the rest of its layer.
    #[error("neuron {index} takes {actual} inputs, layer takes {expected}")]
    ArityMismatch {
        /// Position of the offending neuron.
        index: usize,
        /// Arity shared by the layer.
        expected: usize,
        /// Arity of the offending neuron.
        actual: usize,
    },
    /// Adjacent layers do not chain.
    #[error("layer {index} takes {actual} inputs but previous layer outputs {expected}")]
    ChainMismatch {
        /// Position of the layer that does not fit.
        index: usize,
        /// Output arity of the previous layer.
        expected: usize,
        /// Input arity of the layer at `index`.
        actual: usize,
    },
    /// Two networks that must share a shape do not.
    #[error("parents have different topologies")]
    TopologyMismatch,
    /// Indexed access past the end of a layer.
    #[error("no neuron at index {index}, layer has {len}")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of neurons in the layer.
        len: usize,
    },
    /// A sampling range that is empty or not finite.
    #[error("invalid weight range [{low}, {high})")]
    InvalidRange {
        /// Lower bound.
        low: f32,
        /// Upper bound.
        high: f32,
    },
    /// Selection was asked to rank nobody.
    #[error("population is empty")]
    EmptyPopulation,
    /// Zero breeders requested.
    #[error("at least one breeder must be selected")]
    NoBreeders,
    /// One breeder cannot produce a non-self pairing.
    #[error("a single breeder cannot be paired with a partner other than itself")]
    SingleBreeder,
    /// More breeders requested than there are bots.
    #[error("cannot select {requested} breeders from a population of {available}")]
    SelectCountExceedsPopulation {
        /// Requested breeder count.
        requested: usize,
        /// Population size.
        available: usize,
    },
    /// Requested next generation size of zero.
    #[error("next generation size must be positive")]
    EmptyNextGeneration,
    /// Fitness values must be totally ordered.
    #[error("bot {index} has NaN fitness")]
    NanFitness {
        /// Position of the bot in the population slice.
        index: usize,
    },
    /// A parameter set failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Parameter file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Parameter file is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Dimension { .. } => ErrorKind::Dimension,
            Error::EmptyLayer
            | Error::EmptyNetwork
            | Error::ArityMismatch { .. }
            | Error::ChainMismatch { .. }
            | Error::TopologyMismatch => ErrorKind::Structural,
            Error::IndexOutOfRange { .. } => ErrorKind::Index,
            Error::InvalidRange { .. }
            | Error::EmptyPopulation
            | Error::NoBreeders
            | Error::SingleBreeder
            | Error::SelectCountExceedsPopulation { .. }
            | Error::EmptyNextGeneration
            | Error::NanFitness { .. }
            | Error::InvalidParams(_) => ErrorKind::Configuration,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}
