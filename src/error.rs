//! # Error Types
//!
//! This module defines the error type shared by every part of the crate.
//!
//! A disqualified grammar is *not* an error: the fitness evaluator turns every
//! structural failure into the minimum score. Errors are reserved for invalid
//! configuration, malformed input (rule strings, genes) and misuse of a run
//! controller that has already stopped.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use lsystem_evolver::error::{GeneticError, Result};
//!
//! fn check_length(len: usize) -> Result<()> {
//!     if len < 3 {
//!         return Err(GeneticError::Configuration("too short".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_length(2).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use lsystem_evolver::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[u32]) -> lsystem_evolver::error::Result<u32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert!(best_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or driving an evolution run.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation needed at least one chromosome.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A rule string contained a character outside the grammar alphabet.
    #[error("Invalid symbol: '{0}' is not part of the grammar alphabet")]
    InvalidSymbol(char),

    /// A chromosome carried a gene outside the alphabet or had the wrong length.
    #[error("Invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// A challenge produced an unusable score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// The evolution process was driven incorrectly.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
