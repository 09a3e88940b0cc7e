//! Evolves the production rule of an L-system with a genetic algorithm.
//!
//! A candidate is a fixed-length [`chromosome::Chromosome`] that decodes to the
//! right-hand side of `G` in the grammar `{F -> FF, G -> rule}`. Its fitness
//! comes from expanding an axiom under that grammar and scoring the result
//! for balance, diversity, size and redundancy ([`fitness`]). The
//! [`evolution::RunController`] drives generations of tournament selection,
//! two-point crossover, inversion mutation and elitism, and returns the
//! recorded best rules for rendering.

pub mod caching;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod lsystem;
pub mod phenotype;
pub mod rng;
pub mod selection;
pub mod symbol;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionOptions, RunController, RunReport, RunState};
pub use fitness::GrammarChallenge;
