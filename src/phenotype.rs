//! # Phenotype Trait
//!
//! The `Phenotype` trait defines the genetic operators an individual must
//! support: recombination with a partner producing two offspring, and a
//! rate-gated mutation. [`crate::chromosome::Chromosome`] implements it with
//! two-point crossover and inversion mutation.
//!
//! ## Example
//!
//! ```rust
//! use lsystem_evolver::error::Result;
//! use lsystem_evolver::phenotype::Phenotype;
//! use lsystem_evolver::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Pair(u8, u8);
//!
//! impl Phenotype for Pair {
//!     fn crossover(&self, other: &Self, _rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
//!         Ok((Pair(self.0, other.1), Pair(other.0, self.1)))
//!     }
//!
//!     fn mutate(&mut self, rate: f64, rng: &mut RandomNumberGenerator) {
//!         if rng.chance(rate) {
//!             std::mem::swap(&mut self.0, &mut self.1);
//!         }
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for types that represent individuals in the evolutionary algorithm.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`, and `Sync`
/// so populations can be scored in parallel.
pub trait Phenotype: Clone + Debug + Send + Sync {
    /// Recombines `self` with `other`, returning two offspring.
    ///
    /// Parents are left untouched.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the parents cannot be recombined,
    /// for example because their lengths differ.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)>;

    /// Mutates the individual in place with probability `rate`.
    fn mutate(&mut self, rate: f64, rng: &mut RandomNumberGenerator);
}
