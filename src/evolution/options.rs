//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every parameter of a run: the genetic
//! operators' rates and sizes, the grammar being expanded, and the stop
//! conditions. Options are created through [`EvolutionOptions::builder`],
//! which validates them, so an `EvolutionOptions` value is always usable.
//!
//! ## Example
//!
//! ```rust
//! use lsystem_evolver::evolution::options::{CacheType, EvolutionOptions};
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .chromosome_length(12)
//!     .elite_count(4)
//!     .axiom("G")
//!     .iterations(3)
//!     .generation_limit(20)
//!     .cache_type(CacheType::ThreadLocal)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_population_size(), 50);
//!
//! // Elites cannot outnumber the population.
//! assert!(EvolutionOptions::builder()
//!     .population_size(4)
//!     .elite_count(5)
//!     .build()
//!     .is_err());
//! ```
//!
//! ## Defaults
//!
//! | option               | default |
//! |----------------------|---------|
//! | `population_size`    | 500     |
//! | `chromosome_length`  | 15      |
//! | `crossover_rate`     | 0.7     |
//! | `mutation_rate`      | 0.7     |
//! | `elite_count`        | 20, or the population size if smaller |
//! | `tournament_size`    | 3       |
//! | `axiom`              | `G`     |
//! | `iterations`         | 5       |
//! | `generation_limit`   | 100     |
//! | `goal_fitness`       | 10000   |
//! | `snapshot_stride`    | 10      |
//! | `goal_streak`        | 2       |
//! | `parallel_threshold` | 1000    |
//! | `cache_type`         | Global  |

use crate::chromosome::MIN_CHROMOSOME_LENGTH;
use crate::error::{GeneticError, Result};
use crate::symbol::{self, Symbol};

pub use super::builder::EvolutionOptionsBuilder;

/// How fitness scores are memoized during a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// Every evaluation expands the grammar again.
    None,
    /// One mutex-guarded cache shared by all threads.
    #[default]
    Global,
    /// One cache per thread.
    ThreadLocal,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    pub(crate) population_size: usize,
    pub(crate) chromosome_length: usize,
    pub(crate) crossover_rate: f64,
    pub(crate) mutation_rate: f64,
    pub(crate) elite_count: usize,
    pub(crate) tournament_size: usize,
    pub(crate) axiom: Vec<Symbol>,
    pub(crate) iterations: usize,
    pub(crate) generation_limit: usize,
    pub(crate) goal_fitness: f64,
    /// Every generation whose index is a multiple of this records its best individual.
    pub(crate) snapshot_stride: usize,
    /// Consecutive goal hits needed to stop.
    pub(crate) goal_streak: usize,
    /// Minimum number of chromosomes to score in parallel.
    pub(crate) parallel_threshold: usize,
    pub(crate) cache_type: CacheType,
}

impl EvolutionOptions {
    /// Returns a builder preloaded with the defaults.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_axiom(&self) -> &[Symbol] {
        &self.axiom
    }

    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    pub fn get_generation_limit(&self) -> usize {
        self.generation_limit
    }

    pub fn get_goal_fitness(&self) -> f64 {
        self.goal_fitness
    }

    pub fn get_snapshot_stride(&self) -> usize {
        self.snapshot_stride
    }

    pub fn get_goal_streak(&self) -> usize {
        self.goal_streak
    }

    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_cache_type(&self) -> CacheType {
        self.cache_type
    }

    /// Checks every precondition the engine and controller rely on.
    ///
    /// Options coming out of the builder are already valid; this is for
    /// values obtained another way, such as deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] naming the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(config_error("Population size cannot be zero"));
        }
        if self.chromosome_length < MIN_CHROMOSOME_LENGTH {
            return Err(GeneticError::Configuration(format!(
                "Chromosome length must be at least {} for two-point crossover, got {}",
                MIN_CHROMOSOME_LENGTH, self.chromosome_length
            )));
        }
        if self.elite_count > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elite count ({}) cannot exceed population size ({})",
                self.elite_count, self.population_size
            )));
        }
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;
        if self.tournament_size == 0 {
            return Err(config_error("Tournament size must be at least 1"));
        }
        if self.axiom.is_empty() {
            return Err(config_error("Axiom cannot be empty"));
        }
        if self.generation_limit == 0 {
            return Err(config_error("Generation limit must be at least 1"));
        }
        if !self.goal_fitness.is_finite() {
            return Err(GeneticError::Configuration(format!(
                "Goal fitness must be finite, got {}",
                self.goal_fitness
            )));
        }
        if self.snapshot_stride == 0 {
            return Err(config_error("Snapshot stride must be at least 1"));
        }
        if self.goal_streak == 0 {
            return Err(config_error("Goal streak must be at least 1"));
        }
        Ok(())
    }

    /// The axiom rendered as a string.
    pub fn axiom_string(&self) -> String {
        symbol::render(&self.axiom)
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 500,
            chromosome_length: 15,
            crossover_rate: 0.7,
            mutation_rate: 0.7,
            elite_count: 20,
            tournament_size: crate::selection::tournament::DEFAULT_TOURNAMENT_SIZE,
            axiom: vec![Symbol::Growth],
            iterations: 5,
            generation_limit: 100,
            goal_fitness: 10_000.0,
            snapshot_stride: 10,
            goal_streak: 2,
            parallel_threshold: 1000,
            cache_type: CacheType::Global,
        }
    }
}

fn config_error(msg: &str) -> GeneticError {
    GeneticError::Configuration(msg.to_string())
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GeneticError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, rate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let options = EvolutionOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.axiom_string(), "G");
        assert_eq!(options.get_goal_fitness(), 10_000.0);
    }

    #[test]
    fn test_rejects_zero_population() {
        let options = EvolutionOptions {
            population_size: 0,
            elite_count: 0,
            ..Default::default()
        };
        match options.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_rejects_short_chromosome() {
        let options = EvolutionOptions {
            chromosome_length: 2,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = EvolutionOptions {
            chromosome_length: 3,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_excess_elites() {
        let options = EvolutionOptions {
            population_size: 10,
            elite_count: 11,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = EvolutionOptions {
            population_size: 10,
            elite_count: 10,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_rates() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let options = EvolutionOptions {
                crossover_rate: rate,
                ..Default::default()
            };
            assert!(options.validate().is_err());

            let options = EvolutionOptions {
                mutation_rate: rate,
                ..Default::default()
            };
            assert!(options.validate().is_err());
        }
    }

    #[test]
    fn test_rejects_other_invalid_values() {
        let invalid = [
            EvolutionOptions {
                tournament_size: 0,
                ..Default::default()
            },
            EvolutionOptions {
                axiom: Vec::new(),
                ..Default::default()
            },
            EvolutionOptions {
                generation_limit: 0,
                ..Default::default()
            },
            EvolutionOptions {
                goal_fitness: f64::INFINITY,
                ..Default::default()
            },
            EvolutionOptions {
                snapshot_stride: 0,
                ..Default::default()
            },
            EvolutionOptions {
                goal_streak: 0,
                ..Default::default()
            },
        ];
        for options in invalid {
            assert!(options.validate().is_err(), "{:?} should be rejected", options);
        }
    }
}
