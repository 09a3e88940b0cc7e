use crate::error::Result;
use crate::symbol;

use super::options::{CacheType, EvolutionOptions};

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface; unset fields keep the defaults listed in
/// [`crate::evolution::options`], except that an unset elite count is capped
/// at the population size. [`EvolutionOptionsBuilder::build`] parses the axiom
/// and validates the result.
#[derive(Debug, Clone)]
pub struct EvolutionOptionsBuilder {
    options: EvolutionOptions,
    axiom: Option<String>,
    elite_count: Option<usize>,
}

impl Default for EvolutionOptionsBuilder {
    fn default() -> Self {
        Self {
            options: EvolutionOptions::default(),
            axiom: None,
            elite_count: None,
        }
    }
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.options.population_size = value;
        self
    }

    pub fn chromosome_length(mut self, value: usize) -> Self {
        self.options.chromosome_length = value;
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.options.crossover_rate = value;
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.options.mutation_rate = value;
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.options.tournament_size = value;
        self
    }

    /// Sets the axiom as a rule string, e.g. `"G"` or `"F[G]"`.
    pub fn axiom(mut self, value: &str) -> Self {
        self.axiom = Some(value.to_string());
        self
    }

    pub fn iterations(mut self, value: usize) -> Self {
        self.options.iterations = value;
        self
    }

    pub fn generation_limit(mut self, value: usize) -> Self {
        self.options.generation_limit = value;
        self
    }

    pub fn goal_fitness(mut self, value: f64) -> Self {
        self.options.goal_fitness = value;
        self
    }

    pub fn snapshot_stride(mut self, value: usize) -> Self {
        self.options.snapshot_stride = value;
        self
    }

    pub fn goal_streak(mut self, value: usize) -> Self {
        self.options.goal_streak = value;
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.options.parallel_threshold = value;
        self
    }

    pub fn cache_type(mut self, value: CacheType) -> Self {
        self.options.cache_type = value;
        self
    }

    /// Builds and validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneticError::InvalidSymbol`] if the axiom contains a
    /// character outside the alphabet, or [`crate::GeneticError::Configuration`]
    /// if any value is out of range.
    pub fn build(self) -> Result<EvolutionOptions> {
        let mut options = self.options;
        options.elite_count = self
            .elite_count
            .unwrap_or_else(|| options.elite_count.min(options.population_size));
        if let Some(axiom) = self.axiom {
            options.axiom = symbol::parse_symbols(&axiom)?;
        }
        options.validate()?;
        Ok(options)
    }
}
