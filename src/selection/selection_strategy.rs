use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies choose individuals from a population based on their
/// fitness scores. Higher fitness is always better.
///
/// # Examples
///
/// ```
/// use lsystem_evolver::chromosome::Chromosome;
/// use lsystem_evolver::selection::{ElitistSelection, SelectionStrategy};
/// use lsystem_evolver::rng::RandomNumberGenerator;
///
/// let population = vec![
///     Chromosome::from_rule("FFF").unwrap(),
///     Chromosome::from_rule("GGG").unwrap(),
///     Chromosome::from_rule("+++").unwrap(),
/// ];
/// let fitness = vec![1.0, 30.0, 2.0];
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let selected = ElitistSelection::new().select(&population, &fitness, 2, &mut rng).unwrap();
/// assert_eq!(selected[0].to_rule(), "GGG");
/// assert_eq!(selected[1].to_rule(), "+++");
/// ```
pub trait SelectionStrategy<P>: Debug + Send + Sync
where
    P: Phenotype,
{
    /// Selects `num_to_select` individuals from `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    fn select(
        &self,
        population: &[P],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>>;
}

/// Shared argument validation for selection strategies.
pub(crate) fn validate_inputs<P>(population: &[P], fitness: &[f64]) -> Result<()> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    if fitness.len() != population.len() {
        return Err(GeneticError::Configuration(format!(
            "Fitness vector length ({}) doesn't match population length ({})",
            fitness.len(),
            population.len()
        )));
    }

    Ok(())
}
