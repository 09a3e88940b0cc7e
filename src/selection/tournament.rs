use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{validate_inputs, SelectionStrategy};

/// Default number of participants per tournament.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Tournament selection with replacement.
///
/// Each tournament draws `tournament_size` indices uniformly from the whole
/// population (the same individual may be drawn more than once) and returns
/// the fittest participant. When several participants share the best score,
/// the one drawn first wins.
///
/// # Examples
///
/// ```
/// use lsystem_evolver::chromosome::Chromosome;
/// use lsystem_evolver::rng::RandomNumberGenerator;
/// use lsystem_evolver::selection::{SelectionStrategy, TournamentSelection};
///
/// let population = vec![
///     Chromosome::from_rule("FFF").unwrap(),
///     Chromosome::from_rule("GGG").unwrap(),
/// ];
/// let fitness = vec![1.0, 2.0];
/// let mut rng = RandomNumberGenerator::from_seed(3);
///
/// let selection = TournamentSelection::default();
/// let parents = selection.select(&population, &fitness, 4, &mut rng).unwrap();
/// assert_eq!(parents.len(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a tournament selection with the given number of participants.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::EmptyPopulation`] if `fitness` is empty.
    pub fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut best_idx = rng.gen_index(fitness.len());
        let mut best_fitness = fitness[best_idx];

        for _ in 1..self.tournament_size {
            let idx = rng.gen_index(fitness.len());
            // NaN never wins against a number.
            if fitness[idx] > best_fitness || (best_fitness.is_nan() && !fitness[idx].is_nan()) {
                best_idx = idx;
                best_fitness = fitness[idx];
            }
        }

        Ok(best_idx)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl<P> SelectionStrategy<P> for TournamentSelection
where
    P: Phenotype,
{
    fn select(
        &self,
        population: &[P],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>> {
        validate_inputs(population, fitness)?;

        (0..num_to_select)
            .map(|_| {
                self.run_tournament(fitness, rng)
                    .map(|winner| population[winner].clone())
            })
            .collect()
    }
}
