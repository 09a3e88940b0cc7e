//! # EvolutionEngine
//!
//! Builds one generation from the previous one:
//!
//! 1. score every chromosome and rank them best-first;
//! 2. if the generation index is a multiple of the snapshot stride, record the
//!    top-ranked chromosome;
//! 3. carry the `elite_count` best chromosomes over unchanged;
//! 4. fill the remaining slots with offspring: two tournament winners are
//!    recombined with probability `crossover_rate` (otherwise copied), each
//!    child is mutated independently, and a surplus second child is dropped
//!    when only one slot is left.

use rayon::prelude::*;
use tracing::debug;

use super::{
    history::{RecordReason, RecordedIndividual},
    options::EvolutionOptions,
    population::Population,
    Challenge,
};
use crate::{
    chromosome::Chromosome,
    error::{GeneticError, OptionExt, Result},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, SelectionStrategy, TournamentSelection},
};

/// Result of [`EvolutionEngine::advance_generation`].
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The newly assembled population.
    pub population: Population,
    /// Scores of the population that was advanced, in its original order.
    pub fitness: Vec<f64>,
    /// Top-ranked chromosome of the advanced population, when the stride fired.
    pub snapshot: Option<RecordedIndividual>,
}

/// Applies selection, crossover, mutation and elitism to a population.
#[derive(Debug, Clone)]
pub struct EvolutionEngine<C>
where
    C: Challenge<Chromosome> + Send + Sync,
{
    options: EvolutionOptions,
    challenge: C,
    selection: TournamentSelection,
    elitism: ElitistSelection,
}

impl<C> EvolutionEngine<C>
where
    C: Challenge<Chromosome> + Send + Sync,
{
    /// Creates an engine after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] for invalid options.
    pub fn new(options: EvolutionOptions, challenge: C) -> Result<Self> {
        options.validate()?;
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        Ok(Self {
            options,
            challenge,
            selection,
            elitism: ElitistSelection::new(),
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    /// Draws the first generation uniformly at random.
    pub fn initial_population(&self, rng: &mut RandomNumberGenerator) -> Population {
        Population::random(
            self.options.get_population_size(),
            self.options.get_chromosome_length(),
            rng,
        )
    }

    /// Scores every chromosome, in parallel once the population reaches
    /// the configured threshold.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::FitnessCalculation`] if the challenge yields a
    /// non-finite score.
    pub fn evaluate(&self, population: &Population) -> Result<Vec<f64>> {
        let score = |candidate: &Chromosome| -> Result<f64> {
            let score = self.challenge.score(candidate);
            if !score.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )));
            }
            Ok(score)
        };

        if population.len() >= self.options.get_parallel_threshold() {
            population.chromosomes().par_iter().map(score).collect()
        } else {
            population.iter().map(score).collect()
        }
    }

    /// Returns the best chromosome and its score; ties go to the earliest.
    ///
    /// # Errors
    ///
    /// Fails on an empty population or a non-finite score.
    pub fn best(&self, population: &Population) -> Result<(Chromosome, f64)> {
        let fitness = self.evaluate(population)?;
        let top = ElitistSelection::rank(&fitness)
            .first()
            .copied()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        Ok((population.chromosomes()[top].clone(), fitness[top]))
    }

    /// Picks one parent by tournament.
    pub fn select(
        &self,
        population: &Population,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Chromosome> {
        self.selection
            .select(population.chromosomes(), fitness, 1, rng)?
            .pop()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Produces two unmutated offspring, recombining the parents with
    /// probability `crossover_rate` and copying them otherwise.
    pub fn breed(
        &self,
        parent_a: &Chromosome,
        parent_b: &Chromosome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Chromosome, Chromosome)> {
        if rng.chance(self.options.get_crossover_rate()) {
            parent_a.crossover(parent_b, rng)
        } else {
            Ok((parent_a.clone(), parent_b.clone()))
        }
    }

    /// Builds the next generation from `population`.
    ///
    /// `generation` is the 1-based index of the generation being advanced.
    ///
    /// # Errors
    ///
    /// Fails if the population does not match the configured shape, or if
    /// scoring or breeding fails.
    pub fn advance_generation(
        &self,
        population: &Population,
        generation: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<GenerationOutcome> {
        let size = self.options.get_population_size();
        if population.len() != size {
            return Err(GeneticError::Evolution(format!(
                "Population holds {} chromosomes, expected {}",
                population.len(),
                size
            )));
        }
        if population.chromosome_length() != self.options.get_chromosome_length() {
            return Err(GeneticError::Evolution(format!(
                "Chromosomes have length {}, expected {}",
                population.chromosome_length(),
                self.options.get_chromosome_length()
            )));
        }

        let fitness = self.evaluate(population)?;
        let ranking = ElitistSelection::rank(&fitness);

        let snapshot = if generation % self.options.get_snapshot_stride() == 0 {
            let top = ranking[0];
            debug!(generation, score = fitness[top], "recording snapshot");
            Some(RecordedIndividual {
                generation,
                chromosome: population.chromosomes()[top].clone(),
                score: fitness[top],
                reason: RecordReason::Snapshot,
            })
        } else {
            None
        };

        let mut next = self.elitism.select(
            population.chromosomes(),
            &fitness,
            self.options.get_elite_count(),
            rng,
        )?;
        debug!(generation, elites = next.len(), "carried elites forward");

        let mutation_rate = self.options.get_mutation_rate();
        while next.len() < size {
            let parent_a = self.select(population, &fitness, rng)?;
            let parent_b = self.select(population, &fitness, rng)?;
            let (mut child_a, mut child_b) = self.breed(&parent_a, &parent_b, rng)?;

            child_a.mutate(mutation_rate, rng);
            next.push(child_a);
            if next.len() < size {
                child_b.mutate(mutation_rate, rng);
                next.push(child_b);
            }
        }

        Ok(GenerationOutcome {
            population: Population::new(next)?,
            fitness,
            snapshot,
        })
    }
}
