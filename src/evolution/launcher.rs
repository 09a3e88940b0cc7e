//! # RunController
//!
//! Drives the generation loop. Each [`RunController::step`] advances the
//! population by one generation, records its fitness scores, and then checks
//! the stop conditions:
//!
//! - the best score of the new population equals `goal_fitness`: the best
//!   chromosome is recorded and the hit streak grows; a streak of `goal_streak`
//!   hits ends the run in [`RunState::GoalReached`]. A score below the goal
//!   resets the streak, a score above it leaves the streak as it is.
//! - the generation counter has reached `generation_limit`: the run ends in
//!   [`RunState::LimitReached`].
//!
//! Both endings are normal. The report always carries the recorded best
//! individuals, which may be empty if no snapshot fired and the goal was
//! never met.
//!
//! ## Example
//!
//! ```rust
//! use lsystem_evolver::evolution::{EvolutionOptions, RunController, RunState};
//! use lsystem_evolver::rng::RandomNumberGenerator;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(20)
//!     .chromosome_length(10)
//!     .elite_count(2)
//!     .iterations(2)
//!     .generation_limit(10)
//!     .build()
//!     .unwrap();
//!
//! let controller = RunController::new(options, RandomNumberGenerator::from_seed(1)).unwrap();
//! let report = controller.run().unwrap();
//!
//! assert_eq!(report.final_state, RunState::LimitReached);
//! assert_eq!(report.history.len(), 10);
//! // Generation 10 is a snapshot generation.
//! assert!(!report.best_rules().is_empty());
//! ```

use tracing::{debug, info, warn};

use super::{
    caching_challenge::{CachingChallenge, SharedChallenge},
    engine::EvolutionEngine,
    history::{FitnessHistory, GenerationStats, RecordReason, RecordedIndividual},
    options::EvolutionOptions,
    population::Population,
};
use crate::{
    chromosome::Chromosome,
    error::{GeneticError, Result},
    fitness::GrammarChallenge,
    rng::RandomNumberGenerator,
};

/// Where a run stands.
///
/// The limit check runs every generation, but when the goal streak completes
/// in the generation that also reaches the limit the run ends in
/// [`RunState::GoalReached`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// The goal fitness was met for `goal_streak` consecutive generations.
    GoalReached,
    /// The generation limit was reached first.
    LimitReached,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        self != RunState::Running
    }
}

/// Everything a finished run hands to its consumers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub final_state: RunState,
    /// Number of generations advanced.
    pub generations: usize,
    /// Recorded best individuals, in recording order.
    pub best_individuals: Vec<RecordedIndividual>,
    pub history: FitnessHistory,
}

impl RunReport {
    /// Decoded `G` rules of the recorded individuals, in recording order.
    pub fn best_rules(&self) -> Vec<String> {
        self.best_individuals
            .iter()
            .map(RecordedIndividual::rule)
            .collect()
    }

    /// Per-generation summary statistics.
    pub fn generation_stats(&self) -> Vec<GenerationStats> {
        self.history.stats()
    }
}

/// Counts consecutive generations whose best score equals the goal.
///
/// Scores are compared exactly: the grammar score is a ratio of integer counts
/// computed the same way every time, so an exact goal is reproducible.
#[derive(Debug, Clone, PartialEq)]
struct GoalStreak {
    goal: f64,
    required: usize,
    hits: usize,
}

impl GoalStreak {
    fn new(goal: f64, required: usize) -> Self {
        Self {
            goal,
            required,
            hits: 0,
        }
    }

    /// Feeds the best score of a generation and reports whether it was a hit.
    fn observe(&mut self, best_score: f64) -> bool {
        if best_score == self.goal {
            self.hits += 1;
            true
        } else {
            if best_score < self.goal {
                self.hits = 0;
            }
            false
        }
    }

    fn hits(&self) -> usize {
        self.hits
    }

    fn is_complete(&self) -> bool {
        self.hits >= self.required
    }
}

/// Owns the population, the random source and the run bookkeeping.
pub struct RunController {
    engine: EvolutionEngine<SharedChallenge<Chromosome>>,
    rng: RandomNumberGenerator,
    population: Population,
    /// Generations advanced so far.
    generation: usize,
    state: RunState,
    goal: GoalStreak,
    history: FitnessHistory,
    best_individuals: Vec<RecordedIndividual>,
}

impl RunController {
    /// Creates a controller with a random initial population.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] for invalid options.
    pub fn new(options: EvolutionOptions, mut rng: RandomNumberGenerator) -> Result<Self> {
        let engine = Self::build_engine(options)?;
        let population = engine.initial_population(&mut rng);
        Ok(Self::from_parts(engine, population, rng))
    }

    /// Creates a controller starting from a given population.
    ///
    /// # Errors
    ///
    /// Fails for invalid options, or if the population does not have the
    /// configured size and chromosome length.
    pub fn with_population(
        options: EvolutionOptions,
        population: Population,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        if population.len() != options.get_population_size()
            || population.chromosome_length() != options.get_chromosome_length()
        {
            return Err(GeneticError::Configuration(format!(
                "Initial population is {}x{}, options require {}x{}",
                population.len(),
                population.chromosome_length(),
                options.get_population_size(),
                options.get_chromosome_length()
            )));
        }
        let engine = Self::build_engine(options)?;
        Ok(Self::from_parts(engine, population, rng))
    }

    fn build_engine(options: EvolutionOptions) -> Result<EvolutionEngine<SharedChallenge<Chromosome>>> {
        options.validate()?;
        let challenge = GrammarChallenge::new(options.get_axiom().to_vec(), options.get_iterations())
            .with_cache(options.get_cache_type());
        EvolutionEngine::new(options, challenge)
    }

    fn from_parts(
        engine: EvolutionEngine<SharedChallenge<Chromosome>>,
        population: Population,
        rng: RandomNumberGenerator,
    ) -> Self {
        let goal = GoalStreak::new(
            engine.options().get_goal_fitness(),
            engine.options().get_goal_streak(),
        );
        Self {
            engine,
            rng,
            population,
            generation: 0,
            state: RunState::Running,
            goal,
            history: FitnessHistory::new(),
            best_individuals: Vec::new(),
        }
    }

    pub fn options(&self) -> &EvolutionOptions {
        self.engine.options()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of generations advanced so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    pub fn best_individuals(&self) -> &[RecordedIndividual] {
        &self.best_individuals
    }

    /// Advances one generation and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Evolution`] if the run has already stopped, or
    /// propagates failures from the engine.
    pub fn step(&mut self) -> Result<RunState> {
        if self.state.is_terminal() {
            return Err(GeneticError::Evolution(format!(
                "Run already finished in state {:?} after {} generations",
                self.state, self.generation
            )));
        }

        let generation = self.generation + 1;
        let outcome = self
            .engine
            .advance_generation(&self.population, generation, &mut self.rng)?;

        if let Some(stats) = GenerationStats::from_scores(&outcome.fitness) {
            info!(
                generation,
                mean = stats.mean,
                variance = stats.variance,
                max = stats.max,
                "generation scored"
            );
        }
        self.history.push(outcome.fitness);
        if let Some(snapshot) = outcome.snapshot {
            self.best_individuals.push(snapshot);
        }
        self.population = outcome.population;
        self.generation = generation;

        let (best, best_score) = self.engine.best(&self.population)?;
        debug!(generation, score = best_score, rule = %best, "best of new generation");

        if self.goal.observe(best_score) {
            info!(generation, streak = self.goal.hits(), score = best_score, "goal fitness met");
            self.best_individuals.push(RecordedIndividual {
                generation,
                chromosome: best,
                score: best_score,
                reason: RecordReason::GoalHit,
            });
            if self.goal.is_complete() {
                self.state = RunState::GoalReached;
            }
        }

        if self.state == RunState::Running
            && generation >= self.engine.options().get_generation_limit()
        {
            self.state = RunState::LimitReached;
        }

        if self.state.is_terminal() {
            info!(generation, state = ?self.state, "run finished");
            if self.best_individuals.is_empty() {
                warn!(generation, "run finished without recording any individual");
            }
        }

        Ok(self.state)
    }

    /// Steps until the run stops and returns its report.
    pub fn run(mut self) -> Result<RunReport> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.report())
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            final_state: self.state,
            generations: self.generation,
            best_individuals: self.best_individuals.clone(),
            history: self.history.clone(),
        }
    }
}
