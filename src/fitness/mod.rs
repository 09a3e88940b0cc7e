//! # Fitness Evaluation
//!
//! [`GrammarChallenge`] scores a chromosome by substituting its decoded rule for
//! `G` in the rule set `{F -> FF, G -> rule}`, expanding the axiom, and running
//! the [`checks::ORDERED_CHECKS`] over the result. The first failing check
//! disqualifies the candidate with [`MIN_FITNESS`]; otherwise the score is
//!
//! ```text
//! max(1, length * distinct_symbols / (adjacent_repeats + 1))
//! ```
//!
//! Evaluation is pure: the same chromosome, axiom and iteration count always
//! yield the same score.
//!
//! ## Example
//!
//! ```rust
//! use lsystem_evolver::chromosome::Chromosome;
//! use lsystem_evolver::evolution::Challenge;
//! use lsystem_evolver::fitness::GrammarChallenge;
//! use lsystem_evolver::symbol::parse_symbols;
//!
//! let challenge = GrammarChallenge::new(parse_symbols("G").unwrap(), 1);
//! let candidate = Chromosome::from_rule("F[+G][-G][+G][-G]").unwrap();
//!
//! assert_eq!(challenge.score(&candidate), 102.0);
//! ```

pub mod checks;

use tracing::trace;

use crate::chromosome::Chromosome;
use crate::evolution::Challenge;
use crate::lsystem::RuleSet;
use crate::symbol::{Symbol, ALPHABET, ALPHABET_SIZE};

pub use checks::{ExpansionStats, StructuralCheck, MAX_EXPANDED_LENGTH, ORDERED_CHECKS};

/// Score given to every disqualified candidate.
pub const MIN_FITNESS: f64 = 1.0;

/// Outcome of evaluating one candidate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assessment {
    /// All checks passed.
    Scored(f64),
    /// The named check failed first.
    Disqualified(StructuralCheck),
}

impl Assessment {
    pub fn score(&self) -> f64 {
        match self {
            Assessment::Scored(score) => *score,
            Assessment::Disqualified(_) => MIN_FITNESS,
        }
    }

    pub fn is_disqualified(&self) -> bool {
        matches!(self, Assessment::Disqualified(_))
    }
}

/// Scores candidate `G` rules by simulated grammar expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarChallenge {
    axiom: Vec<Symbol>,
    iterations: usize,
}

impl GrammarChallenge {
    pub fn new(axiom: Vec<Symbol>, iterations: usize) -> Self {
        Self { axiom, iterations }
    }

    pub fn axiom(&self) -> &[Symbol] {
        &self.axiom
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Expands the axiom under the candidate's rule set, without any length cap.
    pub fn expand(&self, chromosome: &Chromosome) -> Vec<Symbol> {
        RuleSet::evolved(chromosome.symbols()).expand(&self.axiom, self.iterations)
    }

    /// Evaluates a candidate and reports why it was disqualified, if it was.
    ///
    /// Expansion stops early once the string outgrows [`MAX_EXPANDED_LENGTH`].
    /// The statistics of such a string are then composed per symbol without
    /// building it, so the reported check is still the first one in order.
    pub fn assess(&self, chromosome: &Chromosome) -> Assessment {
        let rules = RuleSet::evolved(chromosome.symbols());
        match rules.expand_bounded(&self.axiom, self.iterations, MAX_EXPANDED_LENGTH) {
            Some(expanded) => assess_expansion(&expanded),
            None => assess_stats(&expansion_stats(&rules, &self.axiom, self.iterations)),
        }
    }
}

/// Statistics of the expanded axiom, derived from the statistics of each
/// symbol's expansion one iteration at a time.
fn expansion_stats(rules: &RuleSet, axiom: &[Symbol], iterations: usize) -> ExpansionStats {
    let concat_all = |symbols: &[Symbol], table: &[ExpansionStats; ALPHABET_SIZE]| {
        symbols
            .iter()
            .fold(ExpansionStats::default(), |acc, symbol| {
                acc.concat(&table[symbol.encode() as usize])
            })
    };

    let mut table = ALPHABET.map(|symbol| ExpansionStats::collect(&[symbol]));
    for _ in 0..iterations {
        table = ALPHABET.map(|symbol| match rules.rule(symbol) {
            Some(image) => concat_all(image, &table),
            None => table[symbol.encode() as usize].clone(),
        });
    }
    concat_all(axiom, &table)
}

/// Runs the ordered checks and the scoring formula over an expanded string.
pub fn assess_expansion(expanded: &[Symbol]) -> Assessment {
    assess_stats(&ExpansionStats::collect(expanded))
}

fn assess_stats(stats: &ExpansionStats) -> Assessment {
    if let Some(check) = checks::first_failure(stats) {
        trace!(check = check.name(), length = stats.length, "candidate disqualified");
        return Assessment::Disqualified(check);
    }

    let raw = (stats.length * stats.distinct_symbols()) as f64
        / (stats.adjacent_repeats + 1) as f64;
    Assessment::Scored(raw.max(MIN_FITNESS))
}

impl Challenge<Chromosome> for GrammarChallenge {
    fn score(&self, phenotype: &Chromosome) -> f64 {
        self.assess(phenotype).score()
    }
}
