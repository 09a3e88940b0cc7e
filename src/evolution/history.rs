//! Run bookkeeping: per-generation fitness scores and recorded best individuals.

use crate::chromosome::Chromosome;

/// Summary of one generation's fitness scores.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub mean: f64,
    /// Population variance (divides by `n`).
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl GenerationStats {
    /// Returns `None` for an empty score set.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            mean,
            variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median,
        })
    }
}

/// Append-only record of every generation's fitness scores, oldest first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessHistory {
    generations: Vec<Vec<f64>>,
}

impl FitnessHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, scores: Vec<f64>) {
        self.generations.push(scores);
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Scores of the `index`-th recorded generation (0-based).
    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.generations.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.generations.iter().map(Vec::as_slice)
    }

    pub fn stats(&self) -> Vec<GenerationStats> {
        self.iter().filter_map(GenerationStats::from_scores).collect()
    }
}

/// Why an individual was recorded.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordReason {
    /// Periodic snapshot of the top-ranked chromosome.
    Snapshot,
    /// The best chromosome of a new generation met the goal fitness.
    GoalHit,
}

/// An entry of the best-individuals record.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedIndividual {
    /// 1-based generation index at which it was recorded.
    pub generation: usize,
    pub chromosome: Chromosome,
    pub score: f64,
    pub reason: RecordReason,
}

impl RecordedIndividual {
    /// The decoded `G` rule.
    pub fn rule(&self) -> String {
        self.chromosome.to_rule()
    }
}
