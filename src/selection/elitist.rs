use std::cmp::Ordering;

use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{validate_inputs, SelectionStrategy};

/// Selects the top-N individuals by fitness, unmodified.
///
/// Ranking is a stable descending sort: equal scores keep population order,
/// and NaN scores rank last.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    /// Returns population indices ordered from best to worst.
    pub fn rank(fitness: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..fitness.len()).collect();
        order.sort_by(|&a, &b| descending(fitness[a], fitness[b]));
        order
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

impl<P> SelectionStrategy<P> for ElitistSelection
where
    P: Phenotype,
{
    /// Never selects more individuals than the population holds.
    fn select(
        &self,
        population: &[P],
        fitness: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>> {
        validate_inputs(population, fitness)?;

        Ok(Self::rank(fitness)
            .into_iter()
            .take(num_to_select)
            .map(|idx| population[idx].clone())
            .collect())
    }
}
