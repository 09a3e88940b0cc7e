use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// One generation: a non-empty collection of equal-length chromosomes.
///
/// Populations are never edited in place; each generation transition builds
/// a fresh one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Wraps existing chromosomes.
    ///
    /// # Errors
    ///
    /// Fails on an empty collection or on chromosomes of differing lengths.
    pub fn new(chromosomes: Vec<Chromosome>) -> Result<Self> {
        let first = chromosomes.first().ok_or(GeneticError::EmptyPopulation)?;
        let length = first.len();
        if let Some(odd) = chromosomes.iter().find(|c| c.len() != length) {
            return Err(GeneticError::InvalidChromosome(format!(
                "population mixes chromosome lengths {} and {}",
                length,
                odd.len()
            )));
        }
        Ok(Self { chromosomes })
    }

    /// Draws `size` chromosomes of `length` uniformly random genes.
    pub fn random(size: usize, length: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            chromosomes: (0..size).map(|_| Chromosome::random(length, rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Length shared by every chromosome.
    pub fn chromosome_length(&self) -> usize {
        self.chromosomes.first().map_or(0, Chromosome::len)
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn into_inner(self) -> Vec<Chromosome> {
        self.chromosomes
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
