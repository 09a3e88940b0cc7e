//! # Chromosome
//!
//! A chromosome is a fixed-length sequence of genes in `0..=5`, each gene one
//! grammar symbol. Decoded, it is the right-hand side of the `G` production.

use std::fmt;

use crate::caching::CacheKey;
use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::symbol::{self, Symbol, ALPHABET_SIZE};

/// Shortest chromosome that admits two distinct crossover cut points.
pub const MIN_CHROMOSOME_LENGTH: usize = 3;

/// A candidate production rule for `G`, stored as gene values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<u8>,
}

impl Chromosome {
    /// Creates a chromosome from raw genes.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidChromosome`] if any gene is outside `0..=5`.
    pub fn new(genes: Vec<u8>) -> Result<Self> {
        if let Some(bad) = genes.iter().find(|&&gene| gene as usize >= ALPHABET_SIZE) {
            return Err(GeneticError::InvalidChromosome(format!(
                "gene {} is outside the alphabet range 0..={}",
                bad,
                ALPHABET_SIZE - 1
            )));
        }
        Ok(Self { genes })
    }

    /// Draws `length` genes uniformly from the alphabet.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let genes = (0..length)
            .map(|_| rng.gen_index(ALPHABET_SIZE) as u8)
            .collect();
        Self { genes }
    }

    /// Parses a rule string such as `"F[+G]"` into a chromosome.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::InvalidSymbol`] for characters outside the alphabet.
    pub fn from_rule(rule: &str) -> Result<Self> {
        let genes = symbol::parse_symbols(rule)?
            .into_iter()
            .map(Symbol::encode)
            .collect();
        Ok(Self { genes })
    }

    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Decodes the genes into grammar symbols.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.genes
            .iter()
            .filter_map(|&gene| Symbol::decode(gene))
            .collect()
    }

    /// Decodes the genes into a rule string.
    pub fn to_rule(&self) -> String {
        symbol::decode_genes(&self.genes)
    }

    /// Two-point crossover at explicit cut points.
    ///
    /// Child A is `self[..cut1] + other[cut1..cut2] + self[cut2..]`, child B the
    /// complementary composition.
    ///
    /// # Errors
    ///
    /// Fails if the parents differ in length, are shorter than
    /// [`MIN_CHROMOSOME_LENGTH`], or if the cuts do not satisfy
    /// `1 <= cut1 < cut2 <= len - 1`.
    pub fn crossover_at(&self, other: &Self, cut1: usize, cut2: usize) -> Result<(Self, Self)> {
        let len = self.check_crossover_partner(other)?;
        if cut1 < 1 || cut1 >= cut2 || cut2 > len - 1 {
            return Err(GeneticError::InvalidChromosome(format!(
                "cut points ({}, {}) are invalid for length {}",
                cut1, cut2, len
            )));
        }

        let splice = |outer: &[u8], inner: &[u8]| -> Vec<u8> {
            let mut genes = Vec::with_capacity(len);
            genes.extend_from_slice(&outer[..cut1]);
            genes.extend_from_slice(&inner[cut1..cut2]);
            genes.extend_from_slice(&outer[cut2..]);
            genes
        };

        Ok((
            Self {
                genes: splice(&self.genes, &other.genes),
            },
            Self {
                genes: splice(&other.genes, &self.genes),
            },
        ))
    }

    /// Reverses the half-open span `start..end` in place.
    ///
    /// Out-of-range bounds are clamped; an empty span is a no-op.
    pub fn invert(&mut self, start: usize, end: usize) {
        let end = end.min(self.genes.len());
        if start < end {
            self.genes[start..end].reverse();
        }
    }

    fn check_crossover_partner(&self, other: &Self) -> Result<usize> {
        let len = self.len();
        if len != other.len() {
            return Err(GeneticError::InvalidChromosome(format!(
                "cannot recombine chromosomes of lengths {} and {}",
                len,
                other.len()
            )));
        }
        if len < MIN_CHROMOSOME_LENGTH {
            return Err(GeneticError::InvalidChromosome(format!(
                "two-point crossover needs at least {} genes, got {}",
                MIN_CHROMOSOME_LENGTH, len
            )));
        }
        Ok(len)
    }
}

impl Phenotype for Chromosome {
    /// Picks `cut1` uniformly in `[1, len - 2]` and `cut2` in `[cut1 + 1, len - 1]`.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        let len = self.check_crossover_partner(other)?;
        let cut1 = rng.gen_inclusive(1, len - 2);
        let cut2 = rng.gen_inclusive(cut1 + 1, len - 1);
        self.crossover_at(other, cut1, cut2)
    }

    /// Inversion mutation: with probability `rate`, draws `start` uniformly
    /// from the chromosome and `end` uniformly from `[start, len - 1]`, then
    /// reverses `start..end`.
    fn mutate(&mut self, rate: f64, rng: &mut RandomNumberGenerator) {
        if self.genes.is_empty() || !rng.chance(rate) {
            return;
        }
        let last = self.genes.len() - 1;
        let start = rng.gen_inclusive(0, last);
        let end = rng.gen_inclusive(start, last);
        self.invert(start, end);
    }
}

impl CacheKey for Chromosome {
    type Key = Vec<u8>;

    fn cache_key(&self) -> Self::Key {
        self.genes.clone()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(genes: &[u8]) -> Vec<u8> {
        let mut genes = genes.to_vec();
        genes.sort_unstable();
        genes
    }

    #[test]
    fn test_new_rejects_out_of_range_gene() {
        assert!(Chromosome::new(vec![0, 1, 5]).is_ok());
        match Chromosome::new(vec![0, 6, 1]) {
            Err(GeneticError::InvalidChromosome(msg)) => assert!(msg.contains("gene 6")),
            _ => panic!("Expected InvalidChromosome error"),
        }
    }

    #[test]
    fn test_rule_round_trip() {
        let chromosome = Chromosome::from_rule("F+F-FG").unwrap();
        assert_eq!(chromosome.genes(), &[1, 2, 1, 3, 1, 0]);
        assert_eq!(chromosome.to_rule(), "F+F-FG");
        assert_eq!(chromosome.to_string(), "F+F-FG");
    }

    #[test]
    fn test_random_genes_in_range() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let chromosome = Chromosome::random(200, &mut rng);
        assert_eq!(chromosome.len(), 200);
        assert!(chromosome.genes().iter().all(|&g| g < 6));
    }

    #[test]
    fn test_crossover_at_segments() {
        let a = Chromosome::new(vec![0, 0, 0, 0, 0, 0]).unwrap();
        let b = Chromosome::new(vec![1, 1, 1, 1, 1, 1]).unwrap();

        let (child_a, child_b) = a.crossover_at(&b, 2, 4).unwrap();
        assert_eq!(child_a.genes(), &[0, 0, 1, 1, 0, 0]);
        assert_eq!(child_b.genes(), &[1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_crossover_at_rejects_bad_cuts() {
        let a = Chromosome::new(vec![0, 1, 2, 3]).unwrap();
        let b = Chromosome::new(vec![3, 2, 1, 0]).unwrap();

        assert!(a.crossover_at(&b, 0, 2).is_err());
        assert!(a.crossover_at(&b, 2, 2).is_err());
        assert!(a.crossover_at(&b, 1, 4).is_err());
        assert!(a.crossover_at(&b, 1, 3).is_ok());
    }

    #[test]
    fn test_crossover_rejects_short_or_mismatched() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let short = Chromosome::new(vec![0, 1]).unwrap();
        assert!(short.crossover(&short, &mut rng).is_err());

        let a = Chromosome::new(vec![0, 1, 2]).unwrap();
        let b = Chromosome::new(vec![0, 1, 2, 3]).unwrap();
        assert!(a.crossover(&b, &mut rng).is_err());
    }

    #[test]
    fn test_crossover_preserves_length_and_segments() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let a = Chromosome::new(vec![0, 1, 2, 3, 4, 5, 0, 1]).unwrap();
        let b = Chromosome::new(vec![5, 4, 3, 2, 1, 0, 5, 4]).unwrap();

        for _ in 0..200 {
            let (child_a, child_b) = a.crossover(&b, &mut rng).unwrap();
            assert_eq!(child_a.len(), a.len());
            assert_eq!(child_b.len(), b.len());

            // Position-wise, each child takes every gene from exactly one parent,
            // and the two children never take the same parent at the same locus.
            for i in 0..a.len() {
                let from_a = child_a.genes()[i] == a.genes()[i] && child_b.genes()[i] == b.genes()[i];
                let from_b = child_a.genes()[i] == b.genes()[i] && child_b.genes()[i] == a.genes()[i];
                assert!(from_a || from_b);
            }
            assert_eq!(child_a.genes()[0], a.genes()[0]);
            assert_eq!(child_b.genes()[0], b.genes()[0]);

            // The swapped loci form one contiguous, non-empty middle segment.
            let swapped: Vec<usize> = (0..a.len())
                .filter(|&i| child_a.genes()[i] != a.genes()[i])
                .collect();
            assert!(!swapped.is_empty());
            let first = swapped[0];
            let last = swapped[swapped.len() - 1];
            assert_eq!(swapped.len(), last - first + 1);
            assert!(first >= 1 && last < a.len() - 1);
        }
    }

    #[test]
    fn test_minimum_length_crossover() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let a = Chromosome::new(vec![0, 0, 0]).unwrap();
        let b = Chromosome::new(vec![1, 1, 1]).unwrap();

        // With three genes the only legal cuts are (1, 2).
        let (child_a, child_b) = a.crossover(&b, &mut rng).unwrap();
        assert_eq!(child_a.genes(), &[0, 1, 0]);
        assert_eq!(child_b.genes(), &[1, 0, 1]);
    }

    #[test]
    fn test_invert() {
        let mut chromosome = Chromosome::new(vec![0, 1, 2, 3, 4, 5]).unwrap();
        chromosome.invert(1, 4);
        assert_eq!(chromosome.genes(), &[0, 3, 2, 1, 4, 5]);

        chromosome.invert(2, 2);
        assert_eq!(chromosome.genes(), &[0, 3, 2, 1, 4, 5]);

        chromosome.invert(4, 99);
        assert_eq!(chromosome.genes(), &[0, 3, 2, 1, 5, 4]);
    }

    #[test]
    fn test_mutate_keeps_multiset() {
        let mut rng = RandomNumberGenerator::from_seed(21);
        let original = Chromosome::new(vec![0, 1, 2, 3, 4, 5, 5, 4, 1, 0]).unwrap();
        let mut chromosome = original.clone();

        for _ in 0..200 {
            chromosome.mutate(1.0, &mut rng);
            assert_eq!(chromosome.len(), original.len());
            assert_eq!(sorted(chromosome.genes()), sorted(original.genes()));
        }
    }

    #[test]
    fn test_mutate_zero_rate_is_identity() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let original = Chromosome::new(vec![0, 1, 2, 3, 4, 5]).unwrap();
        let mut chromosome = original.clone();

        for _ in 0..50 {
            chromosome.mutate(0.0, &mut rng);
        }
        assert_eq!(chromosome, original);
    }
}
