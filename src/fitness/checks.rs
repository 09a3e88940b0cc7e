//! Structural checks applied to an expanded string.
//!
//! Statistics are gathered in one pass into [`ExpansionStats`]; each
//! [`StructuralCheck`] is then a pure predicate over those statistics.
//! Statistics of a concatenation can be derived from those of its parts with
//! [`ExpansionStats::concat`], so strings too long to build can still be checked.

use std::fmt;

use crate::symbol::{Symbol, ALPHABET_SIZE};

/// Minimum number of `[` an expanded string must contain.
pub const MIN_BRANCHES: usize = 4;
/// Largest tolerated share of adjacent equal-symbol pairs.
pub const MAX_REPEAT_RATIO: f64 = 0.1;
/// Largest tolerated share of a single symbol class.
pub const MAX_DOMINANCE_RATIO: f64 = 0.8;
/// Longest expanded string that can still score above the minimum.
pub const MAX_EXPANDED_LENGTH: usize = 25_000;

/// Single-pass statistics of an expanded string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    pub length: usize,
    pub counts: [usize; ALPHABET_SIZE],
    pub first: Option<Symbol>,
    pub last: Option<Symbol>,
    /// Number of positions `i > 0` where `s[i] == s[i - 1]`.
    pub adjacent_repeats: usize,
    /// Lowest running `[`/`]` balance over all prefixes, the empty one included.
    pub min_bracket_balance: i64,
    pub final_bracket_balance: i64,
}

impl ExpansionStats {
    pub fn collect(expanded: &[Symbol]) -> Self {
        let mut stats = ExpansionStats {
            length: expanded.len(),
            first: expanded.first().copied(),
            last: expanded.last().copied(),
            ..Default::default()
        };

        let mut previous = None;
        let mut balance: i64 = 0;
        for &symbol in expanded {
            stats.counts[symbol.encode() as usize] += 1;
            if previous == Some(symbol) {
                stats.adjacent_repeats += 1;
            }
            previous = Some(symbol);

            match symbol {
                Symbol::Push => balance += 1,
                Symbol::Pop => balance -= 1,
                _ => {}
            }
            stats.min_bracket_balance = stats.min_bracket_balance.min(balance);
        }
        stats.final_bracket_balance = balance;
        stats
    }

    /// Statistics of `self` immediately followed by `right`.
    ///
    /// Counts saturate instead of overflowing.
    pub fn concat(&self, right: &Self) -> Self {
        let mut counts = self.counts;
        for (count, extra) in counts.iter_mut().zip(right.counts) {
            *count = count.saturating_add(extra);
        }
        let seam = usize::from(self.last.is_some() && self.last == right.first);

        Self {
            length: self.length.saturating_add(right.length),
            counts,
            first: self.first.or(right.first),
            last: right.last.or(self.last),
            adjacent_repeats: self
                .adjacent_repeats
                .saturating_add(right.adjacent_repeats)
                .saturating_add(seam),
            min_bracket_balance: self.min_bracket_balance.min(
                self.final_bracket_balance
                    .saturating_add(right.min_bracket_balance),
            ),
            final_bracket_balance: self
                .final_bracket_balance
                .saturating_add(right.final_bracket_balance),
        }
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.counts[symbol.encode() as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    fn share(&self, count: usize) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            count as f64 / self.length as f64
        }
    }
}

/// A named disqualification rule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralCheck {
    /// Every one of `F G [ ] + -` appears at least once.
    RequiredSymbols,
    /// The string starts with `F`.
    StartsWithForward,
    /// The running bracket balance never goes negative and ends at zero.
    BalancedBrackets,
    /// At least [`MIN_BRANCHES`] occurrences of `[`.
    MinimumBranches,
    /// Adjacent repeats do not exceed [`MAX_REPEAT_RATIO`] of the length.
    BoundedRedundancy,
    /// Neither `F`, `G`, nor the bracket pair exceeds [`MAX_DOMINANCE_RATIO`].
    NoDominantSymbol,
    /// The length does not exceed [`MAX_EXPANDED_LENGTH`].
    BoundedLength,
}

/// Checks in the order they are evaluated.
pub const ORDERED_CHECKS: [StructuralCheck; 7] = [
    StructuralCheck::RequiredSymbols,
    StructuralCheck::StartsWithForward,
    StructuralCheck::BalancedBrackets,
    StructuralCheck::MinimumBranches,
    StructuralCheck::BoundedRedundancy,
    StructuralCheck::NoDominantSymbol,
    StructuralCheck::BoundedLength,
];

impl StructuralCheck {
    pub fn passes(self, stats: &ExpansionStats) -> bool {
        match self {
            StructuralCheck::RequiredSymbols => stats.counts.iter().all(|&count| count > 0),
            StructuralCheck::StartsWithForward => stats.first == Some(Symbol::Forward),
            StructuralCheck::BalancedBrackets => {
                stats.min_bracket_balance >= 0 && stats.final_bracket_balance == 0
            }
            StructuralCheck::MinimumBranches => stats.count(Symbol::Push) >= MIN_BRANCHES,
            StructuralCheck::BoundedRedundancy => {
                stats.adjacent_repeats as f64 <= stats.length as f64 * MAX_REPEAT_RATIO
            }
            StructuralCheck::NoDominantSymbol => {
                let brackets = stats.count(Symbol::Push) + stats.count(Symbol::Pop);
                let dominant = [
                    stats.share(stats.count(Symbol::Forward)),
                    stats.share(stats.count(Symbol::Growth)),
                    stats.share(brackets),
                ]
                .into_iter()
                .fold(0.0_f64, f64::max);
                dominant <= MAX_DOMINANCE_RATIO
            }
            StructuralCheck::BoundedLength => stats.length <= MAX_EXPANDED_LENGTH,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StructuralCheck::RequiredSymbols => "required-symbols",
            StructuralCheck::StartsWithForward => "starts-with-forward",
            StructuralCheck::BalancedBrackets => "balanced-brackets",
            StructuralCheck::MinimumBranches => "minimum-branches",
            StructuralCheck::BoundedRedundancy => "bounded-redundancy",
            StructuralCheck::NoDominantSymbol => "no-dominant-symbol",
            StructuralCheck::BoundedLength => "bounded-length",
        }
    }
}

impl fmt::Display for StructuralCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the first failing check, if any.
pub fn first_failure(stats: &ExpansionStats) -> Option<StructuralCheck> {
    ORDERED_CHECKS
        .iter()
        .copied()
        .find(|check| !check.passes(stats))
}
