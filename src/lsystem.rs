//! # L-system Expansion
//!
//! A [`RuleSet`] maps symbols to replacement strings. Expansion rewrites every
//! symbol of the current string in parallel, keeping symbols without a rule
//! unchanged, and repeats this for a fixed number of iterations.
//!
//! ```rust
//! use lsystem_evolver::lsystem::RuleSet;
//! use lsystem_evolver::symbol::{parse_symbols, render};
//!
//! let rules = RuleSet::evolved(parse_symbols("F+F-FG").unwrap());
//! let axiom = parse_symbols("G").unwrap();
//!
//! assert_eq!(render(&rules.expand(&axiom, 1)), "F+F-FG");
//! assert_eq!(render(&rules.expand(&axiom, 2)), "FF+FF-FFF+F-FG");
//! ```

use crate::symbol::{Symbol, ALPHABET_SIZE};

/// Production rules indexed by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    productions: [Option<Vec<Symbol>>; ALPHABET_SIZE],
}

impl RuleSet {
    /// An empty rule set; every symbol rewrites to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set searched by the optimizer: `F -> FF` and `G -> growth`.
    pub fn evolved(growth: Vec<Symbol>) -> Self {
        Self::new()
            .with_rule(Symbol::Forward, vec![Symbol::Forward, Symbol::Forward])
            .with_rule(Symbol::Growth, growth)
    }

    pub fn with_rule(mut self, symbol: Symbol, replacement: Vec<Symbol>) -> Self {
        self.productions[symbol.encode() as usize] = Some(replacement);
        self
    }

    pub fn rule(&self, symbol: Symbol) -> Option<&[Symbol]> {
        self.productions[symbol.encode() as usize].as_deref()
    }

    /// Rewrites `axiom` `iterations` times.
    pub fn expand(&self, axiom: &[Symbol], iterations: usize) -> Vec<Symbol> {
        let mut current = axiom.to_vec();
        for _ in 0..iterations {
            current = self.rewrite(&current);
        }
        current
    }

    /// Like [`RuleSet::expand`], but gives up with `None` as soon as the string
    /// grows beyond `max_len` symbols.
    pub fn expand_bounded(
        &self,
        axiom: &[Symbol],
        iterations: usize,
        max_len: usize,
    ) -> Option<Vec<Symbol>> {
        if axiom.len() > max_len {
            return None;
        }
        let mut current = axiom.to_vec();
        for _ in 0..iterations {
            let next_len: usize = current.iter().map(|&s| self.image_len(s)).sum();
            if next_len > max_len {
                return None;
            }
            current = self.rewrite(&current);
        }
        Some(current)
    }

    fn image_len(&self, symbol: Symbol) -> usize {
        self.rule(symbol).map_or(1, <[Symbol]>::len)
    }

    fn rewrite(&self, current: &[Symbol]) -> Vec<Symbol> {
        let mut next = Vec::with_capacity(current.iter().map(|&s| self.image_len(s)).sum());
        for &symbol in current {
            match self.rule(symbol) {
                Some(replacement) => next.extend_from_slice(replacement),
                None => next.push(symbol),
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{parse_symbols, render};

    #[test]
    fn test_symbols_without_rule_are_kept() {
        let rules = RuleSet::evolved(parse_symbols("G").unwrap());
        let axiom = parse_symbols("+[-]").unwrap();
        assert_eq!(render(&rules.expand(&axiom, 3)), "+[-]");
    }

    #[test]
    fn test_forward_doubles_each_iteration() {
        let rules = RuleSet::evolved(Vec::new());
        let axiom = parse_symbols("F").unwrap();
        assert_eq!(rules.expand(&axiom, 4).len(), 16);
    }

    #[test]
    fn test_zero_iterations_returns_axiom() {
        let rules = RuleSet::evolved(parse_symbols("FF").unwrap());
        let axiom = parse_symbols("GF").unwrap();
        assert_eq!(rules.expand(&axiom, 0), axiom);
    }

    #[test]
    fn test_empty_growth_rule_erases_g() {
        let rules = RuleSet::evolved(Vec::new());
        let axiom = parse_symbols("FGF").unwrap();
        assert_eq!(render(&rules.expand(&axiom, 1)), "FFFF");
    }

    #[test]
    fn test_expand_bounded() {
        let rules = RuleSet::evolved(parse_symbols("GG").unwrap());
        let axiom = parse_symbols("G").unwrap();

        let bounded = rules.expand_bounded(&axiom, 3, 8).unwrap();
        assert_eq!(bounded.len(), 8);
        assert_eq!(bounded, rules.expand(&axiom, 3));

        assert!(rules.expand_bounded(&axiom, 4, 8).is_none());
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleSet::new().with_rule(Symbol::Push, parse_symbols("[+").unwrap());
        let axiom = parse_symbols("F[").unwrap();
        assert_eq!(render(&rules.expand(&axiom, 2)), "F[++");
        assert!(rules.rule(Symbol::Forward).is_none());
    }
}
