//! # Symbol Codec
//!
//! The grammar alphabet has six symbols. Each symbol has a fixed gene value in
//! `0..=5`, stored once in [`ALPHABET`] and used in both directions:
//!
//! | gene | symbol | meaning                  |
//! |------|--------|--------------------------|
//! | 0    | `G`    | draw forward (evolvable) |
//! | 1    | `F`    | draw forward (fixed)     |
//! | 2    | `+`    | turn right               |
//! | 3    | `-`    | turn left                |
//! | 4    | `[`    | push state               |
//! | 5    | `]`    | pop state                |
//!
//! ## Example
//!
//! ```rust
//! use lsystem_evolver::symbol::{decode_genes, Symbol};
//!
//! assert_eq!(Symbol::Forward.encode(), 1);
//! assert_eq!(Symbol::decode(4), Some(Symbol::Push));
//! assert_eq!(decode_genes(&[1, 2, 1, 3, 1, 0]), "F+F-FG");
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 6;

/// Lookup table from gene value to symbol. The index of a symbol is its gene.
pub const ALPHABET: [Symbol; ALPHABET_SIZE] = [
    Symbol::Growth,
    Symbol::Forward,
    Symbol::TurnRight,
    Symbol::TurnLeft,
    Symbol::Push,
    Symbol::Pop,
];

/// A grammar symbol.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Symbol {
    /// `G`, the symbol whose production rule is evolved.
    Growth = 0,
    /// `F`, rewritten by the fixed rule `F -> FF`.
    Forward = 1,
    /// `+`
    TurnRight = 2,
    /// `-`
    TurnLeft = 3,
    /// `[`
    Push = 4,
    /// `]`
    Pop = 5,
}

impl Symbol {
    /// Returns the gene value of this symbol.
    pub const fn encode(self) -> u8 {
        self as u8
    }

    /// Returns the symbol for a gene value, or `None` outside `0..=5`.
    pub fn decode(gene: u8) -> Option<Symbol> {
        ALPHABET.get(gene as usize).copied()
    }

    /// Returns the character used for this symbol in rule strings.
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Growth => 'G',
            Symbol::Forward => 'F',
            Symbol::TurnRight => '+',
            Symbol::TurnLeft => '-',
            Symbol::Push => '[',
            Symbol::Pop => ']',
        }
    }

    /// Parses a rule-string character.
    pub fn from_char(c: char) -> Option<Symbol> {
        ALPHABET.iter().copied().find(|symbol| symbol.as_char() == c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Symbol {
    type Error = GeneticError;

    fn try_from(c: char) -> Result<Self> {
        Symbol::from_char(c).ok_or(GeneticError::InvalidSymbol(c))
    }
}

/// Parses a whole rule string into symbols.
///
/// # Errors
///
/// Returns [`GeneticError::InvalidSymbol`] for the first character outside the alphabet.
pub fn parse_symbols(rule: &str) -> Result<Vec<Symbol>> {
    rule.chars().map(Symbol::try_from).collect()
}

/// Renders a symbol sequence as a rule string.
pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().map(|symbol| symbol.as_char()).collect()
}

/// Decodes a gene sequence into its rule string, preserving order.
///
/// Genes outside the alphabet are skipped. Chromosomes built through
/// [`crate::chromosome::Chromosome`] never carry such genes.
pub fn decode_genes(genes: &[u8]) -> String {
    genes
        .iter()
        .filter_map(|&gene| Symbol::decode(gene))
        .map(Symbol::as_char)
        .collect()
}
