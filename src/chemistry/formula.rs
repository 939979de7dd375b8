use crate::core::structure::{Atom, Compound, Molecule};
use crate::core::tables::ElementTable;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on the expanded atom count of one formula. Any run in a
/// canonical string is at most this long, so canonical output always re-parses.
pub const MAX_ATOMS: usize = 100_000;

lazy_static! {
    /// One uppercase letter, any lowercase letters, any ASCII digits.
    static ref RE_TOKEN: Regex = Regex::new(r"([A-Z][a-z]*)([0-9]*)").unwrap();
}

// ============================================================================
// ERRORS & POLICY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown element symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: String, position: usize },

    #[error("repeat count '{count}' for '{symbol}' at position {position} exceeds {max}")]
    CountTooLarge {
        symbol: String,
        count: String,
        position: usize,
        max: usize,
    },

    #[error("formula expands to more than {max} atoms")]
    TooManyAtoms { max: usize },
}

/// What to do with a symbol the element table does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSymbolPolicy {
    /// Fail with [`ParseError::UnknownSymbol`].
    #[default]
    Reject,
    /// Keep an [`Atom::Unresolved`] placeholder and carry on.
    Placeholder,
}

// ============================================================================
// TOKENIZER
// ============================================================================

/// A `(symbol, count)` pair matched in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub symbol: &'s str,
    pub count: usize,
    /// Byte offset of the symbol in the formula.
    pub position: usize,
}

/// Splits a formula into tokens. Text that does not match the token grammar
/// (lowercase-led runs, punctuation, whitespace) is skipped silently.
pub fn tokenize(formula: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();

    for caps in RE_TOKEN.captures_iter(formula) {
        let (Some(whole), Some(symbol)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let digits = caps.get(2).map_or("", |m| m.as_str());

        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .ok()
                .filter(|&n| n <= MAX_ATOMS)
                .ok_or_else(|| ParseError::CountTooLarge {
                    symbol: symbol.as_str().to_string(),
                    count: digits.to_string(),
                    position: whole.start(),
                    max: MAX_ATOMS,
                })?
        };

        tokens.push(Token {
            symbol: symbol.as_str(),
            count,
            position: whole.start(),
        });
    }
    Ok(tokens)
}

// ============================================================================
// PARSER
// ============================================================================

/// Resolves formula strings against an element table.
#[derive(Debug, Clone, Copy)]
pub struct FormulaParser<'t> {
    elements: &'t ElementTable,
    policy: UnknownSymbolPolicy,
}

impl<'t> FormulaParser<'t> {
    pub fn new(elements: &'t ElementTable) -> Self {
        Self {
            elements,
            policy: UnknownSymbolPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownSymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses a formula into a single-molecule, neutral compound with no name or state.
    pub fn parse(&self, formula: &str) -> Result<Compound<'t>, ParseError> {
        let mut atoms = Vec::new();

        for token in tokenize(formula)? {
            let atom = match self.elements.get(token.symbol) {
                Some(element) => Atom::element(element),
                None => match self.policy {
                    UnknownSymbolPolicy::Reject => {
                        return Err(ParseError::UnknownSymbol {
                            symbol: token.symbol.to_string(),
                            position: token.position,
                        });
                    }
                    UnknownSymbolPolicy::Placeholder => {
                        warn!(
                            symbol = token.symbol,
                            position = token.position,
                            "unknown element symbol kept as placeholder"
                        );
                        Atom::unresolved(token.symbol)
                    }
                },
            };
            if atoms.len() + token.count > MAX_ATOMS {
                return Err(ParseError::TooManyAtoms { max: MAX_ATOMS });
            }
            atoms.extend(std::iter::repeat(atom).take(token.count));
        }

        debug!(formula, atoms = atoms.len(), "parsed formula");
        Ok(Compound::new(vec![Molecule::new(atoms)]))
    }
}
