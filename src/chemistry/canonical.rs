//! Canonical textual form of parsed structures.
//!
//! Rendering is a single left-to-right pass that groups only *adjacent*
//! identical units: `HOH` stays `HOH`, `HHO` becomes `H2O`. Molecules are
//! grouped the same way at compound level, a repeated molecule being
//! wrapped as `(H2O)3`.
//!
//! Compound-level grouping compares the rendered molecule strings, so two
//! molecules that print alike are folded together even when their atom and
//! molecule charges are split differently. [`Fingerprint`], the key used to
//! look compounds up, keeps that distinction.

use crate::core::structure::{Compound, Molecule};
use std::fmt;

/// Charge suffix: `+`, `-`, `+N`, `-N`, or nothing for neutral.
pub fn charge_suffix(charge: i32) -> String {
    match charge {
        0 => String::new(),
        1 => "+".to_string(),
        -1 => "-".to_string(),
        c if c > 1 => format!("+{}", c),
        c => c.to_string(),
    }
}

/// Collapses consecutive equal items into `(item, run length)` pairs.
fn group_runs<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut runs: Vec<(T, usize)> = Vec::new();
    for item in items {
        match runs.last_mut() {
            Some((prev, count)) if *prev == item => *count += 1,
            _ => runs.push((item, 1)),
        }
    }
    runs
}

// ============================================================================
// KEYS
// ============================================================================

/// A charged symbol, the unit of molecule-level grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomKey {
    pub symbol: String,
    pub charge: i32,
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, charge_suffix(self.charge))
    }
}

/// Run-length grouped atoms of one molecule plus its charge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoleculeKey {
    runs: Vec<(AtomKey, usize)>,
    charge: i32,
}

impl MoleculeKey {
    pub fn of(molecule: &Molecule<'_>) -> Self {
        let atoms = molecule.atoms.iter().map(|a| AtomKey {
            symbol: a.symbol().to_string(),
            charge: a.charge(),
        });
        Self {
            runs: group_runs(atoms),
            charge: molecule.charge,
        }
    }
}

impl fmt::Display for MoleculeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (atom, count) in &self.runs {
            write!(f, "{}", atom)?;
            if *count > 1 {
                write!(f, "{}", count)?;
            }
        }
        f.write_str(&charge_suffix(self.charge))
    }
}

/// Structural identity of a compound: grouped molecules plus the compound charge.
///
/// Equal fingerprints always render the same canonical string. The converse
/// does not hold: `H` with an atom charge of +2 and `H` with a molecule charge
/// of +2 both print as `H+2` but are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    molecules: Vec<(MoleculeKey, usize)>,
    charge: i32,
}

impl Fingerprint {
    pub fn of(compound: &Compound<'_>) -> Self {
        Self {
            molecules: group_runs(compound.molecules.iter().map(MoleculeKey::of)),
            charge: compound.charge,
        }
    }

    pub fn molecules(&self) -> &[(MoleculeKey, usize)] {
        &self.molecules
    }
}

/// Renders a compound from its molecules' canonical strings, wrapping each
/// adjacent repeat as `(X)n`.
pub fn compound_string(molecules: impl IntoIterator<Item = String>, charge: i32) -> String {
    let mut out = String::new();
    for (molecule, count) in group_runs(molecules) {
        if count > 1 {
            out.push_str(&format!("({}){}", molecule, count));
        } else {
            out.push_str(&molecule);
        }
    }
    out.push_str(&charge_suffix(charge));
    out
}
