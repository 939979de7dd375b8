use crate::chemistry::canonical::{charge_suffix, compound_string, Fingerprint, MoleculeKey};
use crate::chemistry::electrons::electron_configuration;
use crate::core::tables::CompoundTable;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// ELEMENT
// ============================================================================

/// One row of the periodic reference table.
///
/// Records are owned by [`ElementTable`](crate::core::tables::ElementTable) and
/// borrowed by every [`Atom`] that resolves to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub symbol: String,
    pub category: String,
    /// Atomic number.
    pub number: u32,
    /// IUPAC group 1..=18, or 0 for the f-block and anything without one.
    pub group: u32,
    /// Standard atomic mass in u.
    pub amu: f64,
    pub fact: String,
    pub period: u32,
    pub phase: String,
    pub name: String,
    pub colour: String,
    /// Ionic charge. Always 0 for table entries.
    pub charge: i32,
}

impl Element {
    /// Returns a copy of this element carrying an ionic charge.
    pub fn ion(&self, charge: i32) -> Self {
        Self {
            charge,
            ..self.clone()
        }
    }

    pub fn electron_configuration(&self) -> String {
        electron_configuration(self.number)
    }
}

/// Charged symbol form: `Fe`, `Fe+2`, `Cl-`, `O-2`.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, charge_suffix(self.charge))
    }
}

// ============================================================================
// ATOM
// ============================================================================

/// A single element occurrence inside a [`Molecule`].
#[derive(Debug, Clone, PartialEq)]
pub enum Atom<'t> {
    /// Resolved against the element table. Borrowed for plain table entries,
    /// owned when an ionic charge has been attached.
    Resolved(Cow<'t, Element>),
    /// A symbol the element table does not know. Only produced by a lenient parser.
    Unresolved { symbol: String },
}

impl<'t> Atom<'t> {
    pub fn element(element: &'t Element) -> Self {
        Atom::Resolved(Cow::Borrowed(element))
    }

    pub fn ion(element: &Element, charge: i32) -> Self {
        Atom::Resolved(Cow::Owned(element.ion(charge)))
    }

    pub fn unresolved(symbol: impl Into<String>) -> Self {
        Atom::Unresolved {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Atom::Resolved(el) => &el.symbol,
            Atom::Unresolved { symbol } => symbol,
        }
    }

    pub fn charge(&self) -> i32 {
        match self {
            Atom::Resolved(el) => el.charge,
            Atom::Unresolved { .. } => 0,
        }
    }

    /// Atomic mass; placeholders weigh nothing.
    pub fn mass(&self) -> f64 {
        match self {
            Atom::Resolved(el) => el.amu,
            Atom::Unresolved { .. } => 0.0,
        }
    }

    pub fn resolved(&self) -> Option<&Element> {
        match self {
            Atom::Resolved(el) => Some(&**el),
            Atom::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Atom::Resolved(_))
    }
}

impl fmt::Display for Atom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Resolved(el) => fmt::Display::fmt(&**el, f),
            Atom::Unresolved { symbol } => f.write_str(symbol),
        }
    }
}

// ============================================================================
// MOLECULE
// ============================================================================

/// One contiguous chemical unit. Atoms are stored expanded, one entry per
/// atom instance; run-length compression only happens when rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule<'t> {
    pub atoms: Vec<Atom<'t>>,
    pub charge: i32,
    pub name: String,
    pub state: String,
}

impl<'t> Molecule<'t> {
    pub fn new(atoms: Vec<Atom<'t>>) -> Self {
        Self {
            atoms,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    /// Wraps this molecule as a single-molecule compound.
    pub fn to_compound(&self) -> Compound<'t> {
        Compound {
            molecules: vec![self.clone()],
            charge: self.charge,
            state: self.state.clone(),
            name: String::new(),
        }
    }

    pub fn mass(&self) -> f64 {
        self.atoms.iter().map(Atom::mass).sum()
    }

    /// Plain concatenation of every atom symbol, no counts and no charges.
    pub fn simplify(&self) -> String {
        self.atoms.iter().map(Atom::symbol).collect()
    }

    /// Canonical form, e.g. `H2O` or `SO4-2`.
    pub fn canonical(&self) -> String {
        MoleculeKey::of(self).to_string()
    }

    /// Distinct symbols present, for highlighting.
    pub fn symbol_set(&self) -> HashSet<&str> {
        self.atoms.iter().map(Atom::symbol).collect()
    }

    /// Resolved elements in first-occurrence order, without repeats.
    pub fn distinct_elements(&self) -> Vec<&Element> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .filter_map(Atom::resolved)
            .filter(|el| seen.insert(el.symbol.as_str()))
            .collect()
    }

    pub fn unresolved_symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .filter(|a| !a.is_resolved())
            .map(Atom::symbol)
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

impl fmt::Display for Molecule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&MoleculeKey::of(self), f)
    }
}

// ============================================================================
// COMPOUND
// ============================================================================

/// Top-level parsed object: an ordered sequence of molecules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound<'t> {
    pub molecules: Vec<Molecule<'t>>,
    pub charge: i32,
    pub state: String,
    pub name: String,
}

impl<'t> Compound<'t> {
    pub fn new(molecules: Vec<Molecule<'t>>) -> Self {
        Self {
            molecules,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn mass(&self) -> f64 {
        self.molecules.iter().map(Molecule::mass).sum()
    }

    /// Own charge plus every molecule charge plus every atom charge.
    pub fn total_charge(&self) -> i32 {
        self.charge
            + self
                .molecules
                .iter()
                .map(|m| m.charge + m.atoms.iter().map(Atom::charge).sum::<i32>())
                .sum::<i32>()
    }

    /// Flattens every molecule into one, carrying the compound's charge, name and state.
    pub fn to_molecule(&self) -> Molecule<'t> {
        Molecule {
            atoms: self
                .molecules
                .iter()
                .flat_map(|m| m.atoms.iter().cloned())
                .collect(),
            charge: self.charge,
            name: self.name.clone(),
            state: self.state.clone(),
        }
    }

    /// The compound's own name followed by every named molecule, comma separated.
    /// Empty names are skipped.
    pub fn display_name(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.molecules.iter().map(|m| m.name.as_str()))
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }

    /// Canonical form, e.g. `(H2O)3` or `NH4+`.
    pub fn canonical(&self) -> String {
        compound_string(self.molecules.iter().map(Molecule::canonical), self.charge)
    }

    /// Copies name and state from the matching named compound, if any.
    pub fn enrich(&mut self, table: &CompoundTable) -> bool {
        match table.lookup(&self.fingerprint()) {
            Some(record) => {
                self.name = record.name.clone();
                self.state = record.state.clone();
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Compound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
