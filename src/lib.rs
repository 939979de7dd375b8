// ============================================================================
// MODULE DECLARATIONS
// ============================================================================
pub mod analysis;
pub mod chemistry;
pub mod core;
pub mod display;
pub mod io;

// ============================================================================
// RE-EXPORTS (Public API)
// ============================================================================
pub use crate::analysis::report::Report;
pub use crate::chemistry::canonical::{charge_suffix, Fingerprint};
pub use crate::chemistry::electrons::electron_configuration;
pub use crate::chemistry::formula::{FormulaParser, ParseError, UnknownSymbolPolicy};
pub use crate::core::structure::{Atom, Compound, Element, Molecule};
pub use crate::core::tables::{CompoundRecord, CompoundTable, ElementTable, ReferenceTables};
pub use crate::display::PeriodicTable;
pub use crate::io::tables::load_reference_tables;

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Environment override for the reference data directory.
pub const DATA_DIR_ENV: &str = "FORMULA_INSPECTOR_DATA";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const ELEMENTS_FILE: &str = "elements.csv";
pub const COMPOUNDS_FILE: &str = "molecules.csv";

/// Locations of the two reference datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub elements: PathBuf,
    pub compounds: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            elements: dir.join(ELEMENTS_FILE),
            compounds: dir.join(COMPOUNDS_FILE),
        }
    }

    /// Explicit directory -> `FORMULA_INSPECTOR_DATA` -> `./data`.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let dir = explicit
            .or_else(|| env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::in_dir(&dir)
    }
}

/// Options for a single formula analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub policy: UnknownSymbolPolicy,
    /// Include per-element electron configurations in the report.
    pub electrons: bool,
}

// ============================================================================
// HIGH-LEVEL INTERFACE
// ============================================================================

/// Result of analysing one formula.
#[derive(Debug, Clone)]
pub struct Analysis<'t> {
    /// Parsed and, when the formula is a named compound, enriched structure.
    pub compound: Compound<'t>,
    pub report: Report,
}

impl Analysis<'_> {
    /// Distinct symbols present, for table highlighting.
    pub fn symbols(&self) -> std::collections::HashSet<&str> {
        self.compound
            .molecules
            .iter()
            .flat_map(Molecule::symbol_set)
            .collect()
    }
}

/// Parse, enrich from the compound table, and build the report.
pub fn analyze<'t>(
    tables: &'t ReferenceTables,
    formula: &str,
    config: &AnalysisConfig,
) -> Result<Analysis<'t>> {
    let parser = FormulaParser::new(&tables.elements).with_policy(config.policy);

    let mut compound = parser
        .parse(formula)
        .with_context(|| format!("Failed to parse formula '{}'", formula))?;

    if compound.enrich(&tables.compounds) {
        debug!(formula, name = %compound.name, "matched named compound");
    }

    let report = Report::build(formula, &compound, &tables.elements, config.electrons);
    Ok(Analysis { compound, report })
}
