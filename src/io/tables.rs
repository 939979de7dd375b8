use crate::chemistry::formula::FormulaParser;
use crate::core::structure::Element;
use crate::core::tables::{CompoundRecord, CompoundTable, ElementTable, ReferenceTables};
use crate::io::error::Error;
use crate::DataPaths;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// symbol, category, number, group, amu, fact, period, phase, name, colour
const ELEMENT_COLUMNS: usize = 10;
/// formula, name, state
const COMPOUND_COLUMNS: usize = 3;

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    // Rows are length-checked by hand so short rows report their line.
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// 1-based file line of a record; the header is line 1.
fn line_of(record: &StringRecord, index: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(index as u64 + 2)
}

fn require_columns(
    record: &StringRecord,
    path: &Path,
    line: u64,
    expected: usize,
) -> Result<(), Error> {
    if record.len() < expected {
        return Err(Error::MissingFields {
            path: path.to_path_buf(),
            line,
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    idx: usize,
    field: &'static str,
    path: &Path,
    line: u64,
) -> Result<T, Error> {
    let raw = &record[idx];
    raw.parse::<T>()
        .map_err(|_| Error::invalid_field(path, line, field, raw))
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// Reads the element table. `path` only labels errors.
pub fn read_elements<R: Read>(reader: R, path: &Path) -> Result<ElementTable, Error> {
    let mut table = ElementTable::new();

    for (i, result) in csv_reader(reader).records().enumerate() {
        let record = result.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line_of(&record, i);
        require_columns(&record, path, line, ELEMENT_COLUMNS)?;

        let element = Element {
            symbol: record[0].to_string(),
            category: record[1].to_string(),
            number: parse_field(&record, 2, "atomic number", path, line)?,
            group: parse_field(&record, 3, "group", path, line)?,
            amu: parse_field(&record, 4, "atomic mass", path, line)?,
            fact: record[5].to_string(),
            period: parse_field(&record, 6, "period", path, line)?,
            phase: record[7].to_string(),
            name: record[8].to_string(),
            colour: record[9].to_string(),
            charge: 0,
        };

        if let Some(previous) = table.insert(element) {
            debug!(
                symbol = %previous.symbol,
                line,
                "duplicate element symbol, keeping the later row"
            );
        }
    }

    info!(path = %path.display(), count = table.len(), "loaded element table");
    Ok(table)
}

pub fn load_elements(path: &Path) -> Result<ElementTable, Error> {
    read_elements(open(path)?, path)
}

// ============================================================================
// COMPOUNDS
// ============================================================================

/// Reads the named-compound table. Each formula is parsed strictly against
/// `elements` and keyed by its fingerprint.
pub fn read_compounds<R: Read>(
    reader: R,
    path: &Path,
    elements: &ElementTable,
) -> Result<CompoundTable, Error> {
    let parser = FormulaParser::new(elements);
    let mut table = CompoundTable::new();

    for (i, result) in csv_reader(reader).records().enumerate() {
        let record = result.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line_of(&record, i);
        require_columns(&record, path, line, COMPOUND_COLUMNS)?;

        let formula = &record[0];
        let compound = parser.parse(formula).map_err(|source| Error::Formula {
            path: path.to_path_buf(),
            line,
            formula: formula.to_string(),
            source,
        })?;

        let record = CompoundRecord {
            formula: formula.to_string(),
            name: record[1].to_string(),
            state: record[2].to_string(),
        };
        if let Some(previous) = table.insert(compound.fingerprint(), record) {
            debug!(formula = %previous.formula, line, "duplicate compound, keeping the later row");
        }
    }

    info!(path = %path.display(), count = table.len(), "loaded compound table");
    Ok(table)
}

pub fn load_compounds(path: &Path, elements: &ElementTable) -> Result<CompoundTable, Error> {
    read_compounds(open(path)?, path, elements)
}

/// Loads both tables. Elements first, since compound formulas resolve against them.
pub fn load_reference_tables(paths: &DataPaths) -> Result<ReferenceTables, Error> {
    let elements = load_elements(&paths.elements)?;
    let compounds = load_compounds(&paths.compounds, &elements)?;
    Ok(ReferenceTables { elements, compounds })
}
