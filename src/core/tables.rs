use crate::chemistry::canonical::Fingerprint;
use crate::core::structure::Element;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// ELEMENT TABLE
// ============================================================================

/// Symbol-keyed periodic reference data. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    by_symbol: HashMap<String, Element>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced if the symbol was taken.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        self.by_symbol.insert(element.symbol.clone(), element)
    }

    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.by_symbol.values()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

impl FromIterator<Element> for ElementTable {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut table = Self::new();
        for element in iter {
            table.insert(element);
        }
        table
    }
}

// ============================================================================
// COMPOUND TABLE
// ============================================================================

/// A named compound as listed in the reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundRecord {
    pub formula: String,
    pub name: String,
    pub state: String,
}

/// Named compounds keyed by structural fingerprint.
#[derive(Debug, Clone, Default)]
pub struct CompoundTable {
    by_fingerprint: HashMap<Fingerprint, CompoundRecord>,
}

impl CompoundTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later records with the same fingerprint win.
    pub fn insert(
        &mut self,
        fingerprint: Fingerprint,
        record: CompoundRecord,
    ) -> Option<CompoundRecord> {
        self.by_fingerprint.insert(fingerprint, record)
    }

    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&CompoundRecord> {
        self.by_fingerprint.get(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fingerprint.is_empty()
    }
}

/// Both reference tables, loaded together at startup.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub elements: ElementTable,
    pub compounds: CompoundTable,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn element(
        symbol: &str,
        name: &str,
        number: u32,
        group: u32,
        period: u32,
        amu: f64,
    ) -> Element {
        Element {
            symbol: symbol.to_string(),
            category: "test".to_string(),
            number,
            group,
            amu,
            fact: format!("{} fact", name),
            period,
            phase: "Solid".to_string(),
            name: name.to_string(),
            colour: "#ffffff".to_string(),
            charge: 0,
        }
    }

    /// A handful of real elements, including one f-block entry per strip.
    pub(crate) fn sample_elements() -> ElementTable {
        [
            element("H", "Hydrogen", 1, 1, 1, 1.008),
            element("He", "Helium", 2, 18, 1, 4.0026),
            element("C", "Carbon", 6, 14, 2, 12.011),
            element("N", "Nitrogen", 7, 15, 2, 14.007),
            element("O", "Oxygen", 8, 16, 2, 15.999),
            element("Ne", "Neon", 10, 18, 2, 20.180),
            element("Na", "Sodium", 11, 1, 3, 22.990),
            element("S", "Sulfur", 16, 16, 3, 32.06),
            element("Cl", "Chlorine", 17, 17, 3, 35.45),
            element("K", "Potassium", 19, 1, 4, 39.098),
            element("Fe", "Iron", 26, 8, 4, 55.845),
            element("La", "Lanthanum", 57, 3, 6, 138.91),
            element("U", "Uranium", 92, 0, 7, 238.03),
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_elements;
    use super::*;
    use crate::chemistry::formula::FormulaParser;

    #[test]
    fn element_lookup_misses_are_none() {
        let table = sample_elements();
        assert_eq!(table.get("O").map(|e| e.number), Some(8));
        assert!(table.get("Xx").is_none());
        assert!(table.get("o").is_none());
    }

    #[test]
    fn insert_replaces_duplicate_symbol() {
        let mut table = sample_elements();
        let before = table.len();
        let mut heavy = table.get("H").cloned().unwrap();
        heavy.amu = 2.014;
        let old = table.insert(heavy).unwrap();
        assert!((old.amu - 1.008).abs() < 1e-9);
        assert_eq!(table.len(), before);
    }

    #[test]
    fn compound_lookup_by_structure() {
        let elements = sample_elements();
        let parser = FormulaParser::new(&elements);
        let mut compounds = CompoundTable::new();
        let water = parser.parse("H2O").unwrap();
        compounds.insert(
            water.fingerprint(),
            CompoundRecord {
                formula: "H2O".into(),
                name: "Water".into(),
                state: "liquid".into(),
            },
        );

        let mut same = parser.parse("HHO").unwrap();
        assert!(same.enrich(&compounds));
        assert_eq!(same.name, "Water");
        assert_eq!(same.state, "liquid");

        let mut other = parser.parse("HOH").unwrap();
        assert!(!other.enrich(&compounds));
        assert!(other.name.is_empty());
    }
}
