use crate::core::structure::{Compound, Element};
use crate::core::tables::ElementTable;
use serde::Serialize;
use std::fmt;

/// Extra lines shown when the formula is exactly one element symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementFacts {
    pub number: u32,
    pub category: String,
    pub fact: String,
}

impl From<&Element> for ElementFacts {
    fn from(el: &Element) -> Self {
        Self {
            number: el.number,
            category: el.category.clone(),
            fact: el.fact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellLine {
    pub symbol: String,
    pub number: u32,
    pub configuration: String,
}

/// Everything printed for one formula, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub molecule: String,
    pub simplified: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    pub mass: f64,
    pub charge: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementFacts>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub electron_configurations: Vec<ShellLine>,
}

impl Report {
    /// `formula` is the raw input; it is matched verbatim against element
    /// symbols so `O` reports oxygen but `O1` does not.
    pub fn build(
        formula: &str,
        compound: &Compound<'_>,
        elements: &ElementTable,
        electrons: bool,
    ) -> Self {
        let flat = compound.to_molecule();
        let exact = elements.get(formula);

        let name = match exact {
            Some(el) => el.name.clone(),
            None => compound.display_name(),
        };

        let electron_configurations = if electrons {
            flat.distinct_elements()
                .into_iter()
                .map(|el| ShellLine {
                    symbol: el.symbol.clone(),
                    number: el.number,
                    configuration: el.electron_configuration(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            molecule: compound.canonical(),
            simplified: flat.simplify(),
            name,
            state: compound.state.clone(),
            mass: compound.mass(),
            charge: compound.total_charge(),
            unresolved: flat.unresolved_symbols().into_iter().map(String::from).collect(),
            element: exact.map(ElementFacts::from),
            electron_configurations,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Molecule : {}", self.molecule)?;
        writeln!(f, "  Simplify : {}", self.simplified)?;
        writeln!(f, "  Name     : {}", self.name)?;
        if !self.state.is_empty() {
            writeln!(f, "  State    : {}", self.state)?;
        }
        writeln!(f, "  Mass     : {:.3}", self.mass)?;
        writeln!(f, "  Charge   : {}", self.charge)?;
        if !self.unresolved.is_empty() {
            writeln!(f, "  Unknown  : {}", self.unresolved.join(", "))?;
        }
        if let Some(el) = &self.element {
            writeln!(f, "  Number   : {}", el.number)?;
            writeln!(f, "  Category : {}", el.category)?;
            writeln!(f, "  Fact     : {}", el.fact)?;
        }

        if !self.electron_configurations.is_empty() {
            writeln!(f)?;
            for line in &self.electron_configurations {
                writeln!(f, "  {}({}): {}", line.symbol, line.number, line.configuration)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::formula::{FormulaParser, UnknownSymbolPolicy};
    use crate::core::tables::fixtures::sample_elements;

    #[test]
    fn single_element_report_has_facts_and_name() {
        let elements = sample_elements();
        let compound = FormulaParser::new(&elements).parse("O").unwrap();
        let report = Report::build("O", &compound, &elements, false);

        assert_eq!(report.name, "Oxygen");
        assert_eq!(report.element.as_ref().map(|e| e.number), Some(8));

        let text = report.to_string();
        let labels: Vec<_> = text.lines().map(|l| l[2..11].trim_end()).collect();
        assert_eq!(
            labels,
            vec!["Molecule", "Simplify", "Name", "Mass", "Charge", "Number", "Category", "Fact"]
        );
    }

    #[test]
    fn multi_atom_formula_has_no_element_facts() {
        let elements = sample_elements();
        let compound = FormulaParser::new(&elements).parse("O2").unwrap();
        let report = Report::build("O2", &compound, &elements, false);
        assert!(report.element.is_none());
        assert_eq!(report.molecule, "O2");
        assert_eq!(report.simplified, "OO");
        assert!(report.name.is_empty());
        assert!(!report.to_string().contains("State"));
    }

    #[test]
    fn state_line_appears_when_known() {
        let elements = sample_elements();
        let mut compound = FormulaParser::new(&elements).parse("H2O").unwrap();
        compound.name = "Water".into();
        compound.state = "Liquid".into();
        let text = Report::build("H2O", &compound, &elements, false).to_string();
        assert!(text.contains("  Name     : Water\n  State    : Liquid\n  Mass     : 18.015\n"));
    }

    #[test]
    fn electron_lines_are_distinct_in_first_occurrence_order() {
        let elements = sample_elements();
        let compound = FormulaParser::new(&elements).parse("NaClNa").unwrap();
        let report = Report::build("NaClNa", &compound, &elements, true);
        let lines: Vec<_> = report
            .electron_configurations
            .iter()
            .map(|l| format!("{}({}): {}", l.symbol, l.number, l.configuration))
            .collect();
        assert_eq!(lines, vec!["Na(11): 2 8 1", "Cl(17): 2 8 7"]);
    }

    #[test]
    fn placeholders_are_listed() {
        let elements = sample_elements();
        let compound = FormulaParser::new(&elements)
            .with_policy(UnknownSymbolPolicy::Placeholder)
            .parse("QqH")
            .unwrap();
        let report = Report::build("QqH", &compound, &elements, true);
        assert_eq!(report.unresolved, vec!["Qq"]);
        assert_eq!(report.electron_configurations.len(), 1);
        assert!(report.to_string().contains("  Unknown  : Qq\n"));
    }
}
