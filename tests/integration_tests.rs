use formula_inspector::io::tables::{load_compounds, load_elements};
use formula_inspector::{
    analyze, load_reference_tables, AnalysisConfig, DataPaths, FormulaParser, PeriodicTable,
    ReferenceTables, UnknownSymbolPolicy,
};
use std::collections::HashSet;
use std::path::PathBuf;

fn data_paths() -> DataPaths {
    let root_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    DataPaths::in_dir(&root_dir.join("data"))
}

fn tables() -> ReferenceTables {
    load_reference_tables(&data_paths()).expect("Failed to load bundled reference data")
}

#[test]
fn test_bundled_tables_load() {
    let paths = data_paths();
    assert!(paths.elements.exists(), "Missing {:?}", paths.elements);
    assert!(paths.compounds.exists(), "Missing {:?}", paths.compounds);

    let elements = load_elements(&paths.elements).expect("Failed to load elements");
    assert_eq!(elements.len(), 118);

    let compounds = load_compounds(&paths.compounds, &elements).expect("Failed to load compounds");
    assert!(!compounds.is_empty());
}

#[test]
fn test_every_element_fits_the_table_layout() {
    let tables = tables();
    let table = PeriodicTable::from_elements(&tables.elements);
    assert_eq!(table.placed(), 118);
    assert_eq!(table.at(7, 18), Some("Og"));
    assert!(table.lanthanides().iter().all(Option::is_some));
    assert!(table.actinides().iter().all(Option::is_some));
}

#[test]
fn test_water_report() {
    let tables = tables();
    let analysis =
        analyze(&tables, "H2O", &AnalysisConfig::default()).expect("Failed to analyze H2O");
    let report = &analysis.report;

    assert_eq!(report.molecule, "H2O");
    assert_eq!(report.simplified, "HHO");
    assert_eq!(report.name, "Water");
    assert_eq!(report.state, "Liquid");
    assert_eq!(report.charge, 0);
    assert!((report.mass - (2.0 * 1.008 + 15.999)).abs() < 1e-9);
    assert!(report.element.is_none());
}

#[test]
fn test_named_compound_matches_by_structure_not_spelling() {
    let tables = tables();
    let analysis = analyze(&tables, "HHO", &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.report.name, "Water");
    assert_eq!(analysis.report.molecule, "H2O");

    let unnamed = analyze(&tables, "HOH", &AnalysisConfig::default()).unwrap();
    assert!(unnamed.report.name.is_empty());
}

#[test]
fn test_single_element_prefers_element_name() {
    let tables = tables();
    let config = AnalysisConfig {
        electrons: true,
        ..AnalysisConfig::default()
    };
    let analysis = analyze(&tables, "Na", &config).unwrap();
    let report = &analysis.report;

    assert_eq!(report.name, "Sodium");
    let facts = report.element.as_ref().expect("Expected element facts");
    assert_eq!(facts.number, 11);
    assert_eq!(facts.category, "Alkali metal");
    assert_eq!(report.electron_configurations.len(), 1);
    assert_eq!(report.electron_configurations[0].configuration, "2 8 1");

    // O2 is a named compound, not the bare element.
    let oxygen = analyze(&tables, "O2", &AnalysisConfig::default()).unwrap();
    assert_eq!(oxygen.report.name, "Oxygen");
    assert!(oxygen.report.element.is_none());
}

#[test]
fn test_unknown_symbol_strict_and_lenient() {
    let tables = tables();
    let err = analyze(&tables, "H2Qz", &AnalysisConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Qz"));

    let lenient = AnalysisConfig {
        policy: UnknownSymbolPolicy::Placeholder,
        ..AnalysisConfig::default()
    };
    let analysis = analyze(&tables, "H2Qz", &lenient).expect("Lenient parse must not fail");
    assert_eq!(analysis.report.molecule, "H2Qz");
    assert_eq!(analysis.report.unresolved, vec!["Qz".to_string()]);
}

#[test]
fn test_highlight_symbols_and_render() {
    let tables = tables();
    let analysis = analyze(&tables, "C6H12O6", &AnalysisConfig::default()).unwrap();
    let symbols = analysis.symbols();
    let expected: HashSet<&str> = ["C", "H", "O"].into_iter().collect();
    assert_eq!(symbols, expected);

    let mut out = Vec::new();
    PeriodicTable::from_elements(&tables.elements)
        .render(&mut out, &symbols, false)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("C*  N   O*  F   Ne  "));
    assert_eq!(text.matches('*').count(), 3);
}

#[test]
fn test_known_formulas_are_canonical() {
    let tables = tables();
    let parser = FormulaParser::new(&tables.elements);
    for formula in ["H2O", "O3", "NaCl", "C6H12O6", "H2SO4", "C8H10N4O2"] {
        let compound = parser.parse(formula).expect("Failed to parse");
        assert_eq!(compound.canonical(), formula);
    }
}

#[test]
fn test_resolve_prefers_explicit_dir() {
    let paths = DataPaths::resolve(Some(PathBuf::from("/tmp/refdata")));
    assert_eq!(paths.elements, PathBuf::from("/tmp/refdata/elements.csv"));
    assert_eq!(paths.compounds, PathBuf::from("/tmp/refdata/molecules.csv"));
}
