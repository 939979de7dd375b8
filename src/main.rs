use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use formula_inspector::{
    analyze, load_reference_tables, AnalysisConfig, DataPaths, PeriodicTable, UnknownSymbolPolicy,
};

#[derive(Parser)]
#[command(author, version, about = "Chemical formula parser and inspector")]
struct Cli {
    /// Chemical formula to parse, e.g. H2O or C6H12O6.
    formula: String,

    /// Draw the periodic table with the formula's elements highlighted.
    #[arg(short = 'p', long = "pt")]
    periodic_table: bool,

    /// Show the electron configuration of every element in the formula.
    #[arg(short, long)]
    electrons: bool,

    /// Keep unknown element symbols as placeholders instead of failing.
    #[arg(long)]
    lenient: bool,

    /// Directory containing elements.csv and molecules.csv.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Disable colored output (NO_COLOR is honoured too).
    #[arg(long)]
    no_color: bool,

    /// More log output on stderr; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // 1. Reference data
    let paths = DataPaths::resolve(cli.data_dir);
    let tables = load_reference_tables(&paths).context("Failed to load reference data")?;

    // 2. Analysis
    let config = AnalysisConfig {
        policy: if cli.lenient {
            UnknownSymbolPolicy::Placeholder
        } else {
            UnknownSymbolPolicy::Reject
        },
        electrons: cli.electrons,
    };
    let analysis = analyze(&tables, &cli.formula, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &analysis.report)?;
        writeln!(out)?;
        return Ok(());
    }

    // 3. Output
    writeln!(out)?;
    if cli.periodic_table {
        let color =
            !cli.no_color && env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        PeriodicTable::from_elements(&tables.elements).render(
            &mut out,
            &analysis.symbols(),
            color,
        )?;
        writeln!(out)?;
    }
    write!(out, "{}", analysis.report)?;
    writeln!(out)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
