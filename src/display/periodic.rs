use crate::core::structure::Element;
use crate::core::tables::ElementTable;
use crossterm::style::Stylize;
use std::collections::HashSet;
use std::io::{self, Write};

pub const PERIODS: usize = 7;
pub const GROUPS: usize = 18;
/// Slots in each f-block strip, La..Lu and Ac..Lr.
pub const SERIES_LEN: usize = 15;

const LANTHANIDE_START: u32 = 57;
const ACTINIDE_START: u32 = 89;
const CELL_WIDTH: usize = 4;
const SERIES_INDENT: &str = "        ";

/// Where an element is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Zero-based row and column in the main grid.
    Main { row: usize, col: usize },
    Lanthanide(usize),
    Actinide(usize),
}

/// f-block numbers go to their strip regardless of group; everything else
/// needs a period in 1..=7 and a group in 1..=18 or it is not drawn.
pub fn slot_for(element: &Element) -> Option<Slot> {
    let n = element.number;
    let series_end = SERIES_LEN as u32;

    if (LANTHANIDE_START..LANTHANIDE_START + series_end).contains(&n) {
        Some(Slot::Lanthanide((n - LANTHANIDE_START) as usize))
    } else if (ACTINIDE_START..ACTINIDE_START + series_end).contains(&n) {
        Some(Slot::Actinide((n - ACTINIDE_START) as usize))
    } else if (1..=PERIODS as u32).contains(&element.period)
        && (1..=GROUPS as u32).contains(&element.group)
    {
        Some(Slot::Main {
            row: element.period as usize - 1,
            col: element.group as usize - 1,
        })
    } else {
        None
    }
}

/// Simplified periodic table laid out from the element table.
#[derive(Debug, Clone)]
pub struct PeriodicTable<'t> {
    main: [[Option<&'t str>; GROUPS]; PERIODS],
    lanthanides: [Option<&'t str>; SERIES_LEN],
    actinides: [Option<&'t str>; SERIES_LEN],
}

impl<'t> PeriodicTable<'t> {
    pub fn from_elements(elements: &'t ElementTable) -> Self {
        let mut table = Self {
            main: [[None; GROUPS]; PERIODS],
            lanthanides: [None; SERIES_LEN],
            actinides: [None; SERIES_LEN],
        };

        for element in elements.iter() {
            let symbol = Some(element.symbol.as_str());
            match slot_for(element) {
                Some(Slot::Main { row, col }) => table.main[row][col] = symbol,
                Some(Slot::Lanthanide(i)) => table.lanthanides[i] = symbol,
                Some(Slot::Actinide(i)) => table.actinides[i] = symbol,
                None => {}
            }
        }
        table
    }

    /// Symbol at a 1-based period and group.
    pub fn at(&self, period: usize, group: usize) -> Option<&'t str> {
        self.main
            .get(period.checked_sub(1)?)?
            .get(group.checked_sub(1)?)
            .copied()
            .flatten()
    }

    pub fn lanthanides(&self) -> &[Option<&'t str>] {
        &self.lanthanides
    }

    pub fn actinides(&self) -> &[Option<&'t str>] {
        &self.actinides
    }

    /// Number of symbols placed anywhere.
    pub fn placed(&self) -> usize {
        self.main
            .iter()
            .flatten()
            .chain(self.lanthanides.iter())
            .chain(self.actinides.iter())
            .filter(|s| s.is_some())
            .count()
    }

    /// Writes the grid, then the two f-block strips. Symbols in `highlighted`
    /// are green, or marked with `*` when `color` is off.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        highlighted: &HashSet<&str>,
        color: bool,
    ) -> io::Result<()> {
        writeln!(out, "\nPeriodic Table:\n")?;
        for row in &self.main {
            for slot in row {
                write_cell(out, *slot, highlighted, color)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "\n")?;
        for strip in [&self.lanthanides, &self.actinides] {
            write!(out, "{}", SERIES_INDENT)?;
            for slot in strip {
                write_cell(out, *slot, highlighted, color)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn write_cell<W: Write>(
    out: &mut W,
    slot: Option<&str>,
    highlighted: &HashSet<&str>,
    color: bool,
) -> io::Result<()> {
    match slot {
        None => write!(out, "{:width$}", "", width = CELL_WIDTH),
        Some(symbol) if highlighted.contains(symbol) => {
            if color {
                write!(out, "{}", format!("{:<width$}", symbol, width = CELL_WIDTH).green())
            } else {
                write!(out, "{:<width$}", format!("{}*", symbol), width = CELL_WIDTH)
            }
        }
        Some(symbol) => write!(out, "{:<width$}", symbol, width = CELL_WIDTH),
    }
}
