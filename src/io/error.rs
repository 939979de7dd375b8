use crate::chemistry::formula::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the reference datasets. All of them are fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "invalid record at line {line} of {}: expected at least {expected} columns, found {found}",
        .path.display()
    )]
    MissingFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field} '{value}' at line {line} of {}", .path.display())]
    InvalidField {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("cannot parse formula '{formula}' at line {line} of {}", .path.display())]
    Formula {
        path: PathBuf,
        line: u64,
        formula: String,
        #[source]
        source: ParseError,
    },
}

impl Error {
    pub fn invalid_field(
        path: impl Into<PathBuf>,
        line: u64,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            path: path.into(),
            line,
            field,
            value: value.into(),
        }
    }

    /// File line the error points at, when there is one.
    pub fn line(&self) -> Option<u64> {
        match self {
            Error::MissingFields { line, .. }
            | Error::InvalidField { line, .. }
            | Error::Formula { line, .. } => Some(*line),
            Error::Io { .. } | Error::Csv { .. } => None,
        }
    }
}
