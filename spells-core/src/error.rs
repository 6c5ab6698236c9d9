//! Catalog error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the caller of an ingestion operation
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The source could not be opened or read. Nothing from it was committed.
    #[error("Failed to read spell source: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single row was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    /// Rows carry eight fields, plus an optional trailing ninth
    #[error("wrong number of fields: expected 8 or 9, found {found}")]
    FieldCount { found: usize },

    #[error("level is not an integer: {value:?}")]
    MalformedLevel { value: String },

    #[error("level {level} is outside the range 0-9")]
    LevelOutOfRange { level: i64 },
}

/// A malformed row, located by the line it started on
///
/// Row errors never abort an ingestion; they are logged and collected in the
/// [`IngestReport`](crate::catalog::IngestReport) of the source they came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct RowError {
    pub line: usize,
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(line: usize, kind: RowErrorKind) -> Self {
        Self { line, kind }
    }
}
