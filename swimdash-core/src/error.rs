//! Structured error types for swimdash-core library.
//!
//! Loading is the only fallible stage: once the stores are built every query
//! is total. Binary crates (swimdash-cli) wrap these in `anyhow` for context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the record or aggregate store.
///
/// Any of these aborts the load; there is no partial store.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O operation failed
    #[error("I/O error reading {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// CSV framing or decoding failed
    #[error("CSV error in {table}: {source}")]
    Csv {
        table: &'static str,
        source: csv::Error,
    },

    /// Header lacks a column the loader depends on
    #[error("Missing required column '{column}' in {table}")]
    MissingColumn {
        column: &'static str,
        table: &'static str,
    },

    /// A `date` cell could not be read as a calendar date
    #[error("Invalid date '{value}' in {table} (row {row})")]
    InvalidDate {
        value: String,
        table: &'static str,
        row: usize,
    },

    /// A numeric cell held something other than a number or a null marker
    #[error("Invalid number '{value}' in column '{column}' of {table} (row {row})")]
    InvalidNumber {
        value: String,
        column: String,
        table: &'static str,
        row: usize,
    },

    /// Two workout records resolved to the same calendar date.
    ///
    /// Stricter than summing same-day sessions: workout lookups key on the
    /// date, so a second session on one day is rejected rather than merged.
    #[error("Duplicate workout date {date} in {table} (row {row})")]
    DuplicateDate {
        date: String,
        table: &'static str,
        row: usize,
    },
}

/// Result type alias for swimdash-core loading operations
pub type Result<T> = std::result::Result<T, DataLoadError>;

impl DataLoadError {
    /// Create an I/O error tied to the source path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV error for a table
    pub fn csv(table: &'static str, source: csv::Error) -> Self {
        Self::Csv { table, source }
    }

    /// Create a missing column error
    pub fn missing_column(column: &'static str, table: &'static str) -> Self {
        Self::MissingColumn { column, table }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>, table: &'static str, row: usize) -> Self {
        Self::InvalidDate {
            value: value.into(),
            table,
            row,
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(
        value: impl Into<String>,
        column: impl Into<String>,
        table: &'static str,
        row: usize,
    ) -> Self {
        Self::InvalidNumber {
            value: value.into(),
            column: column.into(),
            table,
            row,
        }
    }

    /// Create a duplicate date error
    pub fn duplicate_date(date: impl Into<String>, table: &'static str, row: usize) -> Self {
        Self::DuplicateDate {
            date: date.into(),
            table,
            row,
        }
    }
}

/// A year selection that is neither "all" nor an integer year.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid year selection '{value}': expected \"all\" or a year")]
pub struct ScopeParseError {
    pub value: String,
}
