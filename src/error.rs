use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, parsing or exporting a roll-up summary.
///
/// Every variant is fatal to the load attempt: a summary is either built
/// completely or not at all.
#[derive(Error, Debug)]
pub enum RollupError {
    /// The input path is missing, unreadable or not a supported file.
    #[error("Cannot access '{}': {reason}", .path.display())]
    FileAccess { path: PathBuf, reason: String },

    /// The decoded input contains no rows.
    #[error(
        "No rows to read{}",
        .path.as_ref().map(|p| format!(" in '{}'", p.display())).unwrap_or_default()
    )]
    EmptyInput { path: Option<PathBuf> },

    /// A level header cell, or the layout of a sheet, is not what the format expects.
    #[error("Invalid cell {cell} in sheet {sheet}: {reason}")]
    Format {
        cell: String,
        sheet: usize,
        reason: String,
    },

    /// A column names a parent component that does not exist one level up.
    #[error("Parent '{level_name}' of column '{column}' not found at level {level}")]
    ReferentialIntegrity {
        level_name: String,
        column: String,
        level: u8,
    },

    /// A top-level column and the total column disagree on the number of rows.
    #[error("Column '{column}' has {items} items but the total column has {totals} entries")]
    TotalMismatch {
        column: String,
        items: usize,
        totals: usize,
    },

    #[error("Column #{0} does not exist")]
    UnknownColumn(usize),

    #[error("Invalid merge: {0}")]
    InvalidMerge(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("{encoding} encoding error: {reason}")]
    Encoding {
        encoding: &'static str,
        reason: String,
    },

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RollupError>;

impl RollupError {
    pub(crate) fn format(cell: impl Into<String>, sheet: usize, reason: impl Into<String>) -> Self {
        RollupError::Format {
            cell: cell.into(),
            sheet,
            reason: reason.into(),
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RollupError::FileAccess {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
