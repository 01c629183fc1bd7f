use thiserror::Error;

use crate::geofeed::{PrefixError, Supernet};

/// Broad classification of a row failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The row is malformed: column count, prefix syntax or country code.
    Format,
    /// The prefix is well formed but lies outside the allowed supernet.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Invalid column count ({count}). Must be 2, 3, or 4.")]
    ColumnCount { count: usize },

    #[error("Invalid IP prefix '{prefix}'. Details: {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: PrefixError,
    },

    #[error("IP prefix '{prefix}' is NOT within the allowed range {supernet}.")]
    OutsideSupernet { prefix: String, supernet: Supernet },

    #[error("Invalid country code format '{code}'. Must be 2 uppercase letters (e.g., US, JP).")]
    InvalidCountryCode { code: String },
}

impl RowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RowError::OutsideSupernet { .. } => ErrorKind::Range,
            RowError::ColumnCount { .. }
            | RowError::InvalidPrefix { .. }
            | RowError::InvalidCountryCode { .. } => ErrorKind::Format,
        }
    }
}

/// A failure that stops validation of a whole file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
