use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{FileError, RowError};

/// A single line of validation output.
#[derive(Debug)]
pub enum Diagnostic {
    Info(String),
    Error {
        path: PathBuf,
        line: u64,
        error: RowError,
    },
    Fatal {
        path: PathBuf,
        error: FileError,
    },
}

impl Diagnostic {
    /// Whether this diagnostic fails the run.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Diagnostic::Info(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Info(message) => write!(f, "  INFO: {message}"),
            Diagnostic::Error { path, line, error } => {
                write!(f, "  ERROR: {}:{line}: {error}", path.display())
            }
            Diagnostic::Fatal { path, error } => write!(
                f,
                "  FATAL: Could not process file {}. Error: {error}",
                path.display()
            ),
        }
    }
}

/// Everything found while validating one file, in detection order.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub rows: u64,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            rows: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_failure)
    }

    pub fn errors(&self) -> impl Iterator<Item = &RowError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Error { error, .. } => Some(error),
            _ => None,
        })
    }

    pub(crate) fn push_row_error(&mut self, line: u64, error: RowError) {
        self.diagnostics.push(Diagnostic::Error {
            path: self.path.clone(),
            line,
            error,
        });
    }

    pub(crate) fn push_fatal(&mut self, error: impl Into<FileError>) {
        self.diagnostics.push(Diagnostic::Fatal {
            path: self.path.clone(),
            error: error.into(),
        });
    }
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct ValidationSummary {
    pub files: Vec<FileReport>,
}

impl ValidationSummary {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn failed(&self) -> bool {
        self.files.iter().any(FileReport::failed)
    }

    pub fn failure_count(&self) -> usize {
        self.files
            .iter()
            .flat_map(|file| &file.diagnostics)
            .filter(|d| d.is_failure())
            .count()
    }
}
