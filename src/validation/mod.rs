//! Row and file validation for geofeed CSV files.

mod error;
mod report;
mod validator;


pub use error::{ErrorKind, FileError, RowError};
pub use report::{Diagnostic, FileReport, ValidationSummary};
pub use validator::GeofeedValidator;
