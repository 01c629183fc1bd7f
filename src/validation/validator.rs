use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use super::error::RowError;
use super::report::{Diagnostic, FileReport, ValidationSummary};
use crate::geofeed::{Supernet, is_valid_country_code, parse_prefix};

const MIN_COLUMNS: usize = 2;
const MAX_COLUMNS: usize = 4;

/// Checks geofeed rows against an allowed supernet.
#[derive(Debug, Clone, Default)]
pub struct GeofeedValidator {
    supernet: Supernet,
}

impl GeofeedValidator {
    pub fn new(supernet: Supernet) -> Self {
        Self { supernet }
    }

    /// Validate one CSV record, returning every failed check in order.
    ///
    /// A bad column count or an unparsable prefix stops the row early: no
    /// membership or country code check is reported after either. A prefix
    /// outside the supernet does not stop the country code check.
    pub fn validate_record(&self, record: &StringRecord) -> Vec<RowError> {
        let count = record.len();
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&count) {
            return vec![RowError::ColumnCount { count }];
        }

        let prefix = record[0].trim();
        let country = record[1].trim();
        let mut errors = Vec::new();

        let network = match parse_prefix(prefix) {
            Ok(network) => network,
            Err(source) => {
                return vec![RowError::InvalidPrefix {
                    prefix: prefix.to_string(),
                    source,
                }];
            }
        };

        if !self.supernet.contains(&network) {
            errors.push(RowError::OutsideSupernet {
                prefix: prefix.to_string(),
                supernet: self.supernet,
            });
        }

        if !is_valid_country_code(country) {
            errors.push(RowError::InvalidCountryCode {
                code: country.to_string(),
            });
        }

        errors
    }

    /// Validate CSV data read from `reader`, reporting under `path`.
    ///
    /// A read or CSV framing error ends the file with a fatal diagnostic.
    /// Diagnostics for rows before it are kept.
    pub fn validate_reader<R: Read>(&self, path: &Path, mut reader: R) -> FileReport {
        let mut report = FileReport::new(path);

        let mut data = Vec::new();
        if let Err(err) = reader.read_to_end(&mut data) {
            report.push_fatal(err);
            return report;
        }

        // Blank lines never become records, so no empty-row check is needed.
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());
        let mut lines = LineCounter::new(&data);

        let mut record = StringRecord::new();
        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    report.push_fatal(err);
                    break;
                }
            }
            report.rows += 1;

            let line = match record.position() {
                Some(pos) => lines.line_of_record(pos.byte()),
                None => report.rows,
            };
            for error in self.validate_record(&record) {
                report.push_row_error(line, error);
            }
        }

        debug!(
            "Validated {} rows in {}: {} diagnostics",
            report.rows,
            path.display(),
            report.diagnostics.len()
        );
        report
    }

    /// Open and validate one geofeed file.
    ///
    /// A missing file is reported as informational only.
    pub fn validate_file(&self, path: &Path) -> FileReport {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Skipping missing file {}", path.display());
                let mut report = FileReport::new(path);
                report.diagnostics.push(Diagnostic::Info(format!(
                    "File {} not found (likely deleted in this change). Skipping.",
                    path.display()
                )));
                return report;
            }
            Err(err) => {
                let mut report = FileReport::new(path);
                report.push_fatal(err);
                return report;
            }
        };

        debug!("Validating {}", path.display());
        self.validate_reader(path, file)
    }

    /// Validate each path in order, handing every report to `on_file` as
    /// soon as that file is done.
    pub fn validate_files<P, F>(&self, paths: &[P], mut on_file: F) -> ValidationSummary
    where
        P: AsRef<Path>,
        F: FnMut(&FileReport),
    {
        let mut summary = ValidationSummary::default();
        for path in paths {
            let report = self.validate_file(path.as_ref());
            on_file(&report);
            summary.push(report);
        }
        summary
    }
}

/// Maps record byte offsets to 1-indexed physical lines.
///
/// `\n`, `\r\n` and a lone `\r` each end one line. Offsets must be fed in
/// increasing order.
struct LineCounter<'a> {
    data: &'a [u8],
    scanned: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            scanned: 0,
            line: 1,
        }
    }

    /// Line of the record whose reported start is `offset`.
    ///
    /// The reported start may sit on blank lines the reader skipped, so
    /// leading terminators are stepped over first.
    fn line_of_record(&mut self, offset: u64) -> u64 {
        let mut start = usize::try_from(offset)
            .unwrap_or(self.data.len())
            .min(self.data.len());
        while start < self.data.len() && matches!(self.data[start], b'\r' | b'\n') {
            start += 1;
        }

        let from = self.scanned.min(start);
        for i in from..start {
            match self.data[i] {
                b'\n' => self.line += 1,
                b'\r' if self.data.get(i + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
        }
        self.scanned = self.scanned.max(start);
        self.line
    }
}
