//! Plain-text import report.

use std::fmt;

/// A row that could not be converted, numbered from 1 after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number.
    pub row: usize,
    /// Why the row was rejected.
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} error: {}", self.row, self.message)
    }
}

/// Outcome of a completed import.
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::{ImportReport, RowError};
///
/// let report = ImportReport::new(2, vec![RowError::new(3, "missing column 'x'")]);
/// assert_eq!(
///     report.to_string(),
///     "imported 2 records, 1 errors\nerror details:\nrow 3 error: missing column 'x'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    imported: usize,
    errors: Vec<RowError>,
}

impl ImportReport {
    #[must_use]
    pub fn new(imported: usize, errors: Vec<RowError>) -> Self {
        Self { imported, errors }
    }

    /// Number of persisted track points.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.imported
    }

    #[must_use]
    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "imported {} records, {} errors",
            self.imported,
            self.errors.len()
        )?;
        writeln!(f, "error details:")?;
        if self.errors.is_empty() {
            return write!(f, "none");
        }
        let details: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", details.join("\n"))
    }
}
