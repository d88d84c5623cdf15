//! Driving port for importing uploaded track CSV files.

use async_trait::async_trait;

use crate::domain::csv_import::{ImportReport, parse_track_csv};
use crate::domain::{Error, FieldName};

/// An uploaded file as received by an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    /// Client-supplied file name; without its `.csv` suffix it names the
    /// new field.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    /// Field name derived from the file name.
    pub fn field_name(&self) -> Result<FieldName, Error> {
        FieldName::from_file_name(&self.file_name)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Domain use-case port for CSV imports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CsvImportCommand: Send + Sync {
    /// Create a field from `upload` and persist its valid rows.
    ///
    /// Row-level problems are listed in the report; file-level problems and
    /// write failures are errors.
    async fn import(&self, upload: CsvUpload) -> Result<ImportReport, Error>;
}

/// Fixture import that parses and reports without persisting anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCsvImportCommand;

#[async_trait]
impl CsvImportCommand for FixtureCsvImportCommand {
    async fn import(&self, upload: CsvUpload) -> Result<ImportReport, Error> {
        upload.field_name()?;
        let parsed = parse_track_csv(&upload.bytes);
        Ok(ImportReport::new(parsed.points.len(), parsed.errors))
    }
}
