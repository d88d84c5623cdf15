//! CSV import service implementing [`CsvImportCommand`].
//!
//! Parsing is row-isolated and happens before any database work; the field
//! and every batch of points are then written in a single transaction by the
//! repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::Error;
use crate::domain::csv_import::{ImportReport, parse_track_csv};
use crate::domain::ports::{CsvImportCommand, CsvUpload, FieldRepository, FieldRepositoryError};

/// Rows written per insert statement unless configured otherwise.
pub const DEFAULT_IMPORT_BATCH_SIZE: usize = 100;

/// Largest accepted batch; twelve bound columns per row must stay below the
/// PostgreSQL bind parameter limit.
pub const MAX_IMPORT_BATCH_SIZE: usize = 5000;

/// Import service backed by a [`FieldRepository`].
#[derive(Clone)]
pub struct CsvImportService<F> {
    fields: Arc<F>,
    batch_size: usize,
}

impl<F> CsvImportService<F> {
    /// Create a service writing `batch_size` rows per insert, clamped to
    /// `1..=MAX_IMPORT_BATCH_SIZE`.
    pub fn new(fields: Arc<F>, batch_size: usize) -> Self {
        Self {
            fields,
            batch_size: batch_size.clamp(1, MAX_IMPORT_BATCH_SIZE),
        }
    }

    /// Effective batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

fn map_field_error(error: FieldRepositoryError) -> Error {
    match error {
        FieldRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("database unavailable: {message}"))
        }
        FieldRepositoryError::Query { message } => {
            Error::internal(format!("database write failed: {message}"))
        }
        FieldRepositoryError::Conflict { field_name } => {
            Error::conflict(format!("field already exists: {field_name}"))
        }
    }
}

#[async_trait]
impl<F> CsvImportCommand for CsvImportService<F>
where
    F: FieldRepository,
{
    async fn import(&self, upload: CsvUpload) -> Result<ImportReport, Error> {
        let field_name = upload.field_name()?;
        let parsed = parse_track_csv(&upload.bytes);

        let field = self
            .fields
            .create_with_tracks(&field_name, &parsed.points, self.batch_size)
            .await
            .map_err(map_field_error)?;

        let report = ImportReport::new(parsed.points.len(), parsed.errors);
        info!(
            field_id = field.id,
            field_name = %field.name,
            imported = report.imported(),
            errors = report.errors().len(),
            "csv import completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "csv_import_service_tests.rs"]
mod tests;
