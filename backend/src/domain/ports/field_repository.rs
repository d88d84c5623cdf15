//! Port for field persistence and bulk track insertion.

use async_trait::async_trait;

use crate::domain::{Field, FieldName, FieldSummary, TrackPoint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by field repository adapters.
    pub enum FieldRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "field repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "field repository query failed: {message}",
        /// A field with the same name already exists.
        Conflict { field_name: String } =>
            "field already exists: {field_name}",
    }
}

/// Port for creating, listing and deleting fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldRepository: Send + Sync {
    /// Create `name` and attach `points`, writing them in chunks of
    /// `batch_size`.
    ///
    /// The field and every chunk commit together or not at all. A name
    /// that is already taken yields [`FieldRepositoryError::Conflict`] and
    /// nothing is written.
    async fn create_with_tracks(
        &self,
        name: &FieldName,
        points: &[TrackPoint],
        batch_size: usize,
    ) -> Result<Field, FieldRepositoryError>;

    /// Every field with its track point count, ordered by name.
    async fn list_summaries(&self) -> Result<Vec<FieldSummary>, FieldRepositoryError>;

    /// Delete a field and, by cascade, its track points. Returns `false`
    /// when no field had that name.
    async fn delete_by_name(&self, name: &FieldName) -> Result<bool, FieldRepositoryError>;

    /// Number of stored fields.
    async fn count(&self) -> Result<i64, FieldRepositoryError>;
}

/// Fixture implementation for code paths that run without a database.
///
/// Creation always succeeds and nothing is retained.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFieldRepository;

#[async_trait]
impl FieldRepository for FixtureFieldRepository {
    async fn create_with_tracks(
        &self,
        name: &FieldName,
        _points: &[TrackPoint],
        _batch_size: usize,
    ) -> Result<Field, FieldRepositoryError> {
        Ok(Field {
            id: 1,
            name: name.clone(),
        })
    }

    async fn list_summaries(&self) -> Result<Vec<FieldSummary>, FieldRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_by_name(&self, _name: &FieldName) -> Result<bool, FieldRepositoryError> {
        Ok(false)
    }

    async fn count(&self) -> Result<i64, FieldRepositoryError> {
        Ok(0)
    }
}
