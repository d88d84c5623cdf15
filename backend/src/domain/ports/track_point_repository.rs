//! Port for reading stored track points.

use async_trait::async_trait;

use crate::domain::{FieldName, TrackRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by track point repository adapters.
    pub enum TrackPointRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "track point repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "track point repository query failed: {message}",
    }
}

/// Narrows a track listing. An empty filter lists every point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter {
    pub field_name: Option<FieldName>,
}

/// Port for track point reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackPointRepository: Send + Sync {
    /// Points matching `filter`, ordered by GPS time then insertion order.
    async fn list(&self, filter: &TrackFilter)
    -> Result<Vec<TrackRecord>, TrackPointRepositoryError>;

    /// Number of stored track points.
    async fn count(&self) -> Result<i64, TrackPointRepositoryError>;
}

/// Fixture implementation for code paths that run without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTrackPointRepository;

#[async_trait]
impl TrackPointRepository for FixtureTrackPointRepository {
    async fn list(
        &self,
        _filter: &TrackFilter,
    ) -> Result<Vec<TrackRecord>, TrackPointRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<i64, TrackPointRepositoryError> {
        Ok(0)
    }
}
