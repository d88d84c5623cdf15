//! Driving port for field and track reads.
//!
//! Inbound adapters use this port to list fields and their track points
//! without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, FieldSummary, TrackRecord};

use super::TrackFilter;

/// Domain use-case port for browsing stored fields and tracks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldsQuery: Send + Sync {
    /// Every field with its track count, ordered by name.
    async fn list_fields(&self) -> Result<Vec<FieldSummary>, Error>;

    /// Track points matching `filter`, ordered by GPS time.
    async fn list_tracks(&self, filter: &TrackFilter) -> Result<Vec<TrackRecord>, Error>;
}

/// Fixture query with nothing stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFieldsQuery;

#[async_trait]
impl FieldsQuery for FixtureFieldsQuery {
    async fn list_fields(&self) -> Result<Vec<FieldSummary>, Error> {
        Ok(Vec::new())
    }

    async fn list_tracks(&self, _filter: &TrackFilter) -> Result<Vec<TrackRecord>, Error> {
        Ok(Vec::new())
    }
}
