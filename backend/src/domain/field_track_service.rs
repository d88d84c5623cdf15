//! Field and track browsing services.
//!
//! This module implements [`FieldsQuery`] and [`FieldsCommand`] on top of the
//! field and track point repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    FieldRepository, FieldRepositoryError, FieldsCommand, FieldsQuery, TrackFilter,
    TrackPointRepository, TrackPointRepositoryError,
};
use crate::domain::{Error, FieldName, FieldSummary, TrackRecord};

/// Field service implementing the field driving ports.
#[derive(Clone)]
pub struct FieldTrackService<F, T> {
    fields: Arc<F>,
    tracks: Arc<T>,
}

impl<F, T> FieldTrackService<F, T> {
    /// Create a new service with the given repositories.
    pub fn new(fields: Arc<F>, tracks: Arc<T>) -> Self {
        Self { fields, tracks }
    }
}

fn map_field_error(error: FieldRepositoryError) -> Error {
    match error {
        FieldRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("field repository unavailable: {message}"))
        }
        FieldRepositoryError::Query { message } => {
            Error::internal(format!("field repository error: {message}"))
        }
        FieldRepositoryError::Conflict { field_name } => {
            Error::conflict(format!("field already exists: {field_name}"))
        }
    }
}

fn map_track_error(error: TrackPointRepositoryError) -> Error {
    match error {
        TrackPointRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("track repository unavailable: {message}"))
        }
        TrackPointRepositoryError::Query { message } => {
            Error::internal(format!("track repository error: {message}"))
        }
    }
}

#[async_trait]
impl<F, T> FieldsQuery for FieldTrackService<F, T>
where
    F: FieldRepository,
    T: TrackPointRepository,
{
    async fn list_fields(&self) -> Result<Vec<FieldSummary>, Error> {
        self.fields.list_summaries().await.map_err(map_field_error)
    }

    async fn list_tracks(&self, filter: &TrackFilter) -> Result<Vec<TrackRecord>, Error> {
        self.tracks.list(filter).await.map_err(map_track_error)
    }
}

#[async_trait]
impl<F, T> FieldsCommand for FieldTrackService<F, T>
where
    F: FieldRepository,
    T: TrackPointRepository,
{
    async fn delete_field(&self, name: &FieldName) -> Result<(), Error> {
        let deleted = self
            .fields
            .delete_by_name(name)
            .await
            .map_err(map_field_error)?;
        if !deleted {
            return Err(Error::not_found(format!("field not found: {name}")));
        }
        info!(field_name = %name, "field deleted");
        Ok(())
    }
}
