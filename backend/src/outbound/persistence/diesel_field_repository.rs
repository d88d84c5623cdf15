//! PostgreSQL-backed `FieldRepository` implementation using Diesel ORM.
//!
//! Field creation and the bulk track insert share one transaction: the field
//! row is inserted first, then the points are written in chunks. Any failure
//! rolls the whole upload back.

use async_trait::async_trait;
use diesel::dsl::count;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{FieldRepository, FieldRepositoryError};
use crate::domain::{Field, FieldName, FieldSummary, TrackPoint};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewFieldRow, NewTrackPointRow};
use super::pool::{DbPool, PoolError};
use super::schema::{fields, track_points};

/// Diesel-backed implementation of the field repository port.
#[derive(Clone)]
pub struct DieselFieldRepository {
    pool: DbPool,
}

impl DieselFieldRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FieldRepositoryError {
    map_basic_pool_error(error, FieldRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FieldRepositoryError {
    map_basic_diesel_error(
        error,
        FieldRepositoryError::query,
        FieldRepositoryError::connection,
    )
}

fn map_create_error(error: diesel::result::Error, name: &FieldName) -> FieldRepositoryError {
    if unique_violation(&error).is_some() {
        return FieldRepositoryError::conflict(name.as_ref());
    }
    map_diesel_error(error)
}

fn to_row(field_id: i64, point: &TrackPoint) -> NewTrackPointRow {
    NewTrackPointRow {
        field_id,
        point_index: point.point_index,
        gps_time: point.gps_time.to_utc(),
        longitude: point.longitude,
        latitude: point.latitude,
        x: point.x,
        y: point.y,
        velocity: point.velocity,
        yaw: point.yaw,
        state: point.state,
        amplitude: point.amplitude,
        depth: point.depth,
        depth_value: point.depth_value,
    }
}

fn to_summary(name: String, track_count: i64) -> Result<FieldSummary, FieldRepositoryError> {
    let name = FieldName::new(name)
        .map_err(|err| FieldRepositoryError::query(format!("invalid stored field name: {err}")))?;
    Ok(FieldSummary { name, track_count })
}

#[async_trait]
impl FieldRepository for DieselFieldRepository {
    async fn create_with_tracks(
        &self,
        name: &FieldName,
        points: &[TrackPoint],
        batch_size: usize,
    ) -> Result<Field, FieldRepositoryError> {
        let chunk_size = batch_size.max(1);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let field_id = conn
            .transaction(|conn| {
                async move {
                    let field_id: i64 = diesel::insert_into(fields::table)
                        .values(&NewFieldRow {
                            name: name.as_ref(),
                        })
                        .returning(fields::id)
                        .get_result(conn)
                        .await?;

                    for (batch, chunk) in points.chunks(chunk_size).enumerate() {
                        let rows: Vec<NewTrackPointRow> =
                            chunk.iter().map(|point| to_row(field_id, point)).collect();
                        diesel::insert_into(track_points::table)
                            .values(&rows)
                            .execute(conn)
                            .await?;
                        debug!(field_id, batch, rows = rows.len(), "inserted track batch");
                    }

                    Ok::<_, diesel::result::Error>(field_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_create_error(err, name))?;

        Ok(Field {
            id: field_id,
            name: name.clone(),
        })
    }

    async fn list_summaries(&self) -> Result<Vec<FieldSummary>, FieldRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, i64)> = fields::table
            .left_join(track_points::table)
            .group_by((fields::id, fields::name))
            .select((fields::name, count(track_points::id.nullable())))
            .order(fields::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(name, track_count)| to_summary(name, track_count))
            .collect()
    }

    async fn delete_by_name(&self, name: &FieldName) -> Result<bool, FieldRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(fields::table.filter(fields::name.eq(name.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<i64, FieldRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        fields::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    use crate::domain::track_offset;

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(error, FieldRepositoryError::connection("connection refused"));
    }

    #[rstest]
    fn rows_store_the_instant_in_utc() {
        let gps_time = track_offset()
            .with_ymd_and_hms(2024, 1, 5, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        let point = TrackPoint {
            point_index: 3,
            gps_time,
            longitude: 116.3,
            latitude: 39.9,
            x: 1.0,
            y: 2.0,
            velocity: 5.2,
            yaw: 90.0,
            state: true,
            amplitude: 2.5,
            depth: 180,
            depth_value: 200,
        };

        let row = to_row(9, &point);
        assert_eq!(row.field_id, 9);
        assert_eq!(row.gps_time.to_rfc3339(), "2024-01-05T02:00:00+00:00");
        assert_eq!(row.depth_value, 200);
    }

    #[rstest]
    fn stored_names_are_revalidated() {
        assert!(to_summary(String::new(), 0).is_err());
        let summary = to_summary("north".into(), 12).expect("summary");
        assert_eq!(summary.track_count, 12);
    }
}
