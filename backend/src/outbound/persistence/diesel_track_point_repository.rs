//! PostgreSQL-backed `TrackPointRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TrackFilter, TrackPointRepository, TrackPointRepositoryError};
use crate::domain::{FieldName, TrackPoint, TrackRecord, track_offset};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TrackPointRow;
use super::pool::{DbPool, PoolError};
use super::schema::{fields, track_points};

/// Diesel-backed implementation of the track point repository port.
#[derive(Clone)]
pub struct DieselTrackPointRepository {
    pool: DbPool,
}

impl DieselTrackPointRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TrackPointRepositoryError {
    map_basic_pool_error(error, TrackPointRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TrackPointRepositoryError {
    map_basic_diesel_error(
        error,
        TrackPointRepositoryError::query,
        TrackPointRepositoryError::connection,
    )
}

/// Rebuild a record, presenting the stored instant in the track offset.
fn to_record(
    field_name: String,
    row: TrackPointRow,
) -> Result<TrackRecord, TrackPointRepositoryError> {
    let field_name = FieldName::new(field_name).map_err(|err| {
        TrackPointRepositoryError::query(format!("invalid stored field name: {err}"))
    })?;
    Ok(TrackRecord {
        field_name,
        point: TrackPoint {
            point_index: row.point_index,
            gps_time: row.gps_time.with_timezone(&track_offset()),
            longitude: row.longitude,
            latitude: row.latitude,
            x: row.x,
            y: row.y,
            velocity: row.velocity,
            yaw: row.yaw,
            state: row.state,
            amplitude: row.amplitude,
            depth: row.depth,
            depth_value: row.depth_value,
        },
    })
}

#[async_trait]
impl TrackPointRepository for DieselTrackPointRepository {
    async fn list(
        &self,
        filter: &TrackFilter,
    ) -> Result<Vec<TrackRecord>, TrackPointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = track_points::table
            .inner_join(fields::table)
            .select((fields::name, TrackPointRow::as_select()))
            .order((track_points::gps_time.asc(), track_points::id.asc()))
            .into_boxed();
        if let Some(name) = &filter.field_name {
            query = query.filter(fields::name.eq(name.as_ref().to_owned()));
        }

        let rows: Vec<(String, TrackPointRow)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(field_name, row)| to_record(field_name, row))
            .collect()
    }

    async fn count(&self) -> Result<i64, TrackPointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        track_points::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn row() -> TrackPointRow {
        TrackPointRow {
            point_index: 1,
            gps_time: Utc
                .with_ymd_and_hms(2024, 1, 5, 2, 0, 0)
                .single()
                .expect("valid timestamp"),
            longitude: 116.3,
            latitude: 39.9,
            x: 1.0,
            y: 2.0,
            velocity: 5.2,
            yaw: 90.0,
            state: false,
            amplitude: 2.5,
            depth: 180,
            depth_value: 200,
        }
    }

    #[rstest]
    fn records_are_presented_in_the_track_offset() {
        let record = to_record("north".into(), row()).expect("record");
        assert_eq!(record.field_name.as_ref(), "north");
        assert_eq!(
            record.point.gps_time.to_rfc3339(),
            "2024-01-05T10:00:00+08:00"
        );
        assert!(!record.point.state);
    }

    #[rstest]
    fn invalid_stored_names_are_query_errors() {
        let error = to_record(String::new(), row()).expect_err("empty name");
        assert!(matches!(error, TrackPointRepositoryError::Query { .. }));
    }
}
