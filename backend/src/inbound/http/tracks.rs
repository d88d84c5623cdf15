//! Track point listing.
//!
//! ```text
//! GET /api/v1/tracks?fieldName=north-plot
//! ```

use actix_web::{get, web};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::TrackRecord;
use crate::domain::ports::TrackFilter;
use crate::inbound::http::ApiResult;
use crate::inbound::http::fields::parse_field_name;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/tracks`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TrackQuery {
    /// Only list points of this field. Blank lists every field.
    pub field_name: Option<String>,
}

/// One track point as rendered for map and chart clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    /// Sequence number, rendered as a string.
    #[schema(example = "17")]
    pub point_index: String,
    /// GPS time in UTC+8.
    #[schema(example = "2024-01-05T10:30:00+08:00")]
    pub gps_time: String,
    pub longitude: f64,
    pub latitude: f64,
    pub velocity: f64,
    pub yaw: f64,
    pub state: bool,
    #[schema(example = "north-plot")]
    pub field_name: String,
}

fn format_gps_time(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

impl From<TrackRecord> for TrackResponse {
    fn from(record: TrackRecord) -> Self {
        let point = record.point;
        Self {
            point_index: point.point_index.to_string(),
            gps_time: format_gps_time(&point.gps_time),
            longitude: point.longitude,
            latitude: point.latitude,
            velocity: point.velocity,
            yaw: point.yaw,
            state: point.state,
            field_name: record.field_name.into(),
        }
    }
}

impl TryFrom<TrackQuery> for TrackFilter {
    type Error = crate::domain::Error;

    fn try_from(query: TrackQuery) -> Result<Self, Self::Error> {
        let field_name = query
            .field_name
            .filter(|name| !name.trim().is_empty())
            .map(parse_field_name)
            .transpose()?;
        Ok(Self { field_name })
    }
}

/// List track points ordered by GPS time.
#[utoipa::path(
    get,
    path = "/api/v1/tracks",
    params(TrackQuery),
    responses(
        (status = 200, description = "Track points", body = [TrackResponse]),
        (status = 400, description = "Invalid field name", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["tracks"],
    operation_id = "listTracks"
)]
#[get("/tracks")]
pub async fn list_tracks(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<TrackQuery>,
) -> ApiResult<web::Json<Vec<TrackResponse>>> {
    session.require_identity()?;
    let filter = TrackFilter::try_from(query.into_inner())?;
    let records = state.fields_query.list_tracks(&filter).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}
