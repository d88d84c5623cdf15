//! Field listing and removal.
//!
//! ```text
//! GET /api/v1/fields
//! DELETE /api/v1/fields/{fieldName}
//! ```

use actix_web::{HttpResponse, delete, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, FieldName, FieldSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A field and how many track points it owns.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    #[schema(example = "north-plot")]
    pub field_name: String,
    #[schema(example = 1250)]
    pub track_count: i64,
}

impl From<FieldSummary> for FieldResponse {
    fn from(summary: FieldSummary) -> Self {
        Self {
            field_name: summary.name.into(),
            track_count: summary.track_count,
        }
    }
}

pub(crate) fn parse_field_name(raw: String) -> Result<FieldName, Error> {
    FieldName::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(serde_json::json!({
            "field": "fieldName",
            "code": "invalid_field_name",
        }))
    })
}

/// List every field with its track count, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/fields",
    responses(
        (status = 200, description = "Fields", body = [FieldResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["fields"],
    operation_id = "listFields"
)]
#[get("/fields")]
pub async fn list_fields(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FieldResponse>>> {
    session.require_identity()?;
    let fields = state.fields_query.list_fields().await?;
    Ok(web::Json(fields.into_iter().map(Into::into).collect()))
}

/// Delete a field and every track point recorded for it.
#[utoipa::path(
    delete,
    path = "/api/v1/fields/{fieldName}",
    params(("fieldName" = String, Path, description = "Field name")),
    responses(
        (status = 204, description = "Field deleted"),
        (status = 400, description = "Invalid field name", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Field not found", body = ErrorSchema)
    ),
    tags = ["fields"],
    operation_id = "deleteField"
)]
#[delete("/fields/{field_name}")]
pub async fn delete_field(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let name = parse_field_name(path.into_inner())?;
    state.fields.delete_field(&name).await?;
    Ok(HttpResponse::NoContent().finish())
}
