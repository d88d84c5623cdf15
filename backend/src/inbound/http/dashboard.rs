//! Administrator dashboard totals.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DashboardTotals;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Non-admin accounts.
    pub total_users: i64,
    pub total_fields: i64,
    pub total_tracks: i64,
}

impl From<DashboardTotals> for DashboardResponse {
    fn from(value: DashboardTotals) -> Self {
        Self {
            total_users: value.total_users,
            total_fields: value.total_fields,
            total_tracks: value.total_tracks,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Totals", body = DashboardResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    session.require_admin()?;
    Ok(web::Json(state.dashboard.totals().await?.into()))
}
