//! Self-service profile endpoints for the logged-in account.
//!
//! ```text
//! GET /api/v1/profile
//! PUT /api/v1/profile {"phone":"13800000000"}
//! POST /api/v1/profile/password {"currentPassword":"...","newPassword":"..."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountProfile, PasswordChange, ProfileUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_account_validation_error, map_login_validation_error};

/// Account details and contact profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

impl From<AccountProfile> for ProfileResponse {
    fn from(value: AccountProfile) -> Self {
        Self {
            username: value.username.to_string(),
            email: value.email.to_string(),
            phone: value.profile.phone,
            organization: value.profile.organization,
        }
    }
}

/// Partial profile update. Omitted values are left unchanged; blank phone
/// or organisation values clear them.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Show the caller's profile, creating an empty one on first access.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let profile = state.accounts_query.profile(&identity.user_id).await?;
    Ok(web::Json(profile.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let update = ProfileUpdate::try_from_parts(
        body.email.as_deref(),
        body.phone.as_deref(),
        body.organization.as_deref(),
    )
    .map_err(map_account_validation_error)?;
    state
        .accounts
        .update_profile(&identity.user_id, update)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong current password or invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "changePassword"
)]
#[post("/profile/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let change = PasswordChange::try_from_parts(&body.current_password, &body.new_password)
        .map_err(map_login_validation_error)?;
    state
        .accounts
        .change_password(&identity.user_id, change)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
