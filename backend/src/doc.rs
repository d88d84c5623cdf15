//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the DTO
//! schemas they exchange and the session cookie security scheme. Swagger UI
//! serves it in debug builds and the `openapi-dump` binary prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::dashboard::DashboardResponse;
use crate::inbound::http::fields::FieldResponse;
use crate::inbound::http::profile::{PasswordChangeRequest, ProfileResponse, ProfileUpdateRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tracks::TrackResponse;
use crate::inbound::http::users::{LoginRequest, MemberResponse, RegisterRequest, SessionResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "fieldtrack API",
        description = "Upload, browse and administer farm-field track recordings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::change_password,
        crate::inbound::http::uploads::upload_csv,
        crate::inbound::http::fields::list_fields,
        crate::inbound::http::fields::delete_field,
        crate::inbound::http::tracks::list_tracks,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RegisterRequest,
        SessionResponse,
        MemberResponse,
        ProfileResponse,
        ProfileUpdateRequest,
        PasswordChangeRequest,
        FieldResponse,
        TrackResponse,
        DashboardResponse,
    )),
    tags(
        (name = "users", description = "Login, registration and member administration"),
        (name = "profile", description = "Self-service profile"),
        (name = "uploads", description = "CSV track imports"),
        (name = "fields", description = "Fields and their track counts"),
        (name = "tracks", description = "Track point listings"),
        (name = "dashboard", description = "Administrator totals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
