//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, together with the services that implement the driving ports.
//! Types validate their invariants on construction.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - FieldName / Field / FieldSummary: a named plot of land.
//! - TrackPoint / TrackRecord: one timestamped sensor reading.
//! - Account and friends: users, roles, password digests and profiles.
//! - csv_import: decoding and row-isolated parsing of uploaded files.

pub mod account;
pub mod auth;
pub mod csv_import;
pub mod error;
pub mod field;
pub mod ports;
pub mod trace_id;
pub mod track_point;

mod account_service;
mod csv_import_service;
mod dashboard_service;
mod field_track_service;

pub use self::account::{
    Account, AccountProfile, AccountValidationError, Email, PasswordDigest, ProfileUpdate, Role,
    SessionIdentity, UserId, UserProfile, Username,
};
pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordChange, RegistrationParts,
    RegistrationRequest,
};
pub use self::csv_import_service::{CsvImportService, DEFAULT_IMPORT_BATCH_SIZE, MAX_IMPORT_BATCH_SIZE};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::field::{Field, FieldName, FieldNameValidationError, FieldSummary};
pub use self::field_track_service::FieldTrackService;
pub use self::trace_id::TraceId;
pub use self::track_point::{TrackPoint, TrackRecord, track_offset};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use fieldtrack::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
