//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to domain types live beside
//! the repositories that use them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, fields, track_points, user_profiles};

// ---------------------------------------------------------------------------
// Field and track models
// ---------------------------------------------------------------------------

/// Insertable struct for creating a field.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fields)]
pub(crate) struct NewFieldRow<'a> {
    pub name: &'a str,
}

/// Row struct for reading from the track_points table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = track_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrackPointRow {
    pub point_index: i32,
    pub gps_time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub yaw: f64,
    pub state: bool,
    pub amplitude: f64,
    pub depth: i32,
    pub depth_value: i32,
}

/// Insertable struct for bulk track inserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = track_points)]
pub(crate) struct NewTrackPointRow {
    pub field_id: i64,
    pub point_index: i32,
    pub gps_time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub yaw: f64,
    pub state: bool,
    pub amplitude: f64,
    pub depth: i32,
    pub depth_value: i32,
}

// ---------------------------------------------------------------------------
// Account models
// ---------------------------------------------------------------------------

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Insertable struct for registering an account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_digest: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the user_profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub phone: Option<String>,
    pub organization: Option<String>,
}

/// Insertable struct for writing a profile row.
///
/// `None` values are written as SQL `NULL` so cleared details stay cleared.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewUserProfileRow<'a> {
    pub user_id: Uuid,
    pub phone: Option<&'a str>,
    pub organization: Option<&'a str>,
}
