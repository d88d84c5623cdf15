//! Track points: timestamped sensor readings owned by a field.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::FieldName;

/// Offset, in seconds east of UTC, of the civil zone readings are recorded
/// in (China Standard Time, no daylight saving).
pub const TRACK_UTC_OFFSET_SECONDS: i32 = 8 * 3600;

/// Fixed UTC+8 offset applied to parsed GPS timestamps.
///
/// # Examples
/// ```
/// use fieldtrack::domain::track_offset;
///
/// assert_eq!(track_offset().local_minus_utc(), 8 * 3600);
/// ```
#[must_use]
pub fn track_offset() -> FixedOffset {
    FixedOffset::east_opt(TRACK_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// One parsed row of sensor data, not yet attached to a stored field.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Sequence number within the recording.
    pub point_index: i32,
    /// GPS timestamp in UTC+8.
    pub gps_time: DateTime<FixedOffset>,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Planar x coordinate.
    pub x: f64,
    /// Planar y coordinate.
    pub y: f64,
    /// Velocity in km/h.
    pub velocity: f64,
    /// Heading.
    pub yaw: f64,
    /// Whether the implement was working.
    pub state: bool,
    /// Working width in metres.
    pub amplitude: f64,
    /// Measured depth in millimetres.
    pub depth: i32,
    /// Standard (target) depth in millimetres.
    pub depth_value: i32,
}

/// Track point as listed back to clients, tagged with its field.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    /// Owning field.
    pub field_name: FieldName,
    /// Stored reading.
    pub point: TrackPoint,
}
