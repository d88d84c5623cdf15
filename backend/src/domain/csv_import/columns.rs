//! Column headers of the track export format.
//!
//! Headers are in the locale of the recording devices and must match
//! exactly (surrounding whitespace aside).

/// Sequence number column.
pub const POINT_INDEX: &str = "序列号";
/// GPS timestamp column.
pub const GPS_TIME: &str = "GPS时间";
/// Longitude column.
pub const LONGITUDE: &str = "经度";
/// Latitude column.
pub const LATITUDE: &str = "纬度";
/// Planar x column.
pub const X: &str = "x";
/// Planar y column.
pub const Y: &str = "y";
/// Velocity column (km/h).
pub const VELOCITY: &str = "速度(km/h)";
/// Heading column.
pub const YAW: &str = "航向";
/// Working-state column.
pub const STATE: &str = "工作状态";
/// Working-width column (m).
pub const AMPLITUDE: &str = "幅宽(m)";
/// Measured depth column (mm).
pub const DEPTH: &str = "深度(mm)";
/// Standard depth column.
pub const DEPTH_VALUE: &str = "深度标准值";

/// Every column a track row must provide, in export order.
pub const ALL: [&str; 12] = [
    POINT_INDEX,
    GPS_TIME,
    LONGITUDE,
    LATITUDE,
    X,
    Y,
    VELOCITY,
    YAW,
    STATE,
    AMPLITUDE,
    DEPTH,
    DEPTH_VALUE,
];
