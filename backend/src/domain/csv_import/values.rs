//! Cell-level coercions for track rows.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::domain::track_offset;

/// Date-time layouts tried, in order, once separators are normalised.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Offset-bearing layout accepted alongside RFC 3339.
const OFFSET_LAYOUT: &str = "%Y-%m-%dT%H:%M%:z";

/// Reasons a single cell could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The row has no cell for a required column.
    #[error("missing column '{column}'")]
    MissingColumn { column: &'static str },
    /// Integer coercion failed.
    #[error("field [{column}] value '{raw}' cannot be converted to an integer")]
    Integer { column: &'static str, raw: String },
    /// Float coercion failed.
    #[error("field [{column}] value '{raw}' cannot be converted to a number")]
    Float { column: &'static str, raw: String },
    /// The token is not in either boolean set.
    #[error("invalid boolean value: {normalized}")]
    Boolean { normalized: String },
    /// No supported timestamp layout matched.
    #[error("field [{column}] value '{raw}' is not a valid timestamp")]
    Timestamp { column: &'static str, raw: String },
    /// The CSV reader rejected the record itself.
    #[error("malformed record: {message}")]
    Record { message: String },
}

/// Parse an integer cell, tolerating float formatting such as `12.0`.
///
/// The value is truncated toward zero. Non-finite values and values outside
/// the `i32` range are rejected.
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::parse_int;
///
/// assert_eq!(parse_int("序列号", "12.0"), Ok(12));
/// assert_eq!(parse_int("序列号", "-3.9"), Ok(-3));
/// assert!(parse_int("序列号", "twelve").is_err());
/// ```
pub fn parse_int(column: &'static str, raw: &str) -> Result<i32, ValueError> {
    let invalid = || ValueError::Integer {
        column,
        raw: raw.to_owned(),
    };
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return Ok(value);
    }
    let value = trimmed.parse::<f64>().map_err(|_| invalid())?.trunc();
    if !value.is_finite() {
        return Err(invalid());
    }
    format!("{value:.0}").parse::<i32>().map_err(|_| invalid())
}

/// Parse a boolean cell from the accepted token sets, case-insensitively.
///
/// `1`, `TRUE`, `T`, `YES` and `Y` are true; `0`, `FALSE`, `F`, `NO` and `N`
/// are false.
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::parse_bool;
///
/// assert_eq!(parse_bool(" yes "), Ok(true));
/// assert_eq!(parse_bool("f"), Ok(false));
/// assert!(parse_bool("maybe").is_err());
/// ```
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    let normalized = raw.trim().to_uppercase();
    match normalized.as_str() {
        "1" | "TRUE" | "T" | "YES" | "Y" => Ok(true),
        "0" | "FALSE" | "F" | "NO" | "N" => Ok(false),
        _ => Err(ValueError::Boolean { normalized }),
    }
}

/// Parse a floating-point cell.
pub fn parse_float(column: &'static str, raw: &str) -> Result<f64, ValueError> {
    raw.trim().parse::<f64>().map_err(|_| ValueError::Float {
        column,
        raw: raw.to_owned(),
    })
}

/// Parse a GPS timestamp and pin it to UTC+8.
///
/// Every `/` becomes `-` and the first space becomes `T`, so
/// `2024/01/05 10:30` and `2024-01-05T10:30` are equivalent. ISO 8601
/// layouts are tried first (with or without seconds, fractions or an
/// offset, or a bare date meaning midnight), then `%Y-%m-%dT%H:%M`. The
/// wall-clock reading is kept and the fixed UTC+8 offset attached; an offset
/// in the input is replaced rather than converted.
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::parse_gps_time;
///
/// let dashed = parse_gps_time("GPS时间", "2024-01-05 10:30").expect("dashed");
/// let slashed = parse_gps_time("GPS时间", "2024/01/05T10:30").expect("slashed");
/// assert_eq!(dashed, slashed);
/// assert_eq!(dashed.to_rfc3339(), "2024-01-05T10:30:00+08:00");
/// ```
pub fn parse_gps_time(column: &'static str, raw: &str) -> Result<DateTime<FixedOffset>, ValueError> {
    let normalized = raw.trim().replace('/', "-").replacen(' ', "T", 1);
    let naive = parse_naive(&normalized).ok_or_else(|| ValueError::Timestamp {
        column,
        raw: raw.to_owned(),
    })?;
    naive
        .and_local_timezone(track_offset())
        .single()
        .ok_or_else(|| ValueError::Timestamp {
            column,
            raw: raw.to_owned(),
        })
}

fn parse_naive(normalized: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(normalized) {
        return Some(with_offset.naive_local());
    }
    if let Ok(with_offset) = DateTime::parse_from_str(normalized, OFFSET_LAYOUT) {
        return Some(with_offset.naive_local());
    }
    if let Some(naive) = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(normalized, layout).ok())
    {
        return Some(naive);
    }
    NaiveDate::parse_from_str(normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const COLUMN: &str = "测试";

    #[rstest]
    #[case("12", 12)]
    #[case("12.0", 12)]
    #[case(" 7.99 ", 7)]
    #[case("-3.5", -3)]
    #[case("1e3", 1000)]
    #[case("2147483647", i32::MAX)]
    #[case("2147483647.9", i32::MAX)]
    #[case("-2147483648.9", i32::MIN)]
    #[case("-0.5", 0)]
    fn integers_accept_float_formatting(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_int(COLUMN, raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    #[case("2147483648")]
    #[case("2147483648.0")]
    #[case("-2147483649")]
    #[case("1e300")]
    #[case("1,5")]
    fn integers_reject_malformed_values(#[case] raw: &str) {
        assert_eq!(
            parse_int(COLUMN, raw),
            Err(ValueError::Integer {
                column: COLUMN,
                raw: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn integer_error_names_column_and_value() {
        let error = parse_int("深度(mm)", "deep").expect_err("malformed");
        assert_eq!(
            error.to_string(),
            "field [深度(mm)] value 'deep' cannot be converted to an integer"
        );
    }

    #[rstest]
    #[case("1", true)]
    #[case("TRUE", true)]
    #[case("true", true)]
    #[case("T", true)]
    #[case("Yes", true)]
    #[case(" y ", true)]
    #[case("0", false)]
    #[case("FALSE", false)]
    #[case("f", false)]
    #[case("No", false)]
    #[case("n\t", false)]
    fn booleans_accept_known_tokens(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(raw), Ok(expected));
    }

    #[rstest]
    #[case("", "")]
    #[case("2", "2")]
    #[case("on", "ON")]
    #[case("yess", "YESS")]
    #[case(" maybe ", "MAYBE")]
    fn booleans_reject_other_tokens(#[case] raw: &str, #[case] normalized: &str) {
        assert_eq!(
            parse_bool(raw),
            Err(ValueError::Boolean {
                normalized: normalized.to_owned()
            })
        );
    }

    #[rstest]
    #[case("116.397", 116.397)]
    #[case(" -0.5 ", -0.5)]
    #[case("3", 3.0)]
    fn floats_parse_plain_numbers(#[case] raw: &str, #[case] expected: f64) {
        let parsed = parse_float(COLUMN, raw).expect("valid float");
        assert!((parsed - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case("")]
    #[case("east")]
    #[case("1.2.3")]
    fn floats_reject_malformed_values(#[case] raw: &str) {
        assert!(matches!(
            parse_float(COLUMN, raw),
            Err(ValueError::Float { .. })
        ));
    }

    #[rstest]
    #[case("2024-01-05 10:30", "2024-01-05T10:30:00+08:00")]
    #[case("2024/01/05T10:30", "2024-01-05T10:30:00+08:00")]
    #[case("2024/01/05 10:30", "2024-01-05T10:30:00+08:00")]
    #[case("2024-01-05T10:30:15", "2024-01-05T10:30:15+08:00")]
    #[case("2024-01-05 10:30:15.250", "2024-01-05T10:30:15.250+08:00")]
    #[case("2024/1/5 9:05", "2024-01-05T09:05:00+08:00")]
    #[case("2024-01-05", "2024-01-05T00:00:00+08:00")]
    #[case("2024-01-05T10:30:00Z", "2024-01-05T10:30:00+08:00")]
    #[case("2024-01-05T10:30:00+02:00", "2024-01-05T10:30:00+08:00")]
    #[case("2024-01-05T10:30+02:00", "2024-01-05T10:30:00+08:00")]
    fn timestamps_are_localised_to_utc_plus_eight(#[case] raw: &str, #[case] expected: &str) {
        let parsed = parse_gps_time(COLUMN, raw).expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), expected);
    }

    #[rstest]
    fn separator_conventions_agree_on_the_instant() {
        let dashed = parse_gps_time(COLUMN, "2024-01-05 10:30").expect("dashed");
        let slashed = parse_gps_time(COLUMN, "2024/01/05T10:30").expect("slashed");
        assert_eq!(dashed, slashed);
        assert_eq!(dashed.naive_utc().to_string(), "2024-01-05 02:30:00");
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-01 10:30")]
    #[case("05/01/2024 10:30")]
    fn timestamps_reject_unknown_layouts(#[case] raw: &str) {
        assert_eq!(
            parse_gps_time(COLUMN, raw),
            Err(ValueError::Timestamp {
                column: COLUMN,
                raw: raw.to_owned()
            })
        );
    }
}
