//! Parsing of uploaded track CSV files.
//!
//! Bytes are decoded (see [`detect_encoding`]), split into records, and each
//! record is converted inside its own failure boundary: a bad row is reported
//! and skipped, never fatal to the rest of the file.

pub mod columns;
mod encoding;
mod report;
mod row;
mod values;

pub use encoding::{CONFIDENCE_THRESHOLD, decode_upload, detect_encoding, fallback_encoding};
pub use report::{ImportReport, RowError};
pub use row::{HeaderIndex, parse_row};
pub use values::{ValueError, parse_bool, parse_float, parse_gps_time, parse_int};

use csv::ReaderBuilder;
use tracing::debug;

use super::TrackPoint;

/// Rows that converted cleanly and rows that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTracks {
    pub points: Vec<TrackPoint>,
    pub errors: Vec<RowError>,
}

/// Decode and parse an uploaded CSV file.
///
/// The first record is the header. Data rows are numbered from 1.
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::parse_track_csv;
///
/// let csv = "序列号,GPS时间,经度,纬度,x,y,速度(km/h),航向,工作状态,幅宽(m),深度(mm),深度标准值\n\
///            1,2024-01-05 10:30,116.3,39.9,0,0,5.2,90,Y,2.5,180,200\n\
///            2,2024-01-05 10:31,116.3,39.9,0,0,5.2,90,maybe,2.5,180,200\n";
/// let parsed = parse_track_csv(csv.as_bytes());
/// assert_eq!(parsed.points.len(), 1);
/// assert_eq!(parsed.errors[0].to_string(), "row 2 error: invalid boolean value: MAYBE");
/// ```
#[must_use]
pub fn parse_track_csv(bytes: &[u8]) -> ParsedTracks {
    let (text, encoding) = decode_upload(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedTracks::default();
    let index = match reader.headers() {
        Ok(headers) => HeaderIndex::new(headers),
        Err(error) => {
            parsed.errors.push(RowError::new(
                0,
                ValueError::Record {
                    message: error.to_string(),
                }
                .to_string(),
            ));
            return parsed;
        }
    };

    for (offset, result) in reader.records().enumerate() {
        let row = offset + 1;
        let converted = result
            .map_err(|error| ValueError::Record {
                message: error.to_string(),
            })
            .and_then(|record| parse_row(&index, &record));
        match converted {
            Ok(point) => parsed.points.push(point),
            Err(error) => parsed.errors.push(RowError::new(row, error.to_string())),
        }
    }

    debug!(
        encoding = encoding.name(),
        points = parsed.points.len(),
        errors = parsed.errors.len(),
        "parsed track csv"
    );
    parsed
}
