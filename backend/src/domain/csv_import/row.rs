//! Header-keyed row access and row-to-`TrackPoint` conversion.

use std::collections::HashMap;

use csv::StringRecord;

use super::columns;
use super::values::{ValueError, parse_bool, parse_float, parse_gps_time, parse_int};
use crate::domain::TrackPoint;

/// Column positions resolved once from the header record.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index the header record. Surrounding whitespace and a stray byte-order
    /// mark are ignored; when a header repeats, the last occurrence wins.
    #[must_use]
    pub fn new(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(position, header)| {
                let header = header.trim_start_matches('\u{feff}').trim();
                (header.to_owned(), position)
            })
            .collect();
        Self { positions }
    }

    /// Columns from the export format that the header record lacks.
    #[must_use]
    pub fn missing_columns(&self) -> Vec<&'static str> {
        columns::ALL
            .into_iter()
            .filter(|column| !self.positions.contains_key(*column))
            .collect()
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: &'static str) -> Result<&'r str, ValueError> {
        self.positions
            .get(column)
            .and_then(|position| record.get(*position))
            .ok_or(ValueError::MissingColumn { column })
    }
}

/// Convert one record into a [`TrackPoint`], stopping at the first bad cell.
pub fn parse_row(index: &HeaderIndex, record: &StringRecord) -> Result<TrackPoint, ValueError> {
    let int = |column| index.cell(record, column).and_then(|raw| parse_int(column, raw));
    let float = |column| index.cell(record, column).and_then(|raw| parse_float(column, raw));

    let gps_time = index
        .cell(record, columns::GPS_TIME)
        .and_then(|raw| parse_gps_time(columns::GPS_TIME, raw))?;

    Ok(TrackPoint {
        point_index: int(columns::POINT_INDEX)?,
        gps_time,
        longitude: float(columns::LONGITUDE)?,
        latitude: float(columns::LATITUDE)?,
        x: float(columns::X)?,
        y: float(columns::Y)?,
        velocity: float(columns::VELOCITY)?,
        yaw: float(columns::YAW)?,
        state: index.cell(record, columns::STATE).and_then(parse_bool)?,
        amplitude: float(columns::AMPLITUDE)?,
        depth: int(columns::DEPTH)?,
        depth_value: int(columns::DEPTH_VALUE)?,
    })
}
