//! Pilot records
//!
//! A schedule row is `pilot_id;name;flight_id;lat,lon;start;end`. Parsing
//! happens once here; downstream code only sees typed fields.

use pilotops_core::GeoCoordinate;
use std::fmt;

use crate::clock::ClockTime;

/// Number of `;`-separated fields in a schedule row
pub const FIELD_COUNT: usize = 6;

/// Scheduled departure, `"<date> HH:MM:SS"`
///
/// The date is opaque: it is only ever compared byte-for-byte as part of
/// the full string. The time of day is parsed for check-in comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStart {
    raw: String,
    time_of_day: ClockTime,
}

impl ScheduledStart {
    /// Parse `"<date> HH:MM:SS"`, splitting on the first space
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (date, time) = raw
            .split_once(' ')
            .ok_or_else(|| format!("scheduled start '{}' has no time of day", raw))?;
        if date.is_empty() {
            return Err(format!("scheduled start '{}' has no date", raw));
        }
        let time_of_day = ClockTime::parse(time)
            .map_err(|_| format!("scheduled start '{}' has an invalid time of day", raw))?;

        Ok(Self {
            raw: raw.to_string(),
            time_of_day,
        })
    }

    /// Exact source text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Clock-time component
    pub fn time_of_day(&self) -> ClockTime {
        self.time_of_day
    }
}

impl fmt::Display for ScheduledStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One pilot's flight assignment
#[derive(Debug, Clone, PartialEq)]
pub struct PilotRecord {
    /// Unique pilot identifier
    pub pilot_id: String,
    /// Display name
    pub name: String,
    /// Assigned flight; may be shared with other pilots
    pub flight_id: String,
    /// Departure point
    pub coordinate: GeoCoordinate,
    /// Departure point as written in the schedule
    pub location: String,
    /// Scheduled departure
    pub scheduled_start: ScheduledStart,
    /// Scheduled end, carried verbatim
    pub scheduled_end: String,
}

impl PilotRecord {
    /// Build a record from the six fields of a schedule row
    ///
    /// The error is a human-readable reason; the store attaches the line.
    pub fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [pilot_id, name, flight_id, coordinate, start, end] = fields else {
            return Err(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ));
        };

        if pilot_id.is_empty() {
            return Err("pilot id is empty".to_string());
        }

        let location = coordinate.trim().to_string();
        let coordinate = coordinate
            .parse::<GeoCoordinate>()
            .map_err(|e| e.to_string())?;
        let scheduled_start = ScheduledStart::parse(start)?;

        Ok(Self {
            pilot_id: pilot_id.to_string(),
            name: name.to_string(),
            flight_id: flight_id.to_string(),
            coordinate,
            location,
            scheduled_start,
            scheduled_end: end.to_string(),
        })
    }
}
