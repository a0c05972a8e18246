//! Departure conflict detection
//!
//! Two pilots conflict when their departure points are less than
//! [`CONFLICT_RADIUS_KM`] apart and their scheduled start strings are
//! identical, date included.

use pilotops_core::GeoCoordinate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::PilotRecord;
use crate::store::Schedule;

/// Departures closer than this are considered simultaneous-risk
pub const CONFLICT_RADIUS_KM: f64 = 500.0;

/// One side of a conflict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPosition {
    /// Pilot identifier
    pub pilot_id: String,
    /// Flight the pilot is assigned to
    pub flight_id: String,
    /// Departure point
    pub coordinate: GeoCoordinate,
    /// Departure point as written in the schedule
    pub location: String,
}

impl From<&PilotRecord> for FlightPosition {
    fn from(record: &PilotRecord) -> Self {
        Self {
            pilot_id: record.pilot_id.clone(),
            flight_id: record.flight_id.clone(),
            coordinate: record.coordinate,
            location: record.location.clone(),
        }
    }
}

/// Details of a detected conflict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    /// First pilot as passed to [`detect_conflict`]
    pub first: FlightPosition,
    /// Second pilot as passed to [`detect_conflict`]
    pub second: FlightPosition,
    /// Shared scheduled start
    pub scheduled_start: String,
    /// Great-circle distance between departure points
    pub distance_km: f64,
}

impl ConflictReport {
    /// Distance rounded to two decimals for display
    pub fn rounded_distance_km(&self) -> f64 {
        (self.distance_km * 100.0).round() / 100.0
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conflict detected between pilot {} (Flight {}) and pilot {} (Flight {}) at {} and {}. Distance: {:.2} km.",
            self.first.pilot_id,
            self.first.flight_id,
            self.second.pilot_id,
            self.second.flight_id,
            self.first.location,
            self.second.location,
            self.distance_km
        )
    }
}

/// Verdict of [`detect_conflict`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ConflictOutcome {
    /// The two departures conflict
    Conflict(ConflictReport),
    /// No conflict; distance kept for diagnostics
    Clear {
        /// Great-circle distance between departure points
        distance_km: f64,
    },
}

impl ConflictOutcome {
    /// Whether a conflict was found
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConflictOutcome::Conflict(_))
    }

    /// Computed distance, either way
    pub fn distance_km(&self) -> f64 {
        match self {
            ConflictOutcome::Conflict(report) => report.distance_km,
            ConflictOutcome::Clear { distance_km } => *distance_km,
        }
    }
}

/// Check two pilots' departures for a conflict
///
/// Both pilots must be in the schedule; a missing one is `UnknownPilot`,
/// never a silent "no conflict".
pub fn detect_conflict(pilot1: &str, pilot2: &str, schedule: &Schedule) -> Result<ConflictOutcome> {
    let first = schedule.require(pilot1)?;
    let second = schedule.require(pilot2)?;

    let distance_km = first.coordinate.haversine_distance_km(&second.coordinate);
    let same_start = first.scheduled_start.as_str() == second.scheduled_start.as_str();

    debug!(
        pilot1,
        pilot2,
        distance_km,
        same_start,
        "Compared departures"
    );

    if distance_km < CONFLICT_RADIUS_KM && same_start {
        let report = ConflictReport {
            first: first.into(),
            second: second.into(),
            scheduled_start: first.scheduled_start.as_str().to_string(),
            distance_km,
        };
        warn!(
            pilot1,
            flight1 = %report.first.flight_id,
            pilot2,
            flight2 = %report.second.flight_id,
            distance_km = report.rounded_distance_km(),
            "Departure conflict detected"
        );
        Ok(ConflictOutcome::Conflict(report))
    } else {
        Ok(ConflictOutcome::Clear { distance_km })
    }
}
