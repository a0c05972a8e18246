//! PilotOps Schedule
//!
//! Answers the three questions the operations desk asks of a flight roster:
//! when a pilot is scheduled to fly, whether a pilot checked in on time, and
//! whether two pilots' departures conflict.
//!
//! This crate provides:
//! - The read-only [`Schedule`] store, built once from `;`-delimited records
//! - [`ClockTime`] validation for `HH:MM:SS` check-in input
//! - Check-in classification with late check-ins written to a [`LateCheckinLog`]
//! - Haversine-based departure [conflict detection](detect_conflict)

#![warn(missing_docs)]

pub mod checkin;
pub mod clock;
pub mod conflict;
pub mod error;
pub mod late_log;
pub mod record;
pub mod store;

pub use checkin::{checkin_threshold, classify, process_checkin, CheckInOutcome, CHECKIN_LEAD_HOURS};
pub use clock::{validate, ClockTime};
pub use conflict::{detect_conflict, ConflictOutcome, ConflictReport, FlightPosition, CONFLICT_RADIUS_KM};
pub use error::{Result, ScheduleError};
pub use late_log::{FileLateCheckinLog, LateCheckinLog, MemoryLateCheckinLog, LATE_MARKER};
pub use record::{PilotRecord, ScheduledStart, FIELD_COUNT};
pub use store::{RejectedRecord, Schedule};

pub use pilotops_core::{GeoCoordinate, MalformedRecordPolicy};
