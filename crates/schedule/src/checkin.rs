//! Check-in processing
//!
//! A pilot is on time when they check in at least one hour before the
//! time of day of their scheduled start. The boundary itself counts as on
//! time. There is no date arithmetic: a threshold before midnight wraps
//! within the 24-hour clock and is compared as a plain clock time.

use chrono::TimeDelta;
use serde::Serialize;
use tracing::{info, warn};

use crate::clock::ClockTime;
use crate::error::Result;
use crate::late_log::LateCheckinLog;
use crate::record::PilotRecord;
use crate::store::Schedule;

/// Required lead time between check-in and scheduled start
pub const CHECKIN_LEAD_HOURS: i64 = 1;

/// Result of a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInOutcome {
    /// At or before the threshold
    OnTime,
    /// After the threshold; a late entry was logged
    Late,
}

/// Latest on-time check-in for this pilot
pub fn checkin_threshold(record: &PilotRecord) -> ClockTime {
    threshold_for(record.scheduled_start.time_of_day())
}

fn threshold_for(scheduled: ClockTime) -> ClockTime {
    scheduled.wrapping_sub(TimeDelta::hours(CHECKIN_LEAD_HOURS))
}

/// Classify a check-in against a scheduled time of day
pub fn classify(scheduled: ClockTime, checkin: ClockTime) -> CheckInOutcome {
    if checkin <= threshold_for(scheduled) {
        CheckInOutcome::OnTime
    } else {
        CheckInOutcome::Late
    }
}

/// Process a pilot's check-in
///
/// Resolves the pilot, classifies the check-in and, when late, appends to
/// `log` before returning. A failed append is returned as the error of the
/// whole call.
pub fn process_checkin(
    pilot_id: &str,
    schedule: &Schedule,
    checkin_time: ClockTime,
    log: &dyn LateCheckinLog,
) -> Result<CheckInOutcome> {
    let record = schedule.require(pilot_id)?;
    let scheduled = record.scheduled_start.time_of_day();
    let outcome = classify(scheduled, checkin_time);

    match outcome {
        CheckInOutcome::OnTime => {
            info!(
                pilot_id,
                checkin = %checkin_time,
                scheduled = %scheduled,
                "Pilot checked in on time"
            );
        }
        CheckInOutcome::Late => {
            warn!(
                pilot_id,
                checkin = %checkin_time,
                threshold = %checkin_threshold(record),
                "Pilot checked in late"
            );
            log.record_late(pilot_id)?;
        }
    }

    Ok(outcome)
}
