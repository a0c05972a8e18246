//! Schedule errors
//!
//! Every failure is returned to the caller; none are fatal to the process.

use thiserror::Error;

/// Error type for schedule operations
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Pilot identifier is not in the schedule
    #[error("Pilot not found: {0}")]
    UnknownPilot(String),

    /// Input is not a 24-hour `HH:MM:SS` clock time
    #[error("Invalid time format: '{0}' (expected HH:MM:SS)")]
    InvalidTimeFormat(String),

    /// A schedule row could not be parsed into a pilot record
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line in the source
        line: u64,
        /// Pilot id from the first field, when there was one
        pilot_id: Option<String>,
        /// What was wrong with the row
        reason: String,
    },

    /// Appending to the late check-in log failed
    #[error("Failed to record late check-in for pilot {pilot_id}: {source}")]
    LogWriteFailure {
        /// Pilot whose late check-in went unrecorded
        pilot_id: String,
        /// Underlying write error
        #[source]
        source: std::io::Error,
    },

    /// Schedule source could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record reader failed
    #[error("Record reader error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
