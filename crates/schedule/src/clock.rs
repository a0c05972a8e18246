//! 24-hour clock times
//!
//! Check-in times are entered as `HH:MM:SS`. [`ClockTime`] is the only form
//! the check-in processor accepts, so text that fails validation never
//! reaches it.

use chrono::{NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// A validated wall-clock time of day, second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a strict `HH:MM:SS` string
    ///
    /// Both digits are required in every field, hour must be 00-23 and
    /// minute/second 00-59. Anything else is `InvalidTimeFormat`.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(ScheduleError::InvalidTimeFormat(input.to_string()));
        }

        let (hour, minute, second) = match (
            two_digits(&bytes[0..2]),
            two_digits(&bytes[3..5]),
            two_digits(&bytes[6..8]),
        ) {
            (Some(h), Some(m), Some(s)) => (h, m, s),
            _ => return Err(ScheduleError::InvalidTimeFormat(input.to_string())),
        };

        Self::from_hms(hour, minute, second)
            .ok_or_else(|| ScheduleError::InvalidTimeFormat(input.to_string()))
    }

    /// Build from components; `None` when out of range
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(ClockTime)
    }

    /// Subtract a span, wrapping around midnight (00:30 - 1h = 23:30)
    pub fn wrapping_sub(self, span: TimeDelta) -> Self {
        let (time, _days) = self.0.overflowing_sub_signed(span);
        ClockTime(time)
    }

    /// Hour component (0-23)
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute component (0-59)
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second component (0-59)
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Underlying chrono value
    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

fn two_digits(field: &[u8]) -> Option<u32> {
    match field {
        [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => None,
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Whether `time` is an acceptable check-in time
///
/// Callers re-prompt on `false`; this function reports nothing itself.
pub fn validate(time: &str) -> bool {
    ClockTime::parse(time).is_ok()
}
