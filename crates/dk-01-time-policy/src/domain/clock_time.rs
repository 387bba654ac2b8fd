//! # Clock Time
//!
//! Wall-clock hours and minutes in 24-hour notation, with no date attached.

use super::errors::PolicyParseError;
use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Hours and minutes of a day.
///
/// Both fields are range-checked on construction, so a `ClockTime` value is
/// always a real time of day. Ordering is chronological.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Midnight, the first minute of the day.
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// The last minute of the day.
    pub const LAST_MINUTE: ClockTime = ClockTime {
        hour: 23,
        minute: 59,
    };

    /// Create a clock time, rejecting `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, PolicyParseError> {
        if hour > 23 {
            return Err(PolicyParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(PolicyParseError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Seconds from midnight to `HH:MM:00`.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.hour * 3600 + self.minute * 60
    }

    /// Whether `HH:MM:00` is not after `time`.
    pub fn not_after(&self, time: &NaiveTime) -> bool {
        time.num_seconds_from_midnight() >= self.seconds_from_midnight()
    }

    /// Whether `HH:MM:00` is not before `time`, to the nanosecond.
    pub fn not_before(&self, time: &NaiveTime) -> bool {
        let secs = time.num_seconds_from_midnight();
        let bound = self.seconds_from_midnight();
        secs < bound || (secs == bound && time.nanosecond() == 0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
