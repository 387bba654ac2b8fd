//! # Policy Errors
//!
//! Every way an operator-authored policy string can be wrong gets its own
//! variant, carrying the offending fragment.

use super::clock_time::ClockTime;
use thiserror::Error;

/// Errors from parsing or directly constructing policy values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyParseError {
    /// The policy string contains no bounds at all
    #[error("policy string is empty")]
    EmptyPolicy,

    /// General shape of a bound is wrong (no `]`, nothing after the days)
    #[error("malformed policy bound {0:?}: expected `[DOW:DOW]HH:MM->HH:MM`")]
    MalformedBound(String),

    /// Day section is not `[DOW:DOW]` or names an unknown weekday
    #[error("bad day-of-week range {0:?}: expected `[DOW:DOW]`")]
    InvalidDay(String),

    /// Time section is not `HH:MM->HH:MM`
    #[error("bad clock time range {0:?}: expected `HH:MM->HH:MM`")]
    InvalidClockTime(String),

    /// An hour or minute field does not have exactly two characters
    #[error("clock time field {0:?} must have exactly two digits")]
    InvalidDigitCount(String),

    /// An hour or minute field contains something other than digits
    #[error("clock time field {0:?} is not numeric")]
    NonNumeric(String),

    /// Hour outside 00-23
    #[error("hour {0} out of range 00-23")]
    HourOutOfRange(u32),

    /// Minute outside 00-59
    #[error("minute {0} out of range 00-59")]
    MinuteOutOfRange(u32),

    /// Lower bound is later in the day than the upper bound
    #[error("mismatched times: {lower} is after {upper}")]
    MismatchedTimes { lower: ClockTime, upper: ClockTime },

    /// A bound was constructed with no days
    #[error("policy bound has no days")]
    NoDays,
}
