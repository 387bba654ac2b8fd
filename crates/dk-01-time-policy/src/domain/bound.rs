//! # Policy Bound
//!
//! One access rule: a set of weekdays plus a same-day time window.

use super::clock_time::ClockTime;
use super::errors::PolicyParseError;
use chrono::{Datelike, NaiveDateTime, Weekday};
use std::fmt;

/// Expand a `[low:high]` day range into the days it covers.
///
/// Walks forward through the week from `low` until `high`, so a range whose
/// low end comes later in the week wraps around: `(Fri, Mon)` yields
/// Friday, Saturday, Sunday, Monday. Equal ends yield a single day.
pub fn day_range(low: Weekday, high: Weekday) -> Vec<Weekday> {
    let mut days = vec![low];
    let mut day = low;
    while day != high {
        day = day.succ();
        days.push(day);
    }
    days
}

/// Hours of access on a set of days.
///
/// An instant is inside the bound when its weekday is one of `days` and its
/// time of day lies in `[lower, upper]`, both ends inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyBound {
    days: Vec<Weekday>,
    lower: ClockTime,
    upper: ClockTime,
}

impl PolicyBound {
    /// Create a bound over explicit days.
    ///
    /// # Errors
    /// - `MismatchedTimes` if `lower` is later in the day than `upper`
    /// - `NoDays` if `days` is empty
    pub fn new(
        lower: ClockTime,
        upper: ClockTime,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Result<Self, PolicyParseError> {
        if lower > upper {
            return Err(PolicyParseError::MismatchedTimes { lower, upper });
        }
        let mut unique: Vec<Weekday> = Vec::with_capacity(7);
        for day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        if unique.is_empty() {
            return Err(PolicyParseError::NoDays);
        }
        Ok(Self {
            days: unique,
            lower,
            upper,
        })
    }

    /// Create a bound over the (possibly wrapping) range `[from:to]`.
    pub fn for_range(
        lower: ClockTime,
        upper: ClockTime,
        from: Weekday,
        to: Weekday,
    ) -> Result<Self, PolicyParseError> {
        Self::new(lower, upper, day_range(from, to))
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn lower(&self) -> ClockTime {
        self.lower
    }

    pub fn upper(&self) -> ClockTime {
        self.upper
    }

    /// Whether the bound covers `weekday`.
    pub fn covers_day(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday)
    }

    /// Check a local wall-clock date and time against this bound.
    pub fn contains_local(&self, local: &NaiveDateTime) -> bool {
        if !self.covers_day(local.weekday()) {
            return false;
        }
        let time = local.time();
        self.lower.not_after(&time) && self.upper.not_before(&time)
    }

    /// Split the day list into runs of consecutive weekdays.
    fn day_runs(&self) -> Vec<(Weekday, Weekday)> {
        let mut runs = Vec::new();
        let mut iter = self.days.iter().copied();
        let Some(first) = iter.next() else {
            return runs;
        };
        let (mut start, mut end) = (first, first);
        for day in iter {
            if day == end.succ() && day != start {
                end = day;
            } else {
                runs.push((start, end));
                start = day;
                end = day;
            }
        }
        runs.push((start, end));
        runs
    }
}

/// Renders the bound in policy-string form. Day lists that are not a single
/// range render as several `|`-joined bounds with the same window.
impl fmt::Display for PolicyBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (start, end)) in self.day_runs().into_iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "[{}:{}]{}->{}", start, end, self.lower, self.upper)?;
        }
        Ok(())
    }
}
