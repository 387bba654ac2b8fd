//! # Policy String Parser
//!
//! Parses single bounds of the form `[DOW:DOW]HH:MM->HH:MM`. Whitespace around
//! the bound, around each half of the `->` and around the `:` of a clock time
//! is ignored.

use super::bound::{day_range, PolicyBound};
use super::clock_time::ClockTime;
use super::errors::PolicyParseError;
use chrono::Weekday;

/// Parse one `[DOW:DOW]HH:MM->HH:MM` bound.
pub fn parse_bound(bound: &str) -> Result<PolicyBound, PolicyParseError> {
    let bound = bound.trim();
    let Some(close) = bound.find(']') else {
        return Err(PolicyParseError::MalformedBound(bound.to_string()));
    };
    let (day_bits, time_bits) = bound.split_at(close + 1);
    if time_bits.trim().is_empty() {
        return Err(PolicyParseError::MalformedBound(bound.to_string()));
    }
    let days = parse_day_bits(day_bits)?;
    let (lower, upper) = parse_time_bits(time_bits)?;
    PolicyBound::new(lower, upper, days)
}

/// Parse `[low:high]` into the expanded day list.
fn parse_day_bits(day_bits: &str) -> Result<Vec<Weekday>, PolicyParseError> {
    let invalid = || PolicyParseError::InvalidDay(day_bits.to_string());
    let inner = day_bits
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let mut ends = inner.split(':');
    let (Some(low), Some(high), None) = (ends.next(), ends.next(), ends.next()) else {
        return Err(invalid());
    };
    Ok(day_range(parse_weekday(low)?, parse_weekday(high)?))
}

/// Parse a weekday name. Case-insensitive; only the first three letters
/// count, so `mon`, `Monday` and `MONDAYS` are all Monday.
pub fn parse_weekday(name: &str) -> Result<Weekday, PolicyParseError> {
    let lowered = name.trim().to_ascii_lowercase();
    let prefix = lowered
        .get(..3)
        .ok_or_else(|| PolicyParseError::InvalidDay(name.to_string()))?;
    match prefix {
        "mon" => Ok(Weekday::Mon),
        "tue" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thu" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        _ => Err(PolicyParseError::InvalidDay(name.to_string())),
    }
}

/// Parse `HH:MM->HH:MM` into an ordered pair.
fn parse_time_bits(time_bits: &str) -> Result<(ClockTime, ClockTime), PolicyParseError> {
    let time_bits = time_bits.trim();
    let mut halves = time_bits.split("->");
    let (Some(low), Some(high), None) = (halves.next(), halves.next(), halves.next()) else {
        return Err(PolicyParseError::InvalidClockTime(time_bits.to_string()));
    };
    let lower = parse_clock_time(low)?;
    let upper = parse_clock_time(high)?;
    if lower > upper {
        return Err(PolicyParseError::MismatchedTimes { lower, upper });
    }
    Ok((lower, upper))
}

/// Parse `HH:MM` with exactly two digits per field.
pub fn parse_clock_time(text: &str) -> Result<ClockTime, PolicyParseError> {
    let mut fields = text.trim().split(':');
    let (Some(hour), Some(minute), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(PolicyParseError::InvalidClockTime(text.to_string()));
    };
    let hour = parse_two_digits(hour)?;
    let minute = parse_two_digits(minute)?;
    ClockTime::new(hour, minute)
}

fn parse_two_digits(field: &str) -> Result<u32, PolicyParseError> {
    let field = field.trim();
    if field.chars().count() != 2 {
        return Err(PolicyParseError::InvalidDigitCount(field.to_string()));
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PolicyParseError::NonNumeric(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| PolicyParseError::NonNumeric(field.to_string()))
}
