//! # Policy
//!
//! A union of policy bounds. An instant is allowed when any bound allows it;
//! overlapping bounds are harmless.

use super::bound::PolicyBound;
use super::errors::PolicyParseError;
use super::parser::parse_bound;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Set of bounds, any of which can admit an instant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    bounds: Vec<PolicyBound>,
}

impl Policy {
    pub fn new(bounds: Vec<PolicyBound>) -> Self {
        Self { bounds }
    }

    /// Parse `[dow:dow]hh:mm->hh:mm|[dow:dow]hh:mm->hh:mm...`.
    ///
    /// Fails on the first bad bound; a policy is never partially applied.
    pub fn parse(text: &str) -> Result<Self, PolicyParseError> {
        if text.trim().is_empty() {
            return Err(PolicyParseError::EmptyPolicy);
        }
        let bounds = text
            .split('|')
            .map(parse_bound)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &[PolicyBound] {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Whether `instant`, seen in the local time zone, is inside any bound.
    pub fn contains_time<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let local = instant.with_timezone(&Local);
        self.contains_local(&local.naive_local())
    }

    /// Whether a local wall-clock date and time is inside any bound.
    pub fn contains_local(&self, local: &NaiveDateTime) -> bool {
        self.bounds.iter().any(|bound| bound.contains_local(local))
    }
}

impl FromStr for Policy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bound) in self.bounds.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", bound)?;
        }
        Ok(())
    }
}
