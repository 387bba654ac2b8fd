//! # Outbound Ports (Driven Ports / SPI)

use chrono::{DateTime, Local};

/// Source of "now" for policy evaluation.
///
/// Evaluators take a clock instead of calling `Local::now()` directly so that
/// access decisions can be checked against fixed instants.
pub trait Clock: Send + Sync {
    /// The current moment in the local time zone.
    fn now(&self) -> DateTime<Local>;
}
