//! # Time Policy (DK-01)
//!
//! Decides whether a moment falls inside a person's allowed access windows.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `ClockTime`, `PolicyBound`, `Policy` and the
//!   policy-string parser. Pure values, no I/O.
//! - **Ports Layer** (`ports/`): the `Clock` trait evaluators use to ask "now".
//! - **Adapters Layer** (`adapters/`): system and fixed clocks.
//!
//! ## Policy Strings
//!
//! ```text
//! policy := bound ("|" bound)*
//! bound  := "[" dow ":" dow "]" HH:MM "->" HH:MM
//! ```
//!
//! `[Mon:Fri]08:00->20:30|[Sat:Sat]10:00->14:00` allows weekday office hours
//! and a short Saturday window. Day ranges wrap around the week, so
//! `[Fri:Mon]` covers Friday, Saturday, Sunday and Monday. Windows may not
//! cross midnight.

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export public API
pub use adapters::clock::{FixedClock, SystemClock};
pub use domain::bound::{day_range, PolicyBound};
pub use domain::clock_time::ClockTime;
pub use domain::errors::PolicyParseError;
pub use domain::parser::{parse_bound, parse_clock_time, parse_weekday};
pub use domain::policy::Policy;
pub use ports::outbound::Clock;
