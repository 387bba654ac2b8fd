//! # Domain Layer
//!
//! Pure policy values and parsing, no I/O dependencies.

pub mod bound;
pub mod clock_time;
pub mod errors;
pub mod parser;
pub mod policy;
