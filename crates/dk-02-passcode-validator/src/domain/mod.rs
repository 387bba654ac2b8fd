//! # Domain Layer
//!
//! TOTP primitives and enrolled keys. No threads, no clocks.

pub mod base32;
pub mod errors;
pub mod key;
pub mod totp;
