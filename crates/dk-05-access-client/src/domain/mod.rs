//! # Domain Layer
//!
//! Account records, client configuration and errors.

pub mod account;
pub mod config;
pub mod errors;
