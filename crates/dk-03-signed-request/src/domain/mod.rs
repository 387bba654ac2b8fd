//! # Domain Layer

pub mod errors;
pub mod mac;
pub mod origin;
pub mod payload;
pub mod secret;
