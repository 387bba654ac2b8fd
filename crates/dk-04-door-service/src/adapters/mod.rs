//! # Adapters Layer

pub mod actuator;
