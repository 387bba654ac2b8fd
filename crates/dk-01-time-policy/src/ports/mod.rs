//! # Ports Layer
//!
//! Trait definitions for what policy evaluators depend on.

pub mod outbound;
