//! # Adapters Layer

pub mod door_client;
