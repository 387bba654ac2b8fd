//! # Access Client (DK-05)
//!
//! Keypad side of the door system: matches typed passcodes to enrolled
//! people, checks their access policy, and sends a signed unlock command to
//! the door service.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): account store, configuration, errors
//! - **Ports Layer** (`ports/`): the `DoorGateway` the door client implements
//! - **Adapters Layer** (`adapters/`): reqwest client for the door service
//! - **Gate** (`gate.rs`): time-policy authorization callback
//! - **Service Layer** (`service.rs`): prompt and entry loop
//!
//! ## Security Notes
//!
//! - Typed passcodes are never logged; only their length on failure
//! - Failed or refused attempts lock input out for the cooldown period
//! - A policy that cannot be parsed denies entry

pub mod adapters;
pub mod domain;
pub mod gate;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::door_client::DoorClient;
pub use domain::account::{
    enroll_all, load_accounts, parse_accounts, Account, AttachedPolicy, ContactInfo, Enrollment,
};
pub use domain::config::{AccessClientConfig, ConfigError};
pub use domain::errors::{DoorClientError, LoadError};
pub use gate::AuthorizationGate;
pub use ports::outbound::DoorGateway;
pub use service::{AccessClient, AttemptOutcome, PROMPT};
