//! # Door Service (DK-04)
//!
//! Listens for HMAC-authenticated unlock commands over HTTP and drives the
//! door relay for the requested number of seconds.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): configuration and service errors
//! - **Ports Layer** (`ports/`): the `Actuator` the relay driver implements
//! - **Adapters Layer** (`adapters/`): logging and recording actuators
//! - **Controller** (`controller.rs`): open now, close later, extend on overlap
//! - **Service Layer** (`service.rs`): axum router, request handling, server
//!
//! ## Security Notes
//!
//! - Requests are authenticated by `dk-03-signed-request`; the handler never
//!   reveals which check failed
//! - Optional local-only mode refuses commands from public addresses
//! - Request timeout and body size limit on every route

pub mod adapters;
pub mod controller;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::actuator::{LoggingActuator, RecordingActuator};
pub use controller::DoorController;
pub use domain::config::{ConfigError, DoorServiceConfig};
pub use domain::errors::ServiceError;
pub use ports::outbound::Actuator;
pub use service::{DoorService, AUTH_FAILED_BODY, NOT_LOCAL_BODY};
