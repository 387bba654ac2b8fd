//! # Passcode Validator (DK-02)
//!
//! Checks a submitted one-time passcode against every enrolled TOTP secret and
//! says who it belongs to.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): base32, RFC 6238 TOTP, `Key`
//! - **Ports Layer** (`ports/`): `PasscodeValidator` (inbound) and the
//!   post-match `AuthorizationCallback` (outbound)
//! - **Service Layer** (`service.rs`): `KeySet`, the concurrent validator
//!
//! ## Security Notes
//!
//! - Every rejection (no match, or a match the callback refuses) engages a
//!   cooldown; attempts during the cooldown are refused before any MAC work.
//! - Code comparison is constant-time; secrets are zeroized on drop and never
//!   appear in `Debug` output or logs.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::errors::{PasscodeError, SecretError};
pub use domain::key::Key;
pub use domain::totp::{TotpSecret, DIGITS, PERIOD_SECS, SKEW_STEPS};
pub use ports::inbound::PasscodeValidator;
pub use ports::outbound::{AuthorizationCallback, AuthorizationDecision};
pub use service::{KeySet, DEFAULT_COOLDOWN};
