//! # Signed Request Channel (DK-03)
//!
//! Symmetric-key authentication for door commands sent over an untrusted
//! transport.
//!
//! ## Protocol
//!
//! The sender serializes `{"Seconds": n, "When": unix_secs}`, computes
//! HMAC-SHA256 over those exact bytes with its shared secret and sends the
//! base64 tag in the `hmac` header. The receiver tries each authorized app's
//! secret in turn, then checks that `When` is recent.
//!
//! ## Security Properties
//!
//! - **Constant-time tag comparison** via `Mac::verify_slice`
//! - **Replay window**: a captured request is useless after
//!   `DEFAULT_FRESHNESS_SECS`; timestamps from the future are refused too
//! - Secrets are zeroized on drop and redacted from `Debug`

pub mod domain;
pub mod service;

// Re-export public API
pub use domain::errors::{AppLoadError, SignedRequestError};
pub use domain::mac::{sign, sign_base64, verify_tag};
pub use domain::origin::is_private;
pub use domain::payload::{UnlockRequest, VerifiedUnlock};
pub use domain::secret::{load_authorized_apps, parse_authorized_apps, AuthorizedApp, SharedSecret};
pub use service::{
    current_timestamp, FreshnessWindow, RequestSigner, RequestVerifier, SignedUnlock,
    DEFAULT_FRESHNESS_SECS, DEFAULT_FUTURE_SKEW_SECS, DEFAULT_MAX_OPEN_SECONDS, HMAC_HEADER,
};
