//! # Access Client Errors

use dk_01_time_policy::PolicyParseError;
use dk_02_passcode_validator::SecretError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the account store.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read accounts from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON list of accounts
    #[error("accounts are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An account's TOTP secret is not usable
    #[error("bad TOTP secret for {name:?}: {source}")]
    Secret {
        name: String,
        #[source]
        source: SecretError,
    },

    /// An account's time policy does not parse
    #[error("bad time policy for {name:?}: {source}")]
    Policy {
        name: String,
        #[source]
        source: PolicyParseError,
    },
}

/// Errors instructing the door to open.
#[derive(Debug, Error)]
pub enum DoorClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Nothing listening at the door address
    #[error("connection failed: {0}")]
    Connection(String),

    /// The door service answered with something other than 200
    #[error("door refused command: {status} {body}")]
    Rejected { status: u16, body: String },
}
