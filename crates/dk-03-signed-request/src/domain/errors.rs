//! # Signed Request Errors

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a signed unlock request is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignedRequestError {
    /// No `hmac` header on the request
    #[error("no MAC tag present")]
    MissingTag,

    /// The tag is not standard base64
    #[error("MAC tag is not valid base64")]
    MalformedTag,

    /// No authorized app's secret produces this tag for this body
    #[error("no key can authenticate this request")]
    NoMatchingKey,

    /// The authenticated body is not an unlock request
    #[error("authenticated payload is malformed: {0}")]
    MalformedPayload(String),

    /// Authentic, but stamped too long ago
    #[error("MAC is valid but request timestamp {when} is out of date at {now}")]
    Stale { when: i64, now: i64 },

    /// Authentic, but stamped too far ahead of the receiver's clock
    #[error("MAC is valid but request timestamp {when} is in the future at {now}")]
    FromFuture { when: i64, now: i64 },

    /// Authentic and fresh, but asks for an unsupported open duration
    #[error("can only open door for between 1 and {max} seconds, not {seconds}")]
    DurationOutOfRange { seconds: i64, max: i64 },
}

impl SignedRequestError {
    /// Whether the sender failed to prove who it is (as opposed to asking
    /// for something unreasonable).
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, Self::DurationOutOfRange { .. })
    }
}

/// Errors decoding shared secrets or loading the authorized-app list.
#[derive(Debug, Error)]
pub enum AppLoadError {
    /// The file could not be read
    #[error("failed to read authorized apps from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON list of apps
    #[error("authorized apps are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An app's key is not standard base64
    #[error("key for {name:?} is not valid base64")]
    InvalidKey { name: String },

    /// An app has an empty key
    #[error("key for {name:?} is empty")]
    EmptyKey { name: String },
}
