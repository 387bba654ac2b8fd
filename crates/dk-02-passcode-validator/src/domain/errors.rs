//! # Passcode Errors

use thiserror::Error;

/// Outcome of a rejected passcode attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasscodeError {
    /// A previous rejection engaged the cooldown and it has not expired.
    /// No code was checked.
    #[error("too many attempts, try again later")]
    RateLimited,

    /// The code matched no enrolled key
    #[error("invalid passcode")]
    InvalidCode,

    /// The code matched `name`, but the authorization callback refused entry
    #[error("access denied for {name}: {reason}")]
    AuthorizationDenied { name: String, reason: String },
}

/// Errors decoding or using a TOTP secret.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    /// No secret bytes at all
    #[error("TOTP secret is empty")]
    Empty,

    /// Character outside the RFC 4648 base32 alphabet
    #[error("invalid base32 character {0:?} in TOTP secret")]
    InvalidCharacter(char),

    /// Number of base32 symbols cannot encode whole bytes
    #[error("invalid base32 length {0} for TOTP secret")]
    InvalidLength(usize),

    /// The MAC implementation refused the key
    #[error("TOTP secret rejected by HMAC")]
    KeyRejected,
}
