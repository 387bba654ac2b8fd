//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::PasscodeError;
use crate::domain::key::Key;

/// Passcode validation API.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance serves
/// every attempt in the process.
pub trait PasscodeValidator<A>: Send + Sync {
    /// Check a submitted passcode.
    ///
    /// # Errors
    /// - `RateLimited` while a cooldown is in effect
    /// - `InvalidCode` when no key accepts the code
    /// - `AuthorizationDenied` when a key matched but entry was refused
    fn validate(&self, code: &str) -> Result<&Key<A>, PasscodeError>;

    /// Whether an attempt made now would be refused without being checked.
    fn is_rate_limited(&self) -> bool;
}
