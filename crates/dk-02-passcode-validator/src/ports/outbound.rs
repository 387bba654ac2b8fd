//! # Outbound Ports (Driven Ports / SPI)
//!
//! Post-match authorization. The validator only knows whether a code belongs
//! to a key; whether that person may enter is someone else's decision.

use crate::domain::key::Key;

/// Verdict of an authorization check, with a human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    pub reason: String,
}

impl AuthorizationDecision {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// Decides whether the identity a passcode matched may be let in.
pub trait AuthorizationCallback<A>: Send + Sync {
    /// `code` is the passcode exactly as submitted.
    fn authorize(&self, key: &Key<A>, code: &str) -> AuthorizationDecision;
}

impl<A, F> AuthorizationCallback<A> for F
where
    F: Fn(&Key<A>, &str) -> AuthorizationDecision + Send + Sync,
{
    fn authorize(&self, key: &Key<A>, code: &str) -> AuthorizationDecision {
        self(key, code)
    }
}
