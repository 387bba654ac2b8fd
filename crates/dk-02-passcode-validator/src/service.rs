//! # Key Set Service
//!
//! Application service implementing `PasscodeValidator`.
//!
//! ## Flow
//!
//! 1. Refuse outright while the cooldown is engaged (no MAC work).
//! 2. Test the code against every key at once, one rayon task per key. The
//!    first task to match fills a single-assignment slot; any later match is
//!    logged and dropped. The scope joins every task before returning.
//! 3. No match engages the cooldown. A match goes to the authorization
//!    callback, if any; a refusal also engages the cooldown.

use crate::domain::errors::PasscodeError;
use crate::domain::key::Key;
use crate::ports::inbound::PasscodeValidator;
use crate::ports::outbound::AuthorizationCallback;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Default pause after a rejected attempt.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The process's enrolled keys plus the shared cooldown.
pub struct KeySet<A> {
    keys: Vec<Key<A>>,
    cooldown: Duration,
    /// Unix millis before which attempts are refused; 0 when clear.
    no_attempts_until: AtomicU64,
    callback: Option<Box<dyn AuthorizationCallback<A>>>,
}

impl<A> KeySet<A> {
    pub fn new(keys: Vec<Key<A>>, cooldown: Duration) -> Self {
        Self {
            keys,
            cooldown,
            no_attempts_until: AtomicU64::new(0),
            callback: None,
        }
    }

    /// Consult `callback` after every match.
    pub fn with_callback(mut self, callback: impl AuthorizationCallback<A> + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn keys(&self) -> &[Key<A>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Refuse attempts for one cooldown period starting now.
    pub fn engage_cooldown(&self) {
        self.engage_cooldown_at(SystemTime::now());
    }

    pub fn engage_cooldown_at(&self, now: SystemTime) {
        let until = unix_millis(now).saturating_add(self.cooldown.as_millis() as u64);
        self.no_attempts_until.store(until, Ordering::SeqCst);
    }

    pub fn clear_cooldown(&self) {
        self.no_attempts_until.store(0, Ordering::SeqCst);
    }

    /// End of the current cooldown, if one was ever engaged.
    pub fn no_attempts_until(&self) -> Option<SystemTime> {
        match self.no_attempts_until.load(Ordering::SeqCst) {
            0 => None,
            millis => Some(UNIX_EPOCH + Duration::from_millis(millis)),
        }
    }

    pub fn is_rate_limited_at(&self, now: SystemTime) -> bool {
        unix_millis(now) < self.no_attempts_until.load(Ordering::SeqCst)
    }
}

impl<A: Sync> KeySet<A> {
    /// Validate `code` as of `now`.
    pub fn validate_at(&self, code: &str, now: SystemTime) -> Result<&Key<A>, PasscodeError> {
        if self.is_rate_limited_at(now) {
            debug!("attempt refused during cooldown");
            return Err(PasscodeError::RateLimited);
        }

        let unix_secs = unix_millis(now) / 1000;
        let Some(key) = self.find_match(code, unix_secs) else {
            warn!(code_len = code.len(), "passcode matched no key");
            self.engage_cooldown_at(now);
            return Err(PasscodeError::InvalidCode);
        };
        info!(key = %key.name(), "passcode validated");

        if let Some(callback) = &self.callback {
            let decision = callback.authorize(key, code);
            if !decision.allowed {
                warn!(key = %key.name(), reason = %decision.reason, "authorization denied");
                self.engage_cooldown_at(now);
                return Err(PasscodeError::AuthorizationDenied {
                    name: key.name().to_string(),
                    reason: decision.reason,
                });
            }
            info!(key = %key.name(), reason = %decision.reason, "authorization granted");
        }
        Ok(key)
    }

    /// Fan out across all keys; first match wins.
    fn find_match(&self, code: &str, unix_secs: u64) -> Option<&Key<A>> {
        let winner: OnceLock<&Key<A>> = OnceLock::new();
        rayon::scope(|s| {
            for key in &self.keys {
                let winner = &winner;
                s.spawn(move |_| {
                    if !key.accepts(code, unix_secs) {
                        return;
                    }
                    if winner.set(key).is_err() {
                        debug!(key = %key.name(), "additional key validated");
                    }
                });
            }
        });
        winner.into_inner()
    }
}

impl<A: Send + Sync> PasscodeValidator<A> for KeySet<A> {
    fn validate(&self, code: &str) -> Result<&Key<A>, PasscodeError> {
        self.validate_at(code, SystemTime::now())
    }

    fn is_rate_limited(&self) -> bool {
        self.is_rate_limited_at(SystemTime::now())
    }
}

impl<A> fmt::Debug for KeySet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySet")
            .field("keys", &self.keys.iter().map(Key::name).collect::<Vec<_>>())
            .field("cooldown", &self.cooldown)
            .field("no_attempts_until", &self.no_attempts_until)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
