//! # Signer and Verifier
//!
//! ## Verification order
//!
//! 1. Tag present and base64
//! 2. Some authorized app's secret produces the tag (first match wins)
//! 3. Body parses; timestamp neither stale nor from the future
//! 4. Requested duration within `[1, max_open_seconds]`
//!
//! Steps 1-3 are authentication. Step 4 only runs for an authentic request.

use crate::domain::errors::SignedRequestError;
use crate::domain::mac::{sign_base64, verify_tag};
use crate::domain::payload::{UnlockRequest, VerifiedUnlock};
use crate::domain::secret::{AuthorizedApp, SharedSecret};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Header carrying the base64 tag.
pub const HMAC_HEADER: &str = "hmac";

/// A request is stale once this many seconds have passed since `When`.
pub const DEFAULT_FRESHNESS_SECS: i64 = 5;

/// Maximum allowed clock skew for future timestamps (seconds).
pub const DEFAULT_FUTURE_SKEW_SECS: i64 = 5;

/// Longest the door may be held open by one request (seconds).
pub const DEFAULT_MAX_OPEN_SECONDS: i64 = 10;

/// Current unix time in whole seconds.
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// =============================================================================
// SENDER
// =============================================================================

/// A signed body ready to POST, with its header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedUnlock {
    pub body: Vec<u8>,
    pub tag: String,
}

/// Builds signed unlock requests with one app's secret.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    secret: SharedSecret,
}

impl RequestSigner {
    pub fn new(secret: SharedSecret) -> Self {
        Self { secret }
    }

    /// Request `seconds` of open door, stamped now.
    pub fn sign_unlock(&self, seconds: i64) -> SignedUnlock {
        self.sign_unlock_at(seconds, current_timestamp())
    }

    pub fn sign_unlock_at(&self, seconds: i64, when: i64) -> SignedUnlock {
        let body = UnlockRequest::new(seconds, when).to_bytes();
        let tag = sign_base64(&body, self.secret.as_bytes());
        SignedUnlock { body, tag }
    }
}

// =============================================================================
// RECEIVER
// =============================================================================

/// Time and duration limits applied to authentic requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreshnessWindow {
    pub freshness_secs: i64,
    pub future_skew_secs: i64,
    pub max_open_seconds: i64,
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        Self {
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            future_skew_secs: DEFAULT_FUTURE_SKEW_SECS,
            max_open_seconds: DEFAULT_MAX_OPEN_SECONDS,
        }
    }
}

/// Authenticates unlock requests against the authorized apps.
#[derive(Clone, Debug)]
pub struct RequestVerifier {
    apps: Arc<[AuthorizedApp]>,
    window: FreshnessWindow,
}

impl RequestVerifier {
    pub fn new(apps: Vec<AuthorizedApp>, window: FreshnessWindow) -> Self {
        Self {
            apps: apps.into(),
            window,
        }
    }

    pub fn apps(&self) -> &[AuthorizedApp] {
        &self.apps
    }

    pub fn window(&self) -> FreshnessWindow {
        self.window
    }

    /// Verify `payload` and its `tag` header value as of unix time `now`.
    pub fn verify(
        &self,
        payload: &[u8],
        tag: Option<&str>,
        now: i64,
    ) -> Result<VerifiedUnlock, SignedRequestError> {
        let tag = tag.ok_or(SignedRequestError::MissingTag)?;
        let tag = STANDARD
            .decode(tag.trim())
            .map_err(|_| SignedRequestError::MalformedTag)?;

        let app = self
            .apps
            .iter()
            .find(|app| verify_tag(payload, &tag, app.key.as_bytes()))
            .ok_or(SignedRequestError::NoMatchingKey)?;
        info!(app = %app.name, "key authorised by MAC");

        let request: UnlockRequest = serde_json::from_slice(payload)
            .map_err(|e| SignedRequestError::MalformedPayload(e.to_string()))?;
        self.check_timestamp(&request, now)?;
        debug!(app = %app.name, when = request.when, "timestamp accepted");

        let max = self.window.max_open_seconds;
        if request.seconds < 1 || request.seconds > max {
            return Err(SignedRequestError::DurationOutOfRange {
                seconds: request.seconds,
                max,
            });
        }

        Ok(VerifiedUnlock {
            request,
            app: app.name.clone(),
        })
    }

    fn check_timestamp(&self, request: &UnlockRequest, now: i64) -> Result<(), SignedRequestError> {
        let when = request.when;
        if now.saturating_sub(when) >= self.window.freshness_secs {
            return Err(SignedRequestError::Stale { when, now });
        }
        if when > now.saturating_add(self.window.future_skew_secs) {
            return Err(SignedRequestError::FromFuture { when, now });
        }
        Ok(())
    }
}
