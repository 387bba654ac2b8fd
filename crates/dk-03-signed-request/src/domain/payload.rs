//! # Unlock Payload
//!
//! The JSON body of a door command. The timestamp travels inside the signed
//! bytes, so the tag covers both the request and its freshness.

use serde::{Deserialize, Serialize};

/// "Open the door for `seconds`", stamped with the sender's unix time.
///
/// Field names are capitalized on the wire for compatibility with existing
/// door clients: `{"Seconds":5,"When":1460108220}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequest {
    #[serde(rename = "Seconds")]
    pub seconds: i64,
    #[serde(rename = "When")]
    pub when: i64,
}

impl UnlockRequest {
    pub fn new(seconds: i64, when: i64) -> Self {
        Self { seconds, when }
    }

    /// Compact JSON, the exact bytes that get signed.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// An unlock request that passed every check, with the app that signed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedUnlock {
    pub request: UnlockRequest,
    pub app: String,
}

impl VerifiedUnlock {
    pub fn seconds(&self) -> u64 {
        self.request.seconds.unsigned_abs()
    }
}
