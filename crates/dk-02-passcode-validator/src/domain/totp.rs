//! # TOTP (RFC 6238)
//!
//! Time-based one-time passcodes with the parameters every common
//! authenticator app assumes: HMAC-SHA1, 30 second steps, 6 digits. A code is
//! accepted for the current step and one step either side.

use super::base32;
use super::errors::SecretError;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;
use std::fmt;
use std::str::FromStr;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha1 = Hmac<Sha1>;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Length of one time step (seconds).
pub const PERIOD_SECS: u64 = 30;

/// Digits in a passcode.
pub const DIGITS: usize = 6;

/// Steps either side of the current one that are still accepted.
pub const SKEW_STEPS: u64 = 1;

/// Size of a freshly generated secret, the RFC 4226 recommended 160 bits.
pub const GENERATED_SECRET_LEN: usize = 20;

const MODULUS: u32 = 1_000_000;

// =============================================================================
// SECRET
// =============================================================================

/// Shared TOTP secret. Cleared from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct TotpSecret {
    bytes: Vec<u8>,
}

impl TotpSecret {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SecretError> {
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self { bytes })
    }

    /// Decode the base32 form shown to users during enrollment.
    pub fn from_base32(text: &str) -> Result<Self, SecretError> {
        Self::from_bytes(base32::decode(text)?)
    }

    /// Fresh random secret for enrolling a new person.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn to_base32(&self) -> String {
        base32::encode(&self.bytes)
    }

    /// The passcode for the step containing `unix_secs`.
    pub fn generate_code(&self, unix_secs: u64) -> Result<String, SecretError> {
        let value = self.hotp(unix_secs / PERIOD_SECS)?;
        Ok(format!("{:0width$}", value, width = DIGITS))
    }

    /// Check `code` against the steps around `unix_secs`.
    ///
    /// Codes with the wrong length or any non-digit character never match.
    /// Every candidate step is compared, in constant time, regardless of
    /// earlier results.
    pub fn verify(&self, code: &str, unix_secs: u64) -> bool {
        if code.len() != DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let step = unix_secs / PERIOD_SECS;
        let first = step.saturating_sub(SKEW_STEPS);
        let last = step.saturating_add(SKEW_STEPS);

        let mut matched = Choice::from(0);
        for counter in first..=last {
            let Ok(value) = self.hotp(counter) else {
                return false;
            };
            let expected = format!("{:0width$}", value, width = DIGITS);
            matched |= expected.as_bytes().ct_eq(code.as_bytes());
        }
        matched.into()
    }

    /// RFC 4226 HOTP value with dynamic truncation.
    fn hotp(&self, counter: u64) -> Result<u32, SecretError> {
        let mut mac =
            HmacSha1::new_from_slice(&self.bytes).map_err(|_| SecretError::KeyRejected)?;
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = (u32::from(digest[offset] & 0x7f) << 24)
            | (u32::from(digest[offset + 1]) << 16)
            | (u32::from(digest[offset + 2]) << 8)
            | u32::from(digest[offset + 3]);
        Ok(binary % MODULUS)
    }
}

impl FromStr for TotpSecret {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base32(s)
    }
}

impl fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the actual secret
        f.write_str("TotpSecret(***)")
    }
}
