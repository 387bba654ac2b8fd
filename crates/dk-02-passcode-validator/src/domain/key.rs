//! # Key
//!
//! An enrolled identity: a name, its TOTP secret, and whatever the
//! orchestration layer attaches (contact details, access policy).

use super::totp::TotpSecret;

/// Named TOTP secret with a typed attachment. Immutable after load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key<A> {
    name: String,
    secret: TotpSecret,
    attachment: A,
}

impl<A> Key<A> {
    pub fn new(name: impl Into<String>, secret: TotpSecret, attachment: A) -> Self {
        Self {
            name: name.into(),
            secret,
            attachment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &TotpSecret {
        &self.secret
    }

    pub fn attachment(&self) -> &A {
        &self.attachment
    }

    /// Whether `code` is this key's passcode around `unix_secs`.
    pub fn accepts(&self, code: &str, unix_secs: u64) -> bool {
        self.secret.verify(code, unix_secs)
    }
}

impl Key<()> {
    /// Key with nothing attached.
    pub fn bare(name: impl Into<String>, secret: TotpSecret) -> Self {
        Self::new(name, secret, ())
    }
}
