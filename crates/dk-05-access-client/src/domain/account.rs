//! # Account Store
//!
//! People allowed through the door, as an operator-maintained JSON list:
//!
//! ```json
//! [{"name": "Ada", "email": "ada@example.com",
//!   "time policy": "[Mon:Fri]08:00->20:30", "secret": "JBSWY3DPEHPK3PXP"}]
//! ```

use super::errors::LoadError;
use dk_01_time_policy::{Policy, PolicyParseError};
use dk_02_passcode_validator::{Key, TotpSecret};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// One record of the account store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "time policy")]
    pub time_policy: String,
    /// Base32 TOTP secret
    pub secret: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
}

/// A person's access policy, parsed at load or kept as text until needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachedPolicy {
    Parsed(Policy),
    Raw(String),
}

impl AttachedPolicy {
    pub fn resolve(&self) -> Result<Cow<'_, Policy>, PolicyParseError> {
        match self {
            Self::Parsed(policy) => Ok(Cow::Borrowed(policy)),
            Self::Raw(text) => Policy::parse(text).map(Cow::Owned),
        }
    }
}

/// What an enrolled key carries besides its secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enrollment {
    pub contact: ContactInfo,
    pub policy: AttachedPolicy,
}

impl Account {
    /// Turn the record into a validator key.
    ///
    /// With `eager_policies` the policy is parsed now and a bad one fails the
    /// load; otherwise it is parsed on every access check.
    pub fn enroll(self, eager_policies: bool) -> Result<Key<Enrollment>, LoadError> {
        let secret = TotpSecret::from_base32(&self.secret).map_err(|source| LoadError::Secret {
            name: self.name.clone(),
            source,
        })?;
        let policy = if eager_policies {
            let parsed = Policy::parse(&self.time_policy).map_err(|source| LoadError::Policy {
                name: self.name.clone(),
                source,
            })?;
            AttachedPolicy::Parsed(parsed)
        } else {
            AttachedPolicy::Raw(self.time_policy)
        };
        let enrollment = Enrollment {
            contact: ContactInfo { email: self.email },
            policy,
        };
        Ok(Key::new(self.name, secret, enrollment))
    }
}

pub fn parse_accounts(json: &str) -> Result<Vec<Account>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_accounts(path: &Path) -> Result<Vec<Account>, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_accounts(&json)
}

/// Enroll every account, stopping at the first bad one.
pub fn enroll_all(
    accounts: Vec<Account>,
    eager_policies: bool,
) -> Result<Vec<Key<Enrollment>>, LoadError> {
    accounts
        .into_iter()
        .map(|account| account.enroll(eager_policies))
        .collect()
}
