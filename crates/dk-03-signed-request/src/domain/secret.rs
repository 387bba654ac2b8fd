//! Shared HMAC secrets and the apps that hold them.

use super::errors::AppLoadError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw symmetric key shared between a sender and the door service.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode the standard-alphabet base64 form used in config files and
    /// on the command line.
    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(text.trim()).map(Self::new)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the actual secret
        f.write_str("SharedSecret(***)")
    }
}

/// On-disk form of an authorized app.
#[derive(Deserialize)]
struct AppRecord {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DevName", default)]
    dev_name: String,
    #[serde(rename = "DevEmail", default)]
    dev_email: String,
}

/// A client allowed to issue door commands, identified by its secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizedApp {
    pub name: String,
    pub dev_name: String,
    pub dev_email: String,
    pub key: SharedSecret,
}

impl AuthorizedApp {
    pub fn new(name: impl Into<String>, key: SharedSecret) -> Self {
        Self {
            name: name.into(),
            dev_name: String::new(),
            dev_email: String::new(),
            key,
        }
    }
}

impl AppRecord {
    fn into_app(self) -> Result<AuthorizedApp, AppLoadError> {
        let key = SharedSecret::from_base64(&self.key).map_err(|_| AppLoadError::InvalidKey {
            name: self.name.clone(),
        })?;
        if key.is_empty() {
            return Err(AppLoadError::EmptyKey { name: self.name });
        }
        Ok(AuthorizedApp {
            name: self.name,
            dev_name: self.dev_name,
            dev_email: self.dev_email,
            key,
        })
    }
}

/// Parse a JSON list of `{"Key", "Name", "DevName", "DevEmail"}` objects.
///
/// Every key is decoded here, so a bad entry fails the whole load rather
/// than surfacing on some later request.
pub fn parse_authorized_apps(json: &str) -> Result<Vec<AuthorizedApp>, AppLoadError> {
    let records: Vec<AppRecord> = serde_json::from_str(json)?;
    records.into_iter().map(AppRecord::into_app).collect()
}

pub fn load_authorized_apps(path: &Path) -> Result<Vec<AuthorizedApp>, AppLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| AppLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_authorized_apps(&json)
}
