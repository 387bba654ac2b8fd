//! Access client configuration with validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main access client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessClientConfig {
    /// Host running the door service
    pub door_host: String,
    /// Port the door service listens on
    pub door_port: u16,
    /// How long to hold the door open per accepted code (seconds)
    pub seconds_granted: i64,
    /// Lockout after a failed attempt (seconds)
    pub cooldown_secs: u64,
    /// Parse every time policy at startup
    pub eager_policies: bool,
    /// Timeout for one door command
    pub request_timeout: Duration,
    /// JSON list of accounts
    pub accounts_file: Option<PathBuf>,
    /// Base64 key shared with the door service
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for AccessClientConfig {
    fn default() -> Self {
        Self {
            door_host: "localhost".into(),
            door_port: 8080,
            seconds_granted: 5,
            cooldown_secs: 3,
            eager_policies: true,
            request_timeout: Duration::from_secs(5),
            accounts_file: None,
            api_key: None,
        }
    }
}

impl AccessClientConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.door_host.trim().is_empty() {
            return Err(ConfigError::InvalidAddress("door_host cannot be empty".into()));
        }
        if self.door_port == 0 {
            return Err(ConfigError::InvalidAddress("door_port cannot be 0".into()));
        }
        if self.seconds_granted < 1 {
            return Err(ConfigError::InvalidDuration(format!(
                "seconds_granted must be at least 1, got {}",
                self.seconds_granted
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Door address is unusable
    #[error("invalid door address: {0}")]
    InvalidAddress(String),
    /// Open duration is out of range
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// No account store configured
    #[error("no accounts file configured")]
    MissingAccounts,
    /// No key for signing door commands
    #[error("no API key configured")]
    MissingApiKey,
}
