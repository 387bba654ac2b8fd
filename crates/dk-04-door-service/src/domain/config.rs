//! Door service configuration with validation.

use dk_03_signed_request::{
    FreshnessWindow, DEFAULT_FRESHNESS_SECS, DEFAULT_FUTURE_SKEW_SECS, DEFAULT_MAX_OPEN_SECONDS,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main door service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorServiceConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Refuse commands from addresses outside the local network
    pub local_only: bool,
    /// Longest a single command may hold the door open (seconds)
    pub max_open_seconds: i64,
    /// Requests older than this are stale (seconds)
    pub freshness_secs: i64,
    /// Tolerated sender clock lead (seconds)
    pub future_skew_secs: i64,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// JSON list of authorized apps
    pub tokens_file: Option<PathBuf>,
}

impl Default for DoorServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            local_only: false,
            max_open_seconds: DEFAULT_MAX_OPEN_SECONDS,
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            future_skew_secs: DEFAULT_FUTURE_SKEW_SECS,
            request_timeout: Duration::from_secs(10),
            max_body_bytes: 4096,
            tokens_file: None,
        }
    }
}

impl DoorServiceConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_open_seconds < 1 {
            return Err(ConfigError::InvalidDuration(format!(
                "max_open_seconds must be at least 1, got {}",
                self.max_open_seconds
            )));
        }
        if self.freshness_secs < 1 {
            return Err(ConfigError::InvalidDuration(format!(
                "freshness_secs must be at least 1, got {}",
                self.freshness_secs
            )));
        }
        if self.future_skew_secs < 0 {
            return Err(ConfigError::InvalidDuration(format!(
                "future_skew_secs cannot be negative, got {}",
                self.future_skew_secs
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit("max_body_bytes cannot be 0".into()));
        }
        Ok(())
    }

    /// Get server bind address
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn freshness_window(&self) -> FreshnessWindow {
        FreshnessWindow {
            freshness_secs: self.freshness_secs,
            future_skew_secs: self.future_skew_secs,
            max_open_seconds: self.max_open_seconds,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A time window or open duration is out of range
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// No authorized apps configured
    #[error("no tokens file configured")]
    MissingTokens,
}
