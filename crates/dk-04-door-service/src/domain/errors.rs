//! Door service errors.

use super::config::ConfigError;
use dk_03_signed_request::AppLoadError;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors starting or running the door service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The authorized apps could not be loaded
    #[error(transparent)]
    Tokens(#[from] AppLoadError),

    /// Server socket bind error
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
