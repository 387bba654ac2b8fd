//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::DoorClientError;
use async_trait::async_trait;

/// Something that can be told to open the door.
#[async_trait]
pub trait DoorGateway: Send + Sync {
    /// Ask the door to stay open for `seconds`.
    async fn open_for(&self, seconds: i64) -> Result<(), DoorClientError>;
}
