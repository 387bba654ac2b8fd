//! HTTP client for the door service.

use crate::domain::errors::DoorClientError;
use crate::ports::outbound::DoorGateway;
use async_trait::async_trait;
use dk_03_signed_request::{RequestSigner, SharedSecret, HMAC_HEADER};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Sends signed unlock commands to `http://host:port/`.
pub struct DoorClient {
    client: Client,
    url: String,
    signer: RequestSigner,
}

impl DoorClient {
    pub fn new(
        host: &str,
        port: u16,
        secret: SharedSecret,
        timeout: Duration,
    ) -> Result<Self, DoorClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            url: format!("http://{}:{}/", host, port),
            signer: RequestSigner::new(secret),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DoorGateway for DoorClient {
    async fn open_for(&self, seconds: i64) -> Result<(), DoorClientError> {
        let signed = self.signer.sign_unlock(seconds);
        debug!(url = %self.url, seconds, "Sending door command");

        let response = self
            .client
            .post(&self.url)
            .header(HMAC_HEADER, signed.tag)
            .body(signed.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DoorClientError::Connection(format!("Cannot connect to {}", self.url))
                } else {
                    DoorClientError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != StatusCode::OK {
            return Err(DoorClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        info!(response = %body, "Door accepted command");
        Ok(())
    }
}
