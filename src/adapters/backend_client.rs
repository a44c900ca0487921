use crate::domain::ports::{BackendReply, ShuffleBackend};
use crate::utils::error::{Result, ShuffleError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Talks to the compute service over HTTP. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpShuffleBackend {
    client: Client,
    endpoint: String,
}

impl HttpShuffleBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/shuffle", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ShuffleBackend for HttpShuffleBackend {
    async fn shuffle(&self, body: Vec<u8>) -> Result<BackendReply> {
        tracing::debug!("forwarding {} bytes to {}", body.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ShuffleError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        tracing::debug!("backend response status: {}", status);

        // A reply that dies mid-body is as unusable as no reply at all.
        let body = response.bytes().await.map_err(|e| ShuffleError::Network {
            message: e.to_string(),
        })?;

        Ok(BackendReply {
            status,
            body: body.to_vec(),
        })
    }
}
