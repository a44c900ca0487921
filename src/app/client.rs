use crate::domain::model::{ErrorEnvelope, GroupingRequest, GroupingResult};
use crate::utils::error::{Result, ShuffleError};
use reqwest::Client;
use std::time::Duration;

/// Client for the edge's `POST /api/shuffle`, as used by front ends.
///
/// Failures come back as errors carrying the best message available: the
/// upstream message for rejected requests, a generic one for transport
/// problems.
#[derive(Debug, Clone)]
pub struct ShuffleApiClient {
    client: Client,
    endpoint: String,
}

impl ShuffleApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/shuffle", base_url.trim_end_matches('/')),
        })
    }

    pub async fn shuffle(&self, request: &GroupingRequest) -> Result<GroupingResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ShuffleError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ShuffleError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let envelope = ErrorEnvelope::from_upstream_body(&body);
            return Err(ShuffleError::Upstream {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
