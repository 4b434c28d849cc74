use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::model::SubmissionEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Network response was not ok (status {0})")]
    Status(u16),
}

/// Delivers a submission envelope to the mail endpoint
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, envelope: &SubmissionEnvelope) -> Result<(), TransportError>;
}

/// JSON POST to a fixed endpoint URL; any non-2xx status is a failure
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        HttpTransport {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn send(&self, envelope: &SubmissionEnvelope) -> Result<(), TransportError> {
        debug!(endpoint = %self.endpoint, kind = %envelope.kind(), "Posting submission");

        let response = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await
            .map_err(|e| {
                error!("Email Error: {}", e);
                TransportError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            error!("Email Error: endpoint answered {}", response.status());
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
