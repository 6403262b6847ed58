use async_trait::async_trait;
use contact_schema::{ContactRequest, ContactResponse};
use reqwest::Client;
use thiserror::Error;

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body (status {status}): {source}")]
    Body {
        status: u16,
        source: serde_json::Error,
    },
}

/// A decoded handler response, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: ContactResponse,
}

impl Reply {
    /// A 2xx status that also reports `success: true`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.success
    }
}

/// How a form reaches the contact handler.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<Reply, TransportError>;
}

/// Posts the form as JSON to `<base_url>/api/contact`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{CONTACT_PATH}", base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn submit(&self, request: &ContactRequest) -> Result<Reply, TransportError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes)
            .map_err(|source| TransportError::Body { status, source })?;

        Ok(Reply { status, body })
    }
}
