//! Controller API client.

use std::time::Duration;

use oc_peer_registry::{ErrorBody, HealthBody, JoinRequest, PeerRecord};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when talking to the controller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Controller returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Client for one controller.
pub struct RegistryClient {
    client: Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client for the controller at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register (or refresh) a node and return the roster.
    pub async fn join(&self, request: &JoinRequest) -> Result<Vec<PeerRecord>, ClientError> {
        debug!(node_id = %request.node_id, udp_port = request.udp_port, "POST /join");
        let response = self
            .client
            .post(self.url("/join"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::decode(response).await
    }

    /// Fetch the current roster.
    pub async fn peers(&self) -> Result<Vec<PeerRecord>, ClientError> {
        let response = self
            .client
            .get(self.url("/peers"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<HealthBody, ClientError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn connection_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connection(format!("Cannot connect to {}", self.base_url))
        } else {
            ClientError::Http(e)
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                message: error_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// Render a non-2xx body, preferring the controller's JSON error shape.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(reply) => format!("{} ({})", reply.detail, reply.error),
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
