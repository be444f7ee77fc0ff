//! Request dispatch: the seam between the retry policy and the wire.
//!
//! The retry policy operates on `Dispatch`, not on `reqwest` directly, so
//! transport failures can be scripted in tests. `HttpDispatcher` is the
//! production implementation: bearer-token injection plus error
//! classification into transport failures vs. received responses.

use crate::client::request::ApiRequest;
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A failure where no usable HTTP response was received.
///
/// Distinct from an HTTP error status: only these failures are candidates
/// for the retry-with-wake-detection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request exceeded its deadline.
    Timeout,
    /// Connection, DNS, TLS, or protocol failure.
    Network(String),
}

impl From<TransportError> for crate::client::ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => crate::client::ApiError::Timeout,
            TransportError::Network(msg) => crate::client::ApiError::Network(msg),
        }
    }
}

/// A received HTTP response, however unhappy its status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best-effort human-readable message from an error body.
    ///
    /// The backend sends `{"message": "..."}` on errors; anything else
    /// falls back to the raw body.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| self.body.trim().to_string())
    }
}

/// Sends one `ApiRequest` and classifies the outcome.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Production dispatcher over `reqwest`.
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpDispatcher {
    pub fn new(base_url: &str, timeout: Duration, session: Arc<SessionStore>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn classify(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self.client.request(request.method().clone(), &url);

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Self::classify)?;
        let status = response.status().as_u16();
        // Losing the body mid-read is a transport failure too.
        let body = response.text().await.map_err(Self::classify)?;

        tracing::trace!(method = %request.method(), path = %request.path(), status, "API call");
        Ok(ApiResponse { status, body })
    }
}
