//! Replayable request values.
//!
//! A failed call is replayed from its `ApiRequest`, not from the original
//! `reqwest` builder (which is consumed by sending). The retry marker is
//! part of the value: tagging produces a new request instead of mutating
//! shared state, so a request can never be replayed more than once no
//! matter how many code paths see it.

use reqwest::Method;

/// An outbound API call: method, path relative to the API base, and an
/// optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    fn new(method: Method, path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            retried: false,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether this request has already been through the automatic retry.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// The retry-tagged copy of this request.
    pub fn into_retry(self) -> Self {
        Self {
            retried: true,
            ..self
        }
    }
}
