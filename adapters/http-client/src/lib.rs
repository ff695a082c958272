//! http-client — reqwest-backed transport for the shortening service.
//!
//! Purpose
//! - Implement the domain `Transport` port over real HTTP.
//! - Resolve the fixed service paths (`/api/`, `/api/status`) against a
//!   configured origin.
//!
//! Notes
//! - Status codes are passed through untouched; interpreting them is the
//!   domain's business (and the shortening flow deliberately does not).
//! - No timeout, retry or cancellation is applied to requests.

use domain::{CoreError, HttpReply, Transport};
use http_common::{has_http_scheme, join_endpoint, status_text, CONTENT_TYPE_JSON};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid service origin: {0}")]
    InvalidEndpoint(String),
    #[error("request to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<TransportError> for CoreError {
    fn from(e: TransportError) -> Self {
        CoreError::Request(e.to_string())
    }
}

/// HTTP transport bound to one service origin.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: String,
}

impl ReqwestTransport {
    /// Build a transport for `origin` (e.g. `http://localhost:8080`).
    pub fn new<S: Into<String>>(origin: S) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), origin)
    }

    /// Build a transport reusing an existing `reqwest::Client`.
    pub fn with_client<S: Into<String>>(
        client: reqwest::Client,
        origin: S,
    ) -> Result<Self, TransportError> {
        let origin = origin.into();
        if !has_http_scheme(&origin) {
            return Err(TransportError::InvalidEndpoint(origin));
        }
        Ok(Self { client, origin })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Full URL for a service path.
    pub fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.origin, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpReply, TransportError> {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");

        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            trace!(body_len = body.len(), "attaching json body");
            req = req.header(CONTENT_TYPE, CONTENT_TYPE_JSON).body(body);
        }

        let resp = req.send().await.map_err(|source| TransportError::Connect {
            url: url.clone(),
            source,
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|source| TransportError::Body { url, source })?;

        debug!(status, body_len = body.len(), "response received");
        Ok(HttpReply {
            status,
            status_text: status_text(status),
            body,
        })
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<HttpReply, CoreError> {
        Ok(self.send(Method::POST, path, Some(body)).await?)
    }

    async fn get(&self, path: &str) -> Result<HttpReply, CoreError> {
        Ok(self.send(Method::GET, path, None).await?)
    }
}
