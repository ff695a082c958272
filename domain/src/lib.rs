//! Domain library for the URL Shortener client.
//!
//! This crate holds the domain types, ports (traits), error definitions and the
//! two services built on them: the shortening client and the status checker.
//! Network and terminal concerns live in adapters and apps; keep them out of
//! this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

use serde::{Deserialize, Serialize};

/// Message rendered when a candidate fails validation.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input link has wrong format";

/// Message rendered when the shortening request fails for any reason.
pub const REQUEST_ERROR_MESSAGE: &str = "Failed!";

/// Body of a shortening request: `{"url": "<candidate>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShortenRequest {
    pub url: String,
}

impl ShortenRequest {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::Request(e.to_string()))
    }
}

/// Body of a successful shortening reply. Only `short` is read; the service
/// may send other fields.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ShortenResponse {
    pub short: String,
}

impl ShortenResponse {
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        serde_json::from_str(body).map_err(|e| CoreError::Request(format!("invalid response: {}", e)))
    }
}

/// The single piece of user-visible output of the shortening widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Idle,
    /// The composed `<base>/s/<short>` link.
    ComposedLink(String),
    ValidationError,
    RequestError,
}

impl DisplayState {
    /// Text rendered into the output element.
    pub fn text(&self) -> &str {
        match self {
            DisplayState::Idle => "",
            DisplayState::ComposedLink(link) => link,
            DisplayState::ValidationError => VALIDATION_ERROR_MESSAGE,
            DisplayState::RequestError => REQUEST_ERROR_MESSAGE,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::ValidationError | DisplayState::RequestError)
    }
}

impl Display for DisplayState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Raw reply from the service as seen by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    /// Reply with the canonical reason phrase for `status`.
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            status_text: http_common::status_text(status),
            body: body.into(),
        }
    }
}

/// Explicit client configuration, passed in at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL used to compose displayed links. Never sent to the service.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Transport port: issues one HTTP request against the shortening service and
/// resolves with whatever reply arrived. Status codes are not interpreted.
pub trait Transport: Send + Sync {
    /// `POST <path>` with `Content-Type: application/json` and `body`.
    fn post_json(
        &self,
        path: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpReply, CoreError>> + Send;

    /// `GET <path>`.
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpReply, CoreError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn post_json(
        &self,
        path: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpReply, CoreError>> + Send {
        (**self).post_json(path, body)
    }

    fn get(&self, path: &str) -> impl Future<Output = Result<HttpReply, CoreError>> + Send {
        (**self).get(path)
    }
}

/// Output element port. Every render fully replaces what was shown before.
pub trait DisplaySink: Send + Sync {
    fn show(&self, text: &str);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &T {
    fn show(&self, text: &str) {
        (**self).show(text)
    }
}

/// Core domain errors (no external error crates to keep the domain lean).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The candidate is not a well-formed absolute URL.
    Validation,
    /// Anything between sending the request and parsing the reply failed.
    Request(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Validation => write!(f, "invalid url: {}", VALIDATION_ERROR_MESSAGE),
            CoreError::Request(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

impl Error for CoreError {}

pub mod adapters;
pub mod service;
pub mod status;
pub mod validate;
