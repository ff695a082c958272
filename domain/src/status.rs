//! Backend status probe: one `GET /api/status`, rendered as a status line.

use std::fmt::{Display, Formatter};

use tracing::{info, warn};

use http_common::STATUS_PATH;

use crate::{CoreError, DisplaySink, Transport};

/// Output of the status checker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusDisplay {
    Checking,
    /// Any reply, whatever its status code.
    Reported { status: u16, status_text: String },
    /// The request itself failed; carries the error message.
    Failed(String),
}

impl StatusDisplay {
    pub fn is_failed(&self) -> bool {
        matches!(self, StatusDisplay::Failed(_))
    }
}

impl Display for StatusDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusDisplay::Checking => f.write_str("Checking..."),
            StatusDisplay::Reported {
                status,
                status_text,
            } => write!(f, "Status: {}\nStatus Text: {}", status, status_text),
            StatusDisplay::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

pub struct StatusChecker<T: Transport, D: DisplaySink> {
    transport: T,
    display: D,
}

impl<T: Transport, D: DisplaySink> StatusChecker<T, D> {
    pub fn new(transport: T, display: D) -> Self {
        Self { transport, display }
    }

    /// Probe the backend and render the outcome. Never fails.
    pub async fn check(&self) -> StatusDisplay {
        self.render(&StatusDisplay::Checking);

        let state = match self.transport.get(STATUS_PATH).await {
            Ok(reply) => {
                info!(status = reply.status, status_text = %reply.status_text, "backend status");
                StatusDisplay::Reported {
                    status: reply.status,
                    status_text: reply.status_text,
                }
            }
            Err(e) => {
                warn!(error = %e, "backend status check failed");
                StatusDisplay::Failed(failure_message(e))
            }
        };

        self.render(&state);
        state
    }

    fn render(&self, state: &StatusDisplay) {
        self.display.show(&state.to_string());
    }
}

fn failure_message(e: CoreError) -> String {
    match e {
        CoreError::Request(msg) => msg,
        other => other.to_string(),
    }
}
