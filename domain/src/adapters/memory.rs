use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{CoreError, DisplaySink, HttpReply, Transport};

/// A request seen by [`MemoryTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<String>,
}

/// Scripted in-memory transport for tests. Replies are handed out in the order
/// they were pushed; every request is recorded, including ones that find the
/// script empty.
pub struct MemoryTransport {
    script: Mutex<VecDeque<Result<HttpReply, CoreError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: HttpReply) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(reply));
        }
    }

    pub fn push_error<S: Into<String>>(&self, message: S) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(CoreError::Request(message.into())));
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn respond(&self, call: RecordedCall) -> Result<HttpReply, CoreError> {
        self.calls
            .lock()
            .map_err(|_| CoreError::Request("mutex poisoned".into()))?
            .push(call);
        self.script
            .lock()
            .map_err(|_| CoreError::Request("mutex poisoned".into()))?
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::Request("no scripted reply".into())))
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<HttpReply, CoreError> {
        self.respond(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: Some(body),
        })
    }

    async fn get(&self, path: &str) -> Result<HttpReply, CoreError> {
        self.respond(RecordedCall {
            method: "GET",
            path: path.to_string(),
            body: None,
        })
    }
}

/// Display sink that remembers everything it was asked to show.
pub struct MemoryDisplay {
    shown: Mutex<Vec<String>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
        }
    }

    /// What the output element currently shows.
    pub fn last(&self) -> Option<String> {
        self.shown.lock().ok().and_then(|s| s.last().cloned())
    }

    pub fn history(&self) -> Vec<String> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for MemoryDisplay {
    fn show(&self, text: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(text.to_string());
        }
    }
}
