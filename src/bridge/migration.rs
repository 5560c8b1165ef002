//! Moving the local collection to the server after sign-in.
//!
//! The server asks for migration by naming an event in the trigger header
//! of a successful response. The bridge then POSTs the whole collection as
//! a JSON array and clears local storage on any 2xx reply. There is no
//! retry; on failure the local data stays for a later attempt.

use std::fmt;

use serde_json::Value;

/// Response header the server uses to fire client events.
pub const TRIGGER_HEADER: &str = "HX-Trigger";

/// Error type for migration transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// The collection could not be serialized.
    Encode(String),
    /// The request did not complete.
    Transport(String),
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationError::Encode(msg) => write!(f, "migration encode failed: {}", msg),
            MigrationError::Transport(msg) => write!(f, "migration request failed: {}", msg),
        }
    }
}

impl std::error::Error for MigrationError {}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        MigrationError::Encode(err.to_string())
    }
}

/// Sends the serialized collection to the server.
#[allow(async_fn_in_trait)]
pub trait MigrationTransport {
    /// POST `body` (a JSON array) to `endpoint` and return the status code.
    async fn submit(&self, endpoint: &str, body: String) -> Result<u16, MigrationError>;
}

/// Result of one migration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Nothing stored locally; no request sent.
    Skipped,
    /// Server accepted `count` options; local storage was cleared.
    Synced { count: usize },
    /// Server answered with a non-2xx status; local data kept.
    Rejected { status: u16 },
    /// Request could not be made; local data kept.
    Failed(MigrationError),
}

/// Summary of a completed request, as far as migration cares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseInfo {
    pub successful: bool,
    /// Raw value of the trigger header, if present.
    pub trigger: Option<String>,
}

impl ResponseInfo {
    pub fn new(successful: bool) -> Self {
        Self {
            successful,
            trigger: None,
        }
    }

    pub fn trigger(mut self, value: impl Into<String>) -> Self {
        self.trigger = Some(value.into());
        self
    }
}

/// True if the trigger header value names `event`.
///
/// Accepts the JSON object form (`{"syncLocalStorage": true}`) and the
/// plain comma-separated form (`a, syncLocalStorage`). In the object form
/// the event only fires when its value is truthy.
pub fn sync_requested(header: &str, event: &str) -> bool {
    let header = header.trim();
    if header.starts_with('{') {
        return match serde_json::from_str::<Value>(header) {
            Ok(Value::Object(triggers)) => triggers.get(event).is_some_and(is_truthy),
            _ => false,
        };
    }
    header.split(',').any(|name| name.trim() == event)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `reqwest`-backed transport.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpMigrationClient {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpMigrationClient {
    /// `base_url` is prefixed to the endpoint path, e.g. `https://example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (cookies, timeouts, ...).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl MigrationTransport for HttpMigrationClient {
    async fn submit(&self, endpoint: &str, body: String) -> Result<u16, MigrationError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| MigrationError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}
