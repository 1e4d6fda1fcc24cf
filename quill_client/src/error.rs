use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const API_KEY_MESSAGE: &str = "API key not configured. Please check your Gemini API key.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const SERVER_MESSAGE: &str = "Server error. Please try again in a moment.";
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const UNPROCESSABLE_MESSAGE: &str = "Validation error. Please check your input values.";

/// Problems with the form that are caught before anything is sent.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a custom style")]
    MissingCustomStyle,
    #[error("Please fill in all required fields")]
    MissingRequiredFields,
}

/// Failures of a single generation exchange.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Protocol { status: StatusCode, message: String },
    /// The request never got a response.
    #[error("network request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Unexpected(String),
}

impl GenerationError {
    /// Builds a protocol error from a failed response's status and body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<Value>(body) {
            Ok(value) => protocol_message(status, &value),
            Err(err) => {
                warn!("error response body isn't JSON: {err}");
                status_message(status)
            }
        };
        Self::Protocol { status, message }
    }

    /// Message fit for showing to a user.
    pub fn friendly_message(&self) -> String {
        match self {
            Self::Transport(_) => NETWORK_MESSAGE.to_string(),
            _ => refine(&self.to_string()),
        }
    }
}

fn status_message(status: StatusCode) -> String {
    format!("HTTP {}", status.as_u16())
}

/// Pulls a message out of an error body's `detail` field. Validation
/// failures (`422`) may carry a list of issues whose messages are joined.
/// Bodies that aren't JSON objects only tell the status.
pub fn protocol_message(status: StatusCode, body: &Value) -> String {
    if !body.is_object() {
        return status_message(status);
    }
    let detail = body.get("detail").filter(|detail| is_truthy(detail));
    let unprocessable = status == StatusCode::UNPROCESSABLE_ENTITY;
    match detail {
        Some(Value::Array(issues)) if unprocessable => issues
            .iter()
            .map(|issue| issue.get("msg").map(detail_text).unwrap_or_default())
            .collect::<Vec<String>>()
            .join(", "),
        Some(detail) => detail_text(detail),
        None if unprocessable => UNPROCESSABLE_MESSAGE.to_string(),
        None => status_message(status),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Swaps well-known raw error texts for friendlier ones.
pub fn refine(raw: &str) -> String {
    if raw.contains("API key") {
        API_KEY_MESSAGE.to_string()
    } else if raw.contains("network") || raw.contains("fetch") {
        NETWORK_MESSAGE.to_string()
    } else if raw.contains("500") {
        SERVER_MESSAGE.to_string()
    } else if raw.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        raw.to_string()
    }
}
