use axum::{http::StatusCode, response::Json};
use quill::ErrorBody;
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, fmt};

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn default_server_binding_addr() -> String {
    let port = dotenvy::var("PORT").unwrap_or("8000".into());
    format!("0.0.0.0:{port}")
}

pub fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

pub fn default_generation_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub fn default_api_key() -> Option<String> {
    dotenvy::var("GEMINI_API_KEY")
        .ok()
        .filter(|api_key| !api_key.is_empty())
}

/// Substitutes `${VAR}` references with environment variables. Values that
/// are empty or still reference unset variables afterwards count as unset.
pub fn deserialize_with_envsubst<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    // envsubst refuses variables that contain its own delimiters.
    let variables: HashMap<String, String> = std::env::vars()
        .filter(|(key, value)| {
            ![key, value]
                .iter()
                .any(|s| s.contains("${") || s.contains('}'))
        })
        .collect();
    let value = envsubst::substitute(raw, &variables).map_err(serde::de::Error::custom)?;
    if value.is_empty() || value.contains("${") {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Map a message into an error response with the given status.
pub fn detail_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody::message(message)))
}

/// Map any error into a `500 Internal Server Error` response.
pub fn internal_error<E>(err: E) -> ApiError
where
    E: fmt::Display,
{
    detail_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
