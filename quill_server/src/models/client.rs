use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum ModelClientError {
    MissingApiKey,
    ApiConnection(String),
    ApiStatus(String),
    ResponseJson(String),
    /// The model answered without any text. Its message leads with the
    /// status code it's reported under.
    EmptyResponse,
}

impl fmt::Display for ModelClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key not configured"),
            Self::ApiConnection(details) => {
                write!(f, "failed to connect to the generation API: {details}")
            }
            Self::ApiStatus(details) => {
                write!(f, "generation API responded with an error: {details}")
            }
            Self::ResponseJson(details) => {
                write!(f, "unable to parse the generation API response: {details}")
            }
            Self::EmptyResponse => write!(f, "500: Failed to generate content"),
        }
    }
}

impl std::error::Error for ModelClientError {}

#[derive(Debug, Deserialize, Serialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Body of a `generateContent` call.
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl From<String> for GenerateContentRequest {
    fn from(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its parts joined.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
