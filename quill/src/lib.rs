use bon::Builder;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Style value that means the real style comes from a separate free-text
/// field. It never goes over the wire.
pub const CUSTOM_STYLE: &str = "custom";

pub const DEFAULT_LANGUAGE: &str = "english";

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Poem,
    Story,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Poem => "poem",
            Self::Story => "story",
        };
        write!(f, "{repr}")
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownContentType(pub String);

impl fmt::Display for UnknownContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content type '{}'", self.0)
    }
}

impl std::error::Error for UnknownContentType {}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poem" => Ok(Self::Poem),
            "story" => Ok(Self::Story),
            other => Err(UnknownContentType(other.to_string())),
        }
    }
}

/// Body of `POST /generate`.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct GenerationRequest {
    /// What the piece is about.
    #[builder(into)]
    pub topic: String,
    /// Tone of the piece, e.g. "funny" or "scary".
    #[builder(into)]
    pub style: String,
    pub content_type: ContentType,
    /// Language to write in.
    #[builder(into, default = default_language())]
    #[serde(default = "default_language")]
    pub language: String,
    /// Approximate number of lines (poems) or words (stories).
    #[serde(default)]
    pub length: Option<u32>,
    /// Author or poet whose style to imitate.
    #[builder(into)]
    #[serde(default)]
    pub author: Option<String>,
}

/// Successful response of `POST /generate`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct GenerationResult {
    pub content: String,
    pub content_type: String,
    pub style: String,
    pub topic: String,
}

/// One entry of a `422` response's `detail` list.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct ValidationIssue {
    pub msg: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            detail: ErrorDetail::Message(message.into()),
        }
    }

    pub fn issues<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let issues = messages
            .into_iter()
            .map(|msg| ValidationIssue { msg: msg.into() })
            .collect();
        Self {
            detail: ErrorDetail::Issues(issues),
        }
    }
}
