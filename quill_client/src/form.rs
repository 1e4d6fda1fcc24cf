use bon::Builder;
use quill::{CUSTOM_STYLE, ContentType, GenerationRequest, default_language};

use crate::error::ValidationError;

/// Raw text of every form field, exactly as the user entered it.
#[derive(Builder, Clone, Debug, Default)]
#[builder(on(String, into))]
pub struct FormState {
    #[builder(default)]
    pub topic: String,
    #[builder(default)]
    pub style: String,
    #[builder(default)]
    pub custom_style: String,
    #[builder(default)]
    pub content_type: String,
    #[builder(default)]
    pub language: String,
    #[builder(default)]
    pub length: String,
    #[builder(default)]
    pub author: String,
}

impl FormState {
    /// Validates the form and normalizes it into a request. The custom
    /// style is checked before the required fields.
    pub fn to_request(&self) -> Result<GenerationRequest, ValidationError> {
        let style = if self.style == CUSTOM_STYLE {
            let custom_style = self.custom_style.trim();
            if custom_style.is_empty() {
                return Err(ValidationError::MissingCustomStyle);
            }
            custom_style.to_string()
        } else {
            self.style.clone()
        };

        let topic = self.topic.trim();
        let content_type = match self.content_type.parse::<ContentType>() {
            Ok(content_type) if !topic.is_empty() && !style.is_empty() => content_type,
            _ => return Err(ValidationError::MissingRequiredFields),
        };

        let language = if self.language.is_empty() {
            default_language()
        } else {
            self.language.clone()
        };
        let author = Some(self.author.trim())
            .filter(|author| !author.is_empty())
            .map(str::to_string);

        Ok(GenerationRequest {
            topic: topic.to_string(),
            style,
            content_type,
            language,
            length: parse_length(&self.length),
            author,
        })
    }
}

/// Reads the leading decimal digits of the length field. Blank input, or
/// input that doesn't start with a digit, means no length. Lengths too large
/// to represent saturate at `u32::MAX`.
pub fn parse_length(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Labels and suggested bounds for the fields whose meaning depends on the
/// content type.
#[derive(Debug, PartialEq)]
pub struct FieldHints {
    pub length_label: &'static str,
    pub length_help: &'static str,
    pub length_placeholder: u32,
    pub length_min: u32,
    pub length_max: u32,
    pub length_step: u32,
    pub author_label: &'static str,
    pub author_help: &'static str,
}

impl FieldHints {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Poem => Self {
                length_label: "Number of Lines",
                length_help: "Recommended: 12-16 lines for poems",
                length_placeholder: 12,
                length_min: 4,
                length_max: 50,
                length_step: 1,
                author_label: "Poet Style",
                author_help: "Write in the style of this poet",
            },
            ContentType::Story => Self {
                length_label: "Number of Words",
                length_help: "Recommended: 150-200 words for stories",
                length_placeholder: 150,
                length_min: 50,
                length_max: 1000,
                length_step: 10,
                author_label: "Author Style",
                author_help: "Write in the style of this author",
            },
        }
    }
}
