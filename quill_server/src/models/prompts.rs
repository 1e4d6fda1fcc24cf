use quill::{ContentType, DEFAULT_LANGUAGE, GenerationRequest};
use std::fmt;

/// Instructions handed to the model for one generation request.
pub struct ContentPrompt<'a>(pub &'a GenerationRequest);

impl ContentPrompt<'_> {
    fn language_instruction(&self) -> String {
        let language = &self.0.language;
        if language == DEFAULT_LANGUAGE {
            String::new()
        } else {
            format!("Write in {language}")
        }
    }

    fn length_instruction(&self) -> String {
        match (self.0.length, self.0.content_type) {
            (Some(length), ContentType::Poem) if length > 0 => {
                format!("Make it approximately {length} lines long.")
            }
            (Some(length), ContentType::Story) if length > 0 => {
                format!("Make it approximately {length} words long.")
            }
            (_, ContentType::Poem) => "Make it approximately 12-16 lines long.".to_string(),
            (_, ContentType::Story) => "Make it approximately 150-200 words long.".to_string(),
        }
    }

    fn author_instruction(&self) -> String {
        match &self.0.author {
            Some(author) if !author.is_empty() => format!("Write in the style of {author}."),
            _ => String::new(),
        }
    }
}

impl fmt::Display for ContentPrompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let GenerationRequest {
            topic,
            style,
            content_type,
            ..
        } = self.0;
        let opening = match content_type {
            ContentType::Poem => format!("Write a {style} poem about {topic}."),
            ContentType::Story => format!("Write a {style} short story about {topic}."),
        };
        let opening = format!("{} {opening}", self.language_instruction());
        let body = match content_type {
            ContentType::Poem => {
                format!("Use vivid imagery and appropriate tone for the {style} style.")
            }
            ContentType::Story => format!(
                "Include interesting characters and a clear beginning, middle, and end.\n\
                Use appropriate tone for the {style} style."
            ),
        };
        let lines = [
            opening.trim().to_string(),
            self.length_instruction(),
            body,
            self.author_instruction(),
            "Make it engaging and creative.".to_string(),
        ];
        let repr = lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{repr}")
    }
}
