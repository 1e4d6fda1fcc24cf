use quill::GenerationResult;
use std::{
    io::{self, Write},
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// How long an error stays visible unless a new action replaces it.
pub const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Where generation progress, results, and errors are rendered.
pub trait Surface: Send + Sync {
    fn set_generating(&self, generating: bool);

    /// Clears any shown result or error ahead of a new generation.
    fn hide(&self);

    fn show_result(&self, result: &GenerationResult);

    fn show_error(&self, message: &str);
}

/// An error message that dismisses itself after a while.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < ERROR_DISMISS_AFTER
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn style_emoji(style: &str) -> &'static str {
    match style {
        "funny" => "😄",
        "scary" => "👻",
        "romantic" => "💕",
        "mysterious" => "🔍",
        "adventurous" => "⚡",
        "heartwarming" => "🌟",
        _ => "✨",
    }
}

/// Heading shown above generated content, e.g. "Your Poem".
pub fn title(result: &GenerationResult) -> String {
    format!("Your {}", capitalize(&result.content_type))
}

/// One-line summary of what was generated.
pub fn meta(result: &GenerationResult) -> String {
    format!(
        "{} {} {} about \"{}\"",
        style_emoji(&result.style),
        capitalize(&result.style),
        result.content_type,
        result.topic
    )
}

/// Renders to the terminal. Errors go to stderr and are remembered as a
/// [`Notice`] so the prompt can keep showing them until they expire.
#[derive(Default)]
pub struct TerminalSurface {
    notice: Mutex<Option<Notice>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current error message, if it hasn't been dismissed yet.
    pub fn visible_notice(&self) -> Option<String> {
        let mut notice = self.notice.lock().unwrap_or_else(PoisonError::into_inner);
        let visible = notice
            .as_ref()
            .filter(|current| current.is_visible(Instant::now()))
            .map(|current| current.message.clone());
        if visible.is_none() {
            *notice = None;
        }
        visible
    }
}

impl Surface for TerminalSurface {
    fn set_generating(&self, generating: bool) {
        if generating {
            print!("Generating...");
        } else {
            print!("\r{:13}\r", "");
        }
        let _ = io::stdout().flush();
    }

    fn hide(&self) {
        *self.notice.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn show_result(&self, result: &GenerationResult) {
        println!("\r{}", title(result));
        println!("{}\n", meta(result));
        println!("{}", result.content.trim_end());
    }

    fn show_error(&self, message: &str) {
        eprintln!("\rError: {message}");
        *self.notice.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Notice::new(message, Instant::now()));
    }
}
