pub mod client;
pub mod error;
pub mod form;
pub mod surface;

pub use client::{ClientState, GenerationClient, Outcome};
pub use error::{GenerationError, ValidationError};
pub use form::FormState;
pub use surface::{Surface, TerminalSurface};
