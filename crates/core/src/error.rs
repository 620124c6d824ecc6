//! Error types for the viraltube-core library.
//!
//! This module provides granular error variants for different failure modes,
//! and the mapping from each failure to the message shown next to the
//! submit control.

use thiserror::Error;

/// Shown when the prompt is empty or whitespace-only.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please describe your video content.";

/// Shown when the model answered but the payload did not match the schema.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse AI response. Please try again.";

/// Shown when a failure carries no usable message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Errors that can occur within the viraltube-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing keys, invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable was not found.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The form input was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The outbound call to the model provider failed (network, auth, quota).
    ///
    /// The message is the transport's own and is shown to the user as-is.
    #[error("{0}")]
    Transport(String),

    /// The model answered, but not with the expected structure.
    #[error("Response did not match expected structure: {0}")]
    Parse(String),

    /// The attachment could not be read or encoded.
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// The system clipboard could not be opened or written.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a parse error with the given detail.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates an attachment error with the given message.
    pub fn attachment(msg: impl Into<String>) -> Self {
        Self::Attachment(msg.into())
    }

    /// Creates a clipboard error with the given message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }

    /// The validation failure for an empty prompt.
    pub fn empty_prompt() -> Self {
        Self::Validation(EMPTY_PROMPT_MESSAGE.to_string())
    }

    /// Returns the message the form displays for this failure.
    ///
    /// Parse failures always read the same fixed text. Transport failures
    /// carry their own message, falling back to a generic one when blank.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) => PARSE_FAILURE_MESSAGE.to_string(),
            Self::Validation(msg) | Self::Transport(msg) if !msg.trim().is_empty() => msg.clone(),
            Self::Validation(_) | Self::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => {
                let msg = other.to_string();
                if msg.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    msg
                }
            }
        }
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_use_fixed_message() {
        let err = AppError::parse("missing field `titles`");
        assert_eq!(err.user_message(), PARSE_FAILURE_MESSAGE);
    }

    #[test]
    fn transport_failures_keep_their_message() {
        let err = AppError::transport("quota exceeded for project");
        assert_eq!(err.user_message(), "quota exceeded for project");
    }

    #[test]
    fn blank_transport_failure_falls_back_to_generic() {
        assert_eq!(AppError::transport("").user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(AppError::transport("  \n").user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn empty_prompt_message_is_fixed() {
        assert_eq!(AppError::empty_prompt().user_message(), EMPTY_PROMPT_MESSAGE);
    }

    #[test]
    fn other_errors_use_display_text() {
        let err = AppError::attachment("file is empty");
        assert_eq!(err.user_message(), "Attachment error: file is empty");
    }
}
