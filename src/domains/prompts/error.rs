//! Prompt-specific error types.

use thiserror::Error;

use crate::core::capability::HandlerError;

/// Errors raised while rendering a prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The template itself is malformed.
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl PromptError {
    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }
}

impl From<PromptError> for HandlerError {
    fn from(err: PromptError) -> Self {
        HandlerError::new(err.to_string())
    }
}
