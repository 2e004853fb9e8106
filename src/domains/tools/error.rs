//! Tool-specific error types.

use thiserror::Error;

use crate::core::capability::HandlerError;

/// Errors raised by tool bodies.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The recipient is not an email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl ToolError {
    pub fn invalid_email(reason: impl Into<String>) -> Self {
        Self::InvalidEmail(reason.into())
    }
}

impl From<ToolError> for HandlerError {
    fn from(err: ToolError) -> Self {
        HandlerError::new(err.to_string())
    }
}
