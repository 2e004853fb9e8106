//! Per-request dispatch errors.

use thiserror::Error;

use super::response::StatusClass;
use crate::core::capability::{CapabilityKind, HandlerError, ValidationError};

/// Everything that can make a single request fail.
///
/// None of these are fatal: the dispatcher turns each one into a failure
/// envelope and carries on serving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No capability answers to the requested name or URI.
    #[error("{kind} not found: {target}")]
    NotFound {
        kind: CapabilityKind,
        target: String,
    },

    /// The verb is not part of the protocol.
    #[error("Unknown verb '{0}'")]
    UnknownVerb(String),

    /// The request is missing a field its verb needs, or carries a bad one.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Arguments do not fit the declared parameters.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The capability body raised a failure.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// Create a "not found" error.
    pub fn not_found(kind: CapabilityKind, target: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            target: target.into(),
        }
    }

    /// Create a "malformed request" error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    /// The outward status class of this error.
    pub fn status_class(&self) -> StatusClass {
        match self {
            Self::NotFound { .. } => StatusClass::NotFound,
            Self::UnknownVerb(_) | Self::MalformedRequest(_) | Self::Validation(_) => {
                StatusClass::BadRequest
            }
            Self::Handler(_) => StatusClass::HandlerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(
            DispatchError::not_found(CapabilityKind::Tool, "x").status_class(),
            StatusClass::NotFound
        );
        assert_eq!(
            DispatchError::UnknownVerb("delete".into()).status_class(),
            StatusClass::BadRequest
        );
        assert_eq!(
            DispatchError::from(ValidationError::MissingRequired("recipient".into()))
                .status_class(),
            StatusClass::BadRequest
        );
        assert_eq!(
            DispatchError::from(HandlerError::new("boom")).status_class(),
            StatusClass::HandlerError
        );
    }

    #[test]
    fn test_handler_message_is_verbatim() {
        let err = DispatchError::from(HandlerError::new(
            "Invalid email address: recipient must contain '@' symbol.",
        ));
        assert_eq!(
            err.to_string(),
            "Invalid email address: recipient must contain '@' symbol."
        );
    }
}
