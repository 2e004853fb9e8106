//! Error types raised while building and validating capabilities.

use thiserror::Error;

use super::descriptor::CapabilityKind;

/// Errors detected while building groups or composing the registry.
///
/// Every variant is a programming or deployment mistake: the server refuses
/// to start rather than serve a registry that contains one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two descriptors of the same kind and name were registered into one group.
    #[error("Duplicate {kind} '{name}' in group '{group}'")]
    DuplicateInGroup {
        group: String,
        kind: CapabilityKind,
        name: String,
    },

    /// Two groups declare the same tool or prompt.
    #[error("Duplicate {kind} '{name}' across groups '{first}' and '{second}'")]
    DuplicateAcrossGroups {
        kind: CapabilityKind,
        name: String,
        first: String,
        second: String,
    },

    /// A descriptor or one of its parameters is malformed.
    #[error("Invalid capability '{capability}': {reason}")]
    InvalidDescriptor { capability: String, reason: String },

    /// A URI template could not be parsed.
    #[error("Invalid URI template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The template placeholders and the handler inputs disagree.
    #[error(
        "Resource '{capability}' placeholders {placeholders:?} do not match handler inputs {inputs:?}"
    )]
    PlaceholderMismatch {
        capability: String,
        placeholders: Vec<String>,
        inputs: Vec<String>,
    },

    /// A resource template can never be reached because an earlier one covers it.
    #[error("URI template '{template}' is shadowed by earlier template '{shadowed_by}'")]
    ShadowedTemplate {
        template: String,
        shadowed_by: String,
    },

    /// The configuration names a group that does not exist.
    #[error("Unknown capability group: {0}")]
    UnknownGroup(String),
}

impl ConfigurationError {
    /// Create an "invalid descriptor" error.
    pub fn invalid_descriptor(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    /// Create an "invalid template" error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

/// Errors produced when caller arguments do not fit a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required parameter was not supplied.
    #[error("Missing required argument: {0}")]
    MissingRequired(String),

    /// A supplied value has the wrong JSON type.
    #[error("Invalid type for '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A supplied key does not name any declared parameter.
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

impl ValidationError {
    /// The name of the offending parameter.
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingRequired(name) | Self::UnknownArgument(name) => name,
            Self::TypeMismatch { name, .. } => name,
        }
    }
}

/// A failure raised inside a capability body.
///
/// The message is passed to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create a handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
