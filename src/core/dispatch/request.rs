//! Transport-independent request shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DispatchError;

/// The protocol verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Discovery,
    Execute,
    Read,
    PromptGet,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Execute => "execute",
            Self::Read => "read",
            Self::PromptGet => "prompt-get",
        }
    }

    /// Parse a wire verb.
    pub fn parse(verb: &str) -> Result<Self, DispatchError> {
        match verb {
            "discovery" => Ok(Self::Discovery),
            "execute" => Ok(Self::Execute),
            "read" => Ok(Self::Read),
            "prompt-get" => Ok(Self::PromptGet),
            other => Err(DispatchError::UnknownVerb(other.to_string())),
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request, as decoded by a transport.
///
/// `verb` and `kind` stay strings so that unknown values surface as
/// bad-request envelopes rather than decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub verb: String,

    /// Optional kind filter for discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Capability name (execute, prompt-get) or concrete URI (read).
    #[serde(
        default,
        alias = "name",
        alias = "uri",
        alias = "tool_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_or_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
}

impl Request {
    /// A discovery request for every kind.
    pub fn discovery() -> Self {
        Self {
            verb: Verb::Discovery.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Execute a tool.
    pub fn execute(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            verb: Verb::Execute.as_str().to_string(),
            name_or_uri: Some(name.into()),
            arguments: Some(arguments),
            ..Default::default()
        }
    }

    /// Read a resource.
    pub fn read(uri: impl Into<String>) -> Self {
        Self {
            verb: Verb::Read.as_str().to_string(),
            name_or_uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// Render a prompt.
    pub fn prompt_get(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            verb: Verb::PromptGet.as_str().to_string(),
            name_or_uri: Some(name.into()),
            arguments: Some(arguments),
            ..Default::default()
        }
    }

    /// Restrict discovery to one kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}
