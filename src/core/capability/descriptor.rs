//! Capability descriptors: the immutable record behind every tool, resource
//! and prompt.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ConfigurationError;
use super::handler::Handler;
use super::schema::ParameterSpec;
use super::template::UriTemplate;

/// The three kinds of capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Tool,
    Resource,
    Prompt,
}

impl CapabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Resource => "resource",
            Self::Prompt => "prompt",
        }
    }

    /// Parse a wire name (`tool`, `resource`, `prompt`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "tool" => Some(Self::Tool),
            "resource" => Some(Self::Resource),
            "prompt" => Some(Self::Prompt),
            _ => None,
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How callers address a capability's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Named, typed parameters (tools and prompts).
    Parameters(Vec<ParameterSpec>),

    /// A URI template plus the input names its handler expects (resources).
    Template {
        uri_template: String,
        inputs: Vec<String>,
    },
}

/// One registered tool, resource or prompt.
#[derive(Clone)]
pub struct CapabilityDescriptor {
    name: String,
    kind: CapabilityKind,
    description: Option<String>,
    mime_type: Option<String>,
    signature: Signature,
    handler: Arc<dyn Handler>,
}

impl CapabilityDescriptor {
    /// Describe a tool.
    pub fn tool(
        name: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self::with_parameters(CapabilityKind::Tool, name, parameters, handler)
    }

    /// Describe a prompt.
    pub fn prompt(
        name: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self::with_parameters(CapabilityKind::Prompt, name, parameters, handler)
    }

    /// Describe a resource served at `uri_template`.
    ///
    /// `inputs` names the values the handler reads; they must be exactly the
    /// template's placeholders.
    pub fn resource(
        name: impl Into<String>,
        uri_template: impl Into<String>,
        inputs: &[&str],
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: CapabilityKind::Resource,
            description: None,
            mime_type: None,
            signature: Signature::Template {
                uri_template: uri_template.into(),
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
            },
            handler,
        }
    }

    fn with_parameters(
        kind: CapabilityKind,
        name: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            mime_type: None,
            signature: Signature::Parameters(parameters),
            handler,
        }
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the MIME type advertised for a resource.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Declared parameters; empty for resources.
    pub fn parameters(&self) -> &[ParameterSpec] {
        match &self.signature {
            Signature::Parameters(params) => params.as_slice(),
            Signature::Template { .. } => &[],
        }
    }

    /// The raw URI template, for resources.
    pub fn uri_template(&self) -> Option<&str> {
        match &self.signature {
            Signature::Template { uri_template, .. } => Some(uri_template.as_str()),
            Signature::Parameters(_) => None,
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Check the descriptor's internal invariants.
    ///
    /// Returns the parsed template for resources.
    pub fn validate(&self) -> Result<Option<UriTemplate>, ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::invalid_descriptor(
                &self.name,
                "name is empty",
            ));
        }

        match &self.signature {
            Signature::Parameters(params) => {
                for (index, spec) in params.iter().enumerate() {
                    if spec.name.is_empty() {
                        return Err(ConfigurationError::invalid_descriptor(
                            &self.name,
                            format!("parameter #{} has an empty name", index),
                        ));
                    }
                    if params[..index].iter().any(|other| other.name == spec.name) {
                        return Err(ConfigurationError::invalid_descriptor(
                            &self.name,
                            format!("parameter '{}' is declared twice", spec.name),
                        ));
                    }
                }
                Ok(None)
            }
            Signature::Template {
                uri_template,
                inputs,
            } => {
                let template = UriTemplate::parse(uri_template)?;

                let mut placeholders: Vec<String> =
                    template.placeholders().map(str::to_string).collect();
                let mut expected = inputs.clone();
                placeholders.sort();
                expected.sort();

                if placeholders != expected {
                    return Err(ConfigurationError::PlaceholderMismatch {
                        capability: self.name.clone(),
                        placeholders,
                        inputs: expected,
                    });
                }
                Ok(Some(template))
            }
        }
    }

    /// Side-effect-free projection used by discovery.
    pub fn describe(&self) -> DescriptorView {
        let (parameters, uri_template) = match &self.signature {
            Signature::Parameters(params) => (Some(params.clone()), None),
            Signature::Template { uri_template, .. } => (None, Some(uri_template.clone())),
        };

        DescriptorView {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            parameters,
            uri_template,
            mime_type: self.mime_type.clone(),
        }
    }
}

impl std::fmt::Debug for CapabilityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Discovery view of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorView {
    pub name: String,
    pub kind: CapabilityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::handler::{Arguments, handler_fn};
    use crate::core::capability::schema::PrimitiveType;
    use serde_json::{Value, json};

    fn noop() -> Arc<dyn Handler> {
        handler_fn(|_args: Arguments| async { Ok(Value::Null) })
    }

    #[test]
    fn test_describe_tool() {
        let descriptor = CapabilityDescriptor::tool(
            "get_weather",
            vec![ParameterSpec::required("location", PrimitiveType::String)],
            noop(),
        )
        .with_description("Gets the current weather for a specified location.");

        let view = serde_json::to_value(descriptor.describe()).unwrap();
        assert_eq!(
            view,
            json!({
                "name": "get_weather",
                "kind": "tool",
                "description": "Gets the current weather for a specified location.",
                "parameters": [{ "name": "location", "type": "string", "required": true }]
            })
        );
    }

    #[test]
    fn test_describe_resource_has_template_not_parameters() {
        let descriptor = CapabilityDescriptor::resource(
            "get_employee_details",
            "corporate://employees/{employee_id}",
            &["employee_id"],
            noop(),
        );

        let view = descriptor.describe();
        assert_eq!(view.kind, CapabilityKind::Resource);
        assert!(view.parameters.is_none());
        assert_eq!(
            view.uri_template.as_deref(),
            Some("corporate://employees/{employee_id}")
        );
    }

    #[test]
    fn test_validate_duplicate_parameter() {
        let descriptor = CapabilityDescriptor::tool(
            "send_email",
            vec![
                ParameterSpec::required("recipient", PrimitiveType::String),
                ParameterSpec::required("recipient", PrimitiveType::String),
            ],
            noop(),
        );
        assert!(matches!(
            descriptor.validate(),
            Err(ConfigurationError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_validate_placeholder_mismatch() {
        let unbound_input = CapabilityDescriptor::resource(
            "employee",
            "corporate://employees/{employee_id}",
            &["employee_id", "department"],
            noop(),
        );
        assert!(matches!(
            unbound_input.validate(),
            Err(ConfigurationError::PlaceholderMismatch { .. })
        ));

        let unused_placeholder = CapabilityDescriptor::resource(
            "employee",
            "corporate://employees/{employee_id}",
            &[],
            noop(),
        );
        assert!(matches!(
            unused_placeholder.validate(),
            Err(ConfigurationError::PlaceholderMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_returns_parsed_template() {
        let descriptor = CapabilityDescriptor::resource(
            "company_holidays",
            "corporate://holidays/2025",
            &[],
            noop(),
        );
        let template = descriptor.validate().unwrap().unwrap();
        assert!(template.is_static());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(CapabilityKind::parse("tool"), Some(CapabilityKind::Tool));
        assert_eq!(CapabilityKind::parse("prompt"), Some(CapabilityKind::Prompt));
        assert_eq!(CapabilityKind::parse("Tool"), None);
    }
}
