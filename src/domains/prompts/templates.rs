//! Prompt templates and their renderer.
//!
//! Syntax:
//! - `{{variable}}` is replaced with the argument's text; unmatched
//!   placeholders (omitted optional arguments) render as nothing;
//! - `{{#if variable}}…{{/if}}` keeps its body only when the argument is set
//!   and non-empty, with an optional `{{else}}` branch.
//!
//! Substituted values are never re-scanned, so argument text containing
//! braces comes through untouched. Single braces are plain text.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::PromptError;
use crate::core::capability::{
    Arguments, CapabilityDescriptor, Handler, HandlerResult, ParameterSpec, PrimitiveType,
};

const IF_OPEN: &str = "{{#if ";
const ELSE: &str = "{{else}}";
const IF_CLOSE: &str = "{{/if}}";

/// A prompt template bound to its declared parameters.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    pub template: String,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        parameters: Vec<ParameterSpec>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            parameters,
            template: template.into(),
        }
    }

    /// Render with argument values already converted to text.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, PromptError> {
        let expanded = expand_conditionals(&self.template, values)?;
        Ok(substitute(&expanded, values))
    }

    /// Register this template as a prompt capability.
    pub fn into_descriptor(self) -> CapabilityDescriptor {
        let name = self.name.clone();
        let parameters = self.parameters.clone();
        let description = self.description.clone();

        let descriptor = CapabilityDescriptor::prompt(name, parameters, Arc::new(self));
        match description {
            Some(description) => descriptor.with_description(description),
            None => descriptor,
        }
    }
}

#[async_trait]
impl Handler for PromptTemplate {
    async fn call(&self, arguments: Arguments) -> HandlerResult {
        let text = self.render(&arguments.to_text_map())?;
        Ok(Value::String(text))
    }
}

fn expand_conditionals(
    text: &str,
    values: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(IF_OPEN) {
        out.push_str(&rest[..start]);

        let after = &rest[start + IF_OPEN.len()..];
        let close = after
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let variable = after[..close].trim();

        let body = &after[close + 2..];
        let end = body
            .find(IF_CLOSE)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;
        let block = &body[..end];
        let (then, otherwise) = block.split_once(ELSE).unwrap_or((block, ""));

        let is_set = values.get(variable).is_some_and(|v| !v.is_empty());
        out.push_str(if is_set { then } else { otherwise });

        rest = &body[end + IF_CLOSE.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

fn substitute(text: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                if let Some(value) = values.get(after[..end].trim()) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn template(text: &str) -> PromptTemplate {
        PromptTemplate::new("test", None, vec![], text)
    }

    #[test]
    fn test_simple_substitution() {
        let rendered = template("Hello, {{name}}!")
            .render(&values(&[("name", "World")]))
            .unwrap();
        assert_eq!(rendered, "Hello, World!");
    }

    #[test]
    fn test_unmatched_placeholder_removed() {
        let rendered = template("Hello{{ name }}!").render(&HashMap::new()).unwrap();
        assert_eq!(rendered, "Hello!");
    }

    #[test]
    fn test_single_braces_and_values_are_literal() {
        let rendered = template("Hi {new_hire_name}, {{note}}")
            .render(&values(&[("note", "{{name}}")]))
            .unwrap();
        assert_eq!(rendered, "Hi {new_hire_name}, {{name}}");
    }

    #[test]
    fn test_conditional() {
        let t = template("Hello, {{#if name}}{{name}}{{else}}stranger{{/if}}!");
        assert_eq!(t.render(&values(&[("name", "Ada")])).unwrap(), "Hello, Ada!");
        assert_eq!(t.render(&HashMap::new()).unwrap(), "Hello, stranger!");
        assert_eq!(t.render(&values(&[("name", "")])).unwrap(), "Hello, stranger!");
    }

    #[test]
    fn test_unclosed_conditional() {
        let err = template("{{#if name}}dangling").render(&HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("{{/if}}"));
    }

    #[tokio::test]
    async fn test_template_as_handler() {
        let descriptor = PromptTemplate::new(
            "status",
            Some("Status line".to_string()),
            vec![
                ParameterSpec::required("progress", PrimitiveType::Integer)
                    .with_description("Percent complete"),
            ],
            "{{progress}}% complete",
        )
        .into_descriptor();

        assert_eq!(descriptor.description(), Some("Status line"));
        let mut arguments = Arguments::new();
        arguments.push("progress", json!(40));
        let rendered = descriptor.handler().call(arguments).await.unwrap();
        assert_eq!(rendered, json!("40% complete"));
    }
}
