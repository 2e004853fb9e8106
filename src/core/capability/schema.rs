//! Parameter schema: declared inputs of tools and prompts.
//!
//! A [`ParameterSpec`] list serves two purposes. It is projected into
//! discovery output and MCP input schemas, and it validates caller arguments
//! before a handler runs. Validation is strict: unknown keys are rejected and
//! values are never coerced between strings and numbers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::error::ValidationError;
use super::handler::Arguments;

/// The primitive JSON types a parameter may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveType {
    /// The JSON Schema name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether `value` is acceptable for this type.
    ///
    /// Integers widen to `number`; nothing else is coerced.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Number, Value::Number(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name, unique within its capability.
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub ty: PrimitiveType,

    /// Whether callers must supply this parameter.
    pub required: bool,

    /// Optional description shown in discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Declare a required parameter.
    pub fn required(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            description: None,
        }
    }

    /// Declare an optional parameter.
    pub fn optional(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The JSON type name of a value, as reported in type mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate caller arguments and bind them in declared order.
///
/// Declared parameters are checked first, in declaration order, then any
/// leftover keys are reported as unknown. The first failure wins.
pub fn validate(
    params: &[ParameterSpec],
    args: &Map<String, Value>,
) -> Result<Arguments, ValidationError> {
    let mut bound = Arguments::new();

    for spec in params {
        match args.get(&spec.name) {
            None if spec.required => {
                return Err(ValidationError::MissingRequired(spec.name.clone()));
            }
            None => {}
            Some(value) if !spec.ty.accepts(value) => {
                return Err(ValidationError::TypeMismatch {
                    name: spec.name.clone(),
                    expected: spec.ty.as_str(),
                    actual: json_type_name(value),
                });
            }
            Some(value) => bound.push(spec.name.clone(), value.clone()),
        }
    }

    if let Some(unknown) = args
        .keys()
        .find(|key| !params.iter().any(|spec| &spec.name == *key))
    {
        return Err(ValidationError::UnknownArgument(unknown.clone()));
    }

    Ok(bound)
}

/// Project a parameter list into a JSON Schema object.
pub fn input_schema(params: &[ParameterSpec]) -> Map<String, Value> {
    let mut properties = Map::new();
    for spec in params {
        let mut property = json!({ "type": spec.ty.as_str() });
        if let Some(description) = &spec.description {
            property["description"] = Value::String(description.clone());
        }
        properties.insert(spec.name.clone(), property);
    }

    let required: Vec<Value> = params
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| Value::String(spec.name.clone()))
        .collect();

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), Value::Array(required));
    schema.insert("additionalProperties".to_string(), json!(false));
    schema
}
