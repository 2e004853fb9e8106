//! Handler trait and the bound arguments handlers receive.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use super::error::HandlerError;

/// Result of invoking a capability body.
pub type HandlerResult = Result<Value, HandlerError>;

/// The unit of logic bound to a capability.
///
/// The dispatcher only sees the outcome; logging or outbound calls made by a
/// handler are its own business.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Invoke the handler with validated arguments.
    async fn call(&self, arguments: Arguments) -> HandlerResult;
}

/// Adapter turning an async closure into a [`Handler`].
struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, arguments: Arguments) -> HandlerResult {
        (self.f)(arguments).await
    }
}

/// Wrap an async closure as a shared handler.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

/// Arguments bound for one invocation, in declared order.
///
/// Tools and prompts receive the validated subset of their parameter list;
/// omitted optional parameters are simply absent. Resources receive the
/// values captured from the URI template, bound by placeholder name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bound value.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.values.push((name.into(), value));
    }

    /// Look up a value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate over `(name, value)` pairs in bound order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A string argument, or an error naming it.
    pub fn str(&self, name: &str) -> Result<&str, HandlerError> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(name, "string"))
    }

    /// An integer argument, or an error naming it.
    pub fn i64(&self, name: &str) -> Result<i64, HandlerError> {
        self.get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| missing(name, "integer"))
    }

    /// A numeric argument (integers widen), or an error naming it.
    pub fn f64(&self, name: &str) -> Result<f64, HandlerError> {
        self.get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| missing(name, "number"))
    }

    /// Render every value as text, for template substitution.
    ///
    /// Strings are used as-is; other values use their JSON representation.
    pub fn to_text_map(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn missing(name: &str, expected: &str) -> HandlerError {
    HandlerError::new(format!("Argument '{}' is not a bound {}", name, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let args: Arguments = vec![
            ("name".to_string(), json!("Q4 Launch")),
            ("progress".to_string(), json!(75)),
            ("ratio".to_string(), json!(0.5)),
            ("done".to_string(), json!(false)),
        ]
        .into_iter()
        .collect();

        assert_eq!(args.str("name").unwrap(), "Q4 Launch");
        assert_eq!(args.i64("progress").unwrap(), 75);
        assert_eq!(args.f64("progress").unwrap(), 75.0);
        assert_eq!(args.f64("ratio").unwrap(), 0.5);
        assert!(args.i64("done").is_err());
        assert!(args.str("progress").is_err());
        assert!(args.str("absent").is_err());
    }

    #[test]
    fn test_text_map_unquotes_strings() {
        let mut args = Arguments::new();
        args.push("project_name", json!("Apollo"));
        args.push("progress", json!(40));

        let map = args.to_text_map();
        assert_eq!(map["project_name"], "Apollo");
        assert_eq!(map["progress"], "40");
    }

    #[tokio::test]
    async fn test_handler_fn_invokes_closure() {
        let handler = handler_fn(|args: Arguments| async move {
            args.str("msg").map(|msg| json!({ "echo": msg }))
        });

        let mut args = Arguments::new();
        args.push("msg", json!("hello"));

        let result = handler.call(args).await.unwrap();
        assert_eq!(result, json!({ "echo": "hello" }));
    }
}
