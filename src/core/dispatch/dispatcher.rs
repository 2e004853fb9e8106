//! Request dispatcher.
//!
//! Every request goes through the same pipeline: resolve the target, check
//! the arguments against its declared parameters, invoke the handler, and
//! wrap whatever comes out in a [`Response`]. Failures at any stage end the
//! request with a tagged envelope; none of them affect the server.

use futures::FutureExt;
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::error::DispatchError;
use super::request::{Request, Verb};
use super::response::Response;
use crate::core::capability::{
    Arguments, CapabilityDescriptor, CapabilityKind, DescriptorView, HandlerError, RootRegistry,
    schema,
};

/// Routes requests against a composed [`RootRegistry`].
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<RootRegistry>,
}

impl Dispatcher {
    pub fn new(registry: RootRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry this dispatcher routes against.
    pub fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    /// Handle one request and always produce an envelope.
    #[instrument(skip(self, request), fields(verb = %request.verb))]
    pub async fn dispatch(&self, request: Request) -> Response {
        match self.route(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(status_class = ?err.status_class(), "Request failed: {}", err);
                Response::from(err)
            }
        }
    }

    async fn route(&self, request: Request) -> Result<Response, DispatchError> {
        let verb = Verb::parse(&request.verb)?;
        debug!(stage = "received", %verb);

        match verb {
            Verb::Discovery => {
                // An unrecognised kind filters everything out.
                let descriptors = match request.kind.as_deref() {
                    None => self.discover(None),
                    Some(kind) => match CapabilityKind::parse(kind) {
                        Some(kind) => self.discover(Some(kind)),
                        None => {
                            debug!("Unknown kind filter '{}'", kind);
                            Vec::new()
                        }
                    },
                };
                Ok(Response::Discovery { descriptors })
            }
            Verb::Execute => {
                let name = require_target(request.name_or_uri, verb)?;
                let result = self
                    .execute(&name, request.arguments.unwrap_or_default())
                    .await?;
                Ok(Response::Success { result })
            }
            Verb::Read => {
                let uri = require_target(request.name_or_uri, verb)?;
                let result = self.read(&uri).await?;
                Ok(Response::Success { result })
            }
            Verb::PromptGet => {
                let name = require_target(request.name_or_uri, verb)?;
                let result = self
                    .prompt_get(&name, request.arguments.unwrap_or_default())
                    .await?;
                Ok(Response::Success { result })
            }
        }
    }

    /// Describe registered capabilities in registration order.
    pub fn discover(&self, kind: Option<CapabilityKind>) -> Vec<DescriptorView> {
        self.registry.describe(kind)
    }

    /// Run a tool with caller-supplied arguments.
    pub async fn execute(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, DispatchError> {
        let descriptor = self
            .registry
            .lookup(CapabilityKind::Tool, name)
            .ok_or_else(|| DispatchError::not_found(CapabilityKind::Tool, name))?;
        debug!(stage = "resolved", tool = name);

        let bound = schema::validate(descriptor.parameters(), &arguments)?;
        debug!(stage = "validated", tool = name, arguments = bound.len());

        invoke(descriptor, bound).await
    }

    /// Read a resource by concrete URI.
    ///
    /// Arguments come only from the URI; the matched template's captures are
    /// the complete argument set.
    pub async fn read(&self, uri: &str) -> Result<Value, DispatchError> {
        let (descriptor, bound) = self
            .registry
            .resolve_uri(uri)
            .ok_or_else(|| DispatchError::not_found(CapabilityKind::Resource, uri))?;
        debug!(stage = "resolved", resource = descriptor.name(), uri);

        invoke(descriptor, bound).await
    }

    /// Render a prompt.
    pub async fn prompt_get(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, DispatchError> {
        let descriptor = self
            .registry
            .lookup(CapabilityKind::Prompt, name)
            .ok_or_else(|| DispatchError::not_found(CapabilityKind::Prompt, name))?;
        debug!(stage = "resolved", prompt = name);

        let bound = schema::validate(descriptor.parameters(), &arguments)?;
        debug!(stage = "validated", prompt = name, arguments = bound.len());

        invoke(descriptor, bound).await
    }
}

fn require_target(target: Option<String>, verb: Verb) -> Result<String, DispatchError> {
    target.ok_or_else(|| DispatchError::malformed(format!("'{verb}' requires name_or_uri")))
}

/// Call a handler, turning a panic into an ordinary handler failure.
async fn invoke(
    descriptor: &Arc<CapabilityDescriptor>,
    arguments: Arguments,
) -> Result<Value, DispatchError> {
    let handler = descriptor.handler().clone();
    debug!(stage = "invoked", capability = descriptor.name());

    match AssertUnwindSafe(handler.call(arguments)).catch_unwind().await {
        Ok(Ok(value)) => {
            debug!(stage = "completed", capability = descriptor.name());
            Ok(value)
        }
        Ok(Err(err)) => Err(DispatchError::Handler(err)),
        Err(_) => Err(DispatchError::Handler(HandlerError::new("handler panicked"))),
    }
}
