//! Capability model: parameter schemas, descriptors, groups and the root
//! registry they compose into.
//!
//! Groups are declared in isolation, merged once at startup by
//! [`RootRegistry::compose`], and only read afterwards, so the registry can be
//! shared across concurrent requests without locking.

pub mod descriptor;
pub mod error;
pub mod group;
pub mod handler;
pub mod registry;
pub mod schema;
pub mod template;

pub use descriptor::{CapabilityDescriptor, CapabilityKind, DescriptorView, Signature};
pub use error::{ConfigurationError, HandlerError, ValidationError};
pub use group::CapabilityGroup;
pub use handler::{Arguments, Handler, HandlerResult, handler_fn};
pub use registry::RootRegistry;
pub use schema::{ParameterSpec, PrimitiveType};
pub use template::UriTemplate;
