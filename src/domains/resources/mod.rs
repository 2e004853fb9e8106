//! Resources domain: read-only data addressed by URI.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`

pub mod data;
pub mod definitions;
mod registry;

pub use definitions::ResourceDefinition;
pub use registry::{NAMESPACE, build_resource, corporate_resources, resource_templates};
