//! Weather domain: a mock current-conditions tool and a live forecast tool.
//!
//! The forecast tool talks to the upstream through [`Fetch`], so tests and
//! embedders can swap the HTTP client for a stub.

pub mod client;
pub mod definitions;
mod registry;

pub use client::{Fetch, HttpFetcher, Unavailable};
pub use registry::{NAMESPACE, tool_names, weather};
