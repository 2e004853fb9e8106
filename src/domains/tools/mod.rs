//! Tools domain: executable actions.
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`) with `NAME`,
//!    `DESCRIPTION`, `parameters()`, `execute()` and `descriptor()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `registry.rs`
//!
//! Nothing in `core/` needs to change.

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::{NAMESPACE, corporate_tools, tool_names};
