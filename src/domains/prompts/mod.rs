//! Prompts domain: reusable message templates.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file in `definitions/` (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod templates;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{NAMESPACE, build_template, corporate_prompts, prompt_names};
pub use templates::PromptTemplate;
