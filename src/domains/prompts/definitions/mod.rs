//! Prompt definitions, one file per prompt.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod project_status;
pub mod welcome_email;

pub use project_status::ProjectStatusPrompt;
pub use welcome_email::WelcomeEmailPrompt;

use crate::core::capability::ParameterSpec;

/// Metadata and template of one prompt.
pub trait PromptDefinition {
    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// Declared arguments, in order.
    fn arguments() -> Vec<ParameterSpec> {
        Vec::new()
    }
}
