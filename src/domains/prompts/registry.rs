//! The `CorporatePrompts` group.
//!
//! When adding a prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `corporate_prompts()`

use super::definitions::{ProjectStatusPrompt, PromptDefinition, WelcomeEmailPrompt};
use super::templates::PromptTemplate;
use crate::core::capability::{CapabilityGroup, ConfigurationError};

pub const NAMESPACE: &str = "CorporatePrompts";

/// Build a PromptTemplate from a PromptDefinition.
pub fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate::new(
        P::NAME,
        Some(P::DESCRIPTION.to_string()),
        P::arguments(),
        P::template(),
    )
}

/// Build the corporate prompts group.
pub fn corporate_prompts() -> Result<CapabilityGroup, ConfigurationError> {
    CapabilityGroup::new(NAMESPACE)
        .with(build_template::<WelcomeEmailPrompt>().into_descriptor())?
        .with(build_template::<ProjectStatusPrompt>().into_descriptor())
}

pub fn prompt_names() -> Vec<&'static str> {
    vec![WelcomeEmailPrompt::NAME, ProjectStatusPrompt::NAME]
}
