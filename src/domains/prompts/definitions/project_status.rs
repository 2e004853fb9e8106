//! Project status update.

use super::PromptDefinition;
use crate::core::capability::{ParameterSpec, PrimitiveType};

pub struct ProjectStatusPrompt;

impl PromptDefinition for ProjectStatusPrompt {
    const NAME: &'static str = "project_status_update";
    const DESCRIPTION: &'static str = "Creates a formatted project status update.";

    fn template() -> &'static str {
        "**Status Update**

Project: {{project_name}}
Current Progress: {{progress}}%

Next steps: {{#if next_steps}}{{next_steps}}{{else}}[LLM should fill this in]{{/if}}"
    }

    fn arguments() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("project_name", PrimitiveType::String)
                .with_description("Name of the project"),
            ParameterSpec::required("progress", PrimitiveType::Integer)
                .with_description("Completion percentage"),
            ParameterSpec::optional("next_steps", PrimitiveType::String)
                .with_description("Planned next steps, if already known"),
        ]
    }
}
