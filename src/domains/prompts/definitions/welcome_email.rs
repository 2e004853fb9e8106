//! New hire welcome email.
//!
//! Takes no arguments: the `{new_hire_name}` and `{start_date}` markers are
//! left in the text for the caller to fill.

use super::PromptDefinition;

pub struct WelcomeEmailPrompt;

impl PromptDefinition for WelcomeEmailPrompt {
    const NAME: &'static str = "generate_welcome_email";
    const DESCRIPTION: &'static str = "Generates a welcome email for a new employee.";

    fn template() -> &'static str {
        "Subject: Welcome to the team!

Hi {new_hire_name},

We are thrilled to have you join us. Your official start date is {start_date}.
We look forward to working with you!

Best,
HR Team"
    }
}
