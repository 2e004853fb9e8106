//! Email tool.
//!
//! Mock delivery: a sent message is only logged.

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::core::capability::{
    Arguments, CapabilityDescriptor, HandlerResult, ParameterSpec, PrimitiveType, handler_fn,
};
use crate::domains::tools::ToolError;

pub struct SendEmailTool;

impl SendEmailTool {
    pub const NAME: &'static str = "send_email";

    pub const DESCRIPTION: &'static str = "Sends an email to a recipient.";

    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("recipient", PrimitiveType::String)
                .with_description("Email address of the recipient"),
            ParameterSpec::required("subject", PrimitiveType::String)
                .with_description("Subject line"),
            ParameterSpec::required("body", PrimitiveType::String)
                .with_description("Message body"),
        ]
    }

    #[instrument(skip_all, fields(recipient))]
    pub fn execute(arguments: &Arguments) -> HandlerResult {
        let recipient = arguments.str("recipient")?;
        let subject = arguments.str("subject")?;
        tracing::Span::current().record("recipient", recipient);

        if !recipient.contains('@') {
            warn!("Rejected recipient without '@'");
            return Err(ToolError::invalid_email("recipient must contain '@' symbol.").into());
        }

        info!("EMAIL SENT to {}: {}", recipient, subject);
        Ok(json!({
            "status": "sent",
            "recipient": recipient,
            "subject": subject
        }))
    }

    pub fn descriptor() -> CapabilityDescriptor {
        CapabilityDescriptor::tool(
            Self::NAME,
            Self::parameters(),
            handler_fn(|arguments: Arguments| async move { Self::execute(&arguments) }),
        )
        .with_description(Self::DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio_test::{assert_err, assert_ok};

    fn email(recipient: &str) -> Arguments {
        [
            ("recipient", recipient),
            ("subject", "Quarterly review"),
            ("body", "See you at 3pm."),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect()
    }

    #[test]
    fn test_send_to_valid_recipient() {
        let result = assert_ok!(SendEmailTool::execute(&email("alice@x.com")));
        assert_eq!(
            result,
            json!({
                "status": "sent",
                "recipient": "alice@x.com",
                "subject": "Quarterly review"
            })
        );
    }

    #[test]
    fn test_reject_recipient_without_at() {
        let err = assert_err!(SendEmailTool::execute(&email("bad")));
        assert_eq!(
            err.message(),
            "Invalid email address: recipient must contain '@' symbol."
        );
    }

    #[tokio::test]
    async fn test_descriptor_handler() {
        let descriptor = SendEmailTool::descriptor();
        assert_eq!(descriptor.parameters().len(), 3);
        let result = descriptor.handler().call(email("bob@corp.io")).await;
        assert_ok!(result);
    }
}
