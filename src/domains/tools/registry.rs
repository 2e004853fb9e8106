//! The `CorporateTools` group.
//!
//! When adding a tool:
//! 1. Create the tool file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it below

use crate::core::capability::{CapabilityGroup, ConfigurationError};

use super::definitions::{ListMeetingRoomsTool, SendEmailTool};

pub const NAMESPACE: &str = "CorporateTools";

/// Build the corporate tools group, in discovery order.
pub fn corporate_tools() -> Result<CapabilityGroup, ConfigurationError> {
    CapabilityGroup::new(NAMESPACE)
        .with(ListMeetingRoomsTool::descriptor())?
        .with(SendEmailTool::descriptor())
}

/// Names of all tools in this group.
pub fn tool_names() -> Vec<&'static str> {
    vec![ListMeetingRoomsTool::NAME, SendEmailTool::NAME]
}
