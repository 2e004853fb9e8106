//! Meeting room listing tool.

use serde_json::json;
use tracing::{info, instrument};

use crate::core::capability::{
    Arguments, CapabilityDescriptor, HandlerResult, ParameterSpec, handler_fn,
};

/// Bookable rooms, in floor-plan order.
pub const MEETING_ROOMS: &[&str] = &[
    "Conference Room A",
    "Conference Room B",
    "Board Room",
    "Focus Room",
];

/// Lists every meeting room in the office.
pub struct ListMeetingRoomsTool;

impl ListMeetingRoomsTool {
    pub const NAME: &'static str = "list_meeting_rooms";

    pub const DESCRIPTION: &'static str = "Lists all available meeting rooms in the office.";

    pub fn parameters() -> Vec<ParameterSpec> {
        Vec::new()
    }

    #[instrument(skip_all)]
    pub fn execute(_arguments: &Arguments) -> HandlerResult {
        info!("Listing {} meeting rooms", MEETING_ROOMS.len());
        Ok(json!(MEETING_ROOMS))
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

    #[test]
    fn test_lists_rooms_in_order() {
        let rooms = ListMeetingRoomsTool::execute(&Arguments::new()).unwrap();
        assert_eq!(
            rooms,
            json!(["Conference Room A", "Conference Room B", "Board Room", "Focus Room"])
        );
    }

    #[test]
    fn test_descriptor_takes_no_parameters() {
        let descriptor = ListMeetingRoomsTool::descriptor();
        assert_eq!(descriptor.name(), "list_meeting_rooms");
        assert!(descriptor.parameters().is_empty());
    }
}
