//! Tool definitions, one file per tool.

pub mod list_meeting_rooms;
pub mod send_email;

pub use list_meeting_rooms::ListMeetingRoomsTool;
pub use send_email::SendEmailTool;
