//! Shared infrastructure: the capability model, the dispatcher, configuration,
//! the MCP server and its transports.

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use dispatch::{Dispatcher, Request, Response};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
