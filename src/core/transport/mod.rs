//! Transports that carry the server to clients.
//!
//! - `stdio` (default): MCP over standard input/output
//! - `tcp`: MCP over raw TCP, one session per connection
//! - `http` (default): the verb protocol on the dispatch path plus JSON-RPC
//!   on the RPC path
//!
//! Every transport hands requests to the same [`McpServer`](crate::core::McpServer),
//! so they share one registry and one dispatcher.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
