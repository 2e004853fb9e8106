//! Corporate assistant capability server.
//!
//! Business capabilities (tools, URI-addressed resources and prompt templates)
//! are declared in independent groups, composed once into a read-only registry,
//! and served through a single dispatcher that validates arguments and wraps
//! every outcome in a uniform envelope.
//!
//! # Architecture
//!
//! - **core**: infrastructure
//!   - **capability**: parameter schemas, descriptors, groups, the root registry
//!   - **dispatch**: verb routing, validation, error envelopes
//!   - **server** / **transport**: MCP projection over stdio, TCP and HTTP
//! - **domains**: the groups themselves
//!   - **resources**: holiday calendar and employee directory
//!   - **tools**: meeting rooms and email
//!   - **prompts**: welcome email and project status templates
//!   - **weather**: current conditions and live forecast
//!
//! # Example
//!
//! ```rust,no_run
//! use corporate_assistant::core::{Config, McpServer, Request};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     let request = Request::read("corporate://employees/U123");
//!     let response = server.dispatcher().dispatch(request).await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
