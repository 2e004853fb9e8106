//! Verb protocol and the dispatcher that serves it.

pub mod dispatcher;
pub mod error;
pub mod request;
pub mod response;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use request::{Request, Verb};
pub use response::{ErrorBody, Response, StatusClass};
