//! Resource definitions, one file per resource.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod company_holidays;
pub mod employee_details;

pub use company_holidays::CompanyHolidaysResource;
pub use employee_details::EmployeeDetailsResource;

use crate::core::capability::{Arguments, HandlerResult};

/// A readable resource addressed by a URI template.
pub trait ResourceDefinition {
    /// URI template; `{name}` segments are captured on read.
    const URI_TEMPLATE: &'static str;

    /// Capability name.
    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    const MIME_TYPE: &'static str;

    /// Handler inputs, one per template placeholder.
    const INPUTS: &'static [&'static str] = &[];

    /// Produce the resource content from the captured URI values.
    fn read(arguments: &Arguments) -> HandlerResult;
}
