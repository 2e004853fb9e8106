//! Employee directory lookup.
//!
//! An unknown ID is a normal answer, not a failure: the read succeeds and
//! carries an `error` field.

use serde_json::json;
use tracing::debug;

use super::ResourceDefinition;
use crate::core::capability::{Arguments, HandlerResult};
use crate::domains::resources::data::find_employee;

pub struct EmployeeDetailsResource;

impl ResourceDefinition for EmployeeDetailsResource {
    const URI_TEMPLATE: &'static str = "corporate://employees/{employee_id}";
    const NAME: &'static str = "get_employee_details";
    const DESCRIPTION: &'static str = "Fetches employee details for a given employee ID.";
    const MIME_TYPE: &'static str = "application/json";
    const INPUTS: &'static [&'static str] = &["employee_id"];

    fn read(arguments: &Arguments) -> HandlerResult {
        let employee_id = arguments.str("employee_id")?;
        match find_employee(employee_id) {
            Some(employee) => Ok(serde_json::to_value(employee)?),
            None => {
                debug!("No employee with id {}", employee_id);
                Ok(json!({ "error": "Employee not found" }))
            }
        }
    }
}
