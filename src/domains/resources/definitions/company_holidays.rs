//! Company holiday calendar resource.

use serde_json::json;

use super::ResourceDefinition;
use crate::core::capability::{Arguments, HandlerResult};
use crate::domains::resources::data::HOLIDAYS_2025;

pub struct CompanyHolidaysResource;

impl ResourceDefinition for CompanyHolidaysResource {
    const URI_TEMPLATE: &'static str = "corporate://holidays/2025";
    const NAME: &'static str = "company_holidays";
    const DESCRIPTION: &'static str =
        "Provides a list of official company holidays for the year 2025.";
    const MIME_TYPE: &'static str = "application/json";

    fn read(_arguments: &Arguments) -> HandlerResult {
        Ok(json!(HOLIDAYS_2025))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holidays() {
        let holidays = CompanyHolidaysResource::read(&Arguments::new()).unwrap();
        assert_eq!(holidays, json!(["2025-01-01", "2025-07-04", "2025-12-25"]));
    }
}
