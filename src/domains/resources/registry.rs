//! The `CorporateResources` group.
//!
//! When adding a resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `corporate_resources()`

use crate::core::capability::{
    Arguments, CapabilityDescriptor, CapabilityGroup, ConfigurationError, handler_fn,
};

use super::definitions::{CompanyHolidaysResource, EmployeeDetailsResource, ResourceDefinition};

pub const NAMESPACE: &str = "CorporateResources";

/// Turn a resource definition into a descriptor.
pub fn build_resource<R: ResourceDefinition + 'static>() -> CapabilityDescriptor {
    CapabilityDescriptor::resource(
        R::NAME,
        R::URI_TEMPLATE,
        R::INPUTS,
        handler_fn(|arguments: Arguments| async move { R::read(&arguments) }),
    )
    .with_description(R::DESCRIPTION)
    .with_mime_type(R::MIME_TYPE)
}

/// Build the corporate resources group.
///
/// Specific templates must come before general ones that would cover them.
pub fn corporate_resources() -> Result<CapabilityGroup, ConfigurationError> {
    CapabilityGroup::new(NAMESPACE)
        .with(build_resource::<CompanyHolidaysResource>())?
        .with(build_resource::<EmployeeDetailsResource>())
}

/// URI templates of all resources in this group.
pub fn resource_templates() -> Vec<&'static str> {
    vec![
        CompanyHolidaysResource::URI_TEMPLATE,
        EmployeeDetailsResource::URI_TEMPLATE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_contents() {
        let group = corporate_resources().unwrap();
        let templates: Vec<_> = group
            .descriptors()
            .iter()
            .filter_map(|d| d.uri_template())
            .collect();
        assert_eq!(templates, resource_templates());
    }

    #[test]
    fn test_descriptor_metadata() {
        let descriptor = build_resource::<EmployeeDetailsResource>();
        assert_eq!(descriptor.name(), "get_employee_details");
        assert_eq!(descriptor.mime_type(), Some("application/json"));
    }
}
