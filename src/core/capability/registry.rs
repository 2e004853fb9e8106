//! Root registry: the composed, read-only set of all capabilities.
//!
//! Composition runs once at startup. Tools and prompts go into a flat map
//! keyed by `(kind, name)` and a collision there is fatal. Resources go into
//! an ordered matcher list; the first template that matches a URI wins, and a
//! template that an earlier one fully covers is rejected as unreachable.
//! That structural check is best-effort: it catches shadowed templates, not
//! every conceivable overlap.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::descriptor::{CapabilityDescriptor, CapabilityKind, DescriptorView};
use super::error::ConfigurationError;
use super::group::CapabilityGroup;
use super::handler::Arguments;
use super::template::UriTemplate;
use serde_json::Value;

#[derive(Debug)]
struct Entry {
    namespace: String,
    descriptor: Arc<CapabilityDescriptor>,
}

/// The composed registry consulted by the dispatcher.
#[derive(Debug, Default)]
pub struct RootRegistry {
    /// All descriptors, group insertion order then composition order.
    entries: Vec<Entry>,

    /// Tool and prompt lookup into `entries`.
    index: HashMap<(CapabilityKind, String), usize>,

    /// Resource templates in registration order, pointing into `entries`.
    resource_matchers: Vec<(UriTemplate, usize)>,
}

impl RootRegistry {
    /// Merge groups, in the given order, into one registry.
    pub fn compose(
        groups: impl IntoIterator<Item = CapabilityGroup>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self::default();

        for group in groups {
            info!(
                "Composing group {} ({} capabilities)",
                group.namespace(),
                group.len()
            );
            for descriptor in group.descriptors() {
                registry.insert(group.namespace(), descriptor.clone())?;
            }
        }

        info!(
            "Registry composed: {} tools, {} resources, {} prompts",
            registry.count(CapabilityKind::Tool),
            registry.count(CapabilityKind::Resource),
            registry.count(CapabilityKind::Prompt)
        );

        Ok(registry)
    }

    fn insert(
        &mut self,
        namespace: &str,
        descriptor: Arc<CapabilityDescriptor>,
    ) -> Result<(), ConfigurationError> {
        let position = self.entries.len();

        match descriptor.kind() {
            CapabilityKind::Tool | CapabilityKind::Prompt => {
                let key = (descriptor.kind(), descriptor.name().to_string());
                if let Some(&existing) = self.index.get(&key) {
                    return Err(ConfigurationError::DuplicateAcrossGroups {
                        kind: descriptor.kind(),
                        name: descriptor.name().to_string(),
                        first: self.entries[existing].namespace.clone(),
                        second: namespace.to_string(),
                    });
                }
                self.index.insert(key, position);
            }
            CapabilityKind::Resource => {
                let template = descriptor.validate()?.ok_or_else(|| {
                    ConfigurationError::invalid_descriptor(
                        descriptor.name(),
                        "resource has no URI template",
                    )
                })?;

                if let Some((earlier, _)) = self
                    .resource_matchers
                    .iter()
                    .find(|(earlier, _)| earlier.shadows(&template))
                {
                    return Err(ConfigurationError::ShadowedTemplate {
                        template: template.as_str().to_string(),
                        shadowed_by: earlier.as_str().to_string(),
                    });
                }
                self.resource_matchers.push((template, position));
            }
        }

        self.entries.push(Entry {
            namespace: namespace.to_string(),
            descriptor,
        });
        Ok(())
    }

    /// Look up a tool or prompt by name.
    pub fn lookup(&self, kind: CapabilityKind, name: &str) -> Option<&Arc<CapabilityDescriptor>> {
        self.index
            .get(&(kind, name.to_string()))
            .map(|&i| &self.entries[i].descriptor)
    }

    /// Resolve a concrete URI to a resource and its captured values.
    ///
    /// Templates are tried in registration order; the first match wins.
    pub fn resolve_uri(&self, uri: &str) -> Option<(&Arc<CapabilityDescriptor>, Arguments)> {
        self.resource_matchers.iter().find_map(|(template, i)| {
            template.matches(uri).map(|captures| {
                let arguments: Arguments = captures
                    .into_iter()
                    .map(|(name, value)| (name, Value::String(value)))
                    .collect();
                (&self.entries[*i].descriptor, arguments)
            })
        })
    }

    /// Descriptors in discovery order, optionally restricted to one kind.
    pub fn descriptors(
        &self,
        kind: Option<CapabilityKind>,
    ) -> impl Iterator<Item = &Arc<CapabilityDescriptor>> {
        self.entries
            .iter()
            .map(|entry| &entry.descriptor)
            .filter(move |d| kind.is_none_or(|k| d.kind() == k))
    }

    /// Discovery projection of [`descriptors`](Self::descriptors).
    pub fn describe(&self, kind: Option<CapabilityKind>) -> Vec<DescriptorView> {
        self.descriptors(kind).map(|d| d.describe()).collect()
    }

    /// Number of descriptors of one kind.
    pub fn count(&self, kind: CapabilityKind) -> usize {
        self.descriptors(Some(kind)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::handler::{Handler, handler_fn};
    use serde_json::json;

    fn tagged(tag: &'static str) -> Arc<dyn Handler> {
        handler_fn(move |_args: Arguments| async move { Ok(json!(tag)) })
    }

    fn tool(name: &str) -> CapabilityDescriptor {
        CapabilityDescriptor::tool(name, vec![], tagged("tool"))
    }

    fn resource(name: &str, template: &str, inputs: &[&str]) -> CapabilityDescriptor {
        CapabilityDescriptor::resource(name, template, inputs, tagged("resource"))
    }

    fn group(namespace: &str, descriptors: Vec<CapabilityDescriptor>) -> CapabilityGroup {
        let mut group = CapabilityGroup::new(namespace);
        for descriptor in descriptors {
            group.register(descriptor).unwrap();
        }
        group
    }

    #[test]
    fn test_compose_preserves_group_and_insertion_order() {
        let registry = RootRegistry::compose(vec![
            group("First", vec![tool("z_tool"), tool("a_tool")]),
            group("Second", vec![resource("r", "x://r", &[]), tool("m_tool")]),
        ])
        .unwrap();

        let names: Vec<_> = registry.descriptors(None).map(|d| d.name()).collect();
        assert_eq!(names, vec!["z_tool", "a_tool", "r", "m_tool"]);
    }

    #[test]
    fn test_duplicate_tool_across_groups_is_fatal() {
        let err = RootRegistry::compose(vec![
            group("CorporateTools", vec![tool("list_meeting_rooms")]),
            group("FacilitiesTools", vec![tool("list_meeting_rooms")]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::DuplicateAcrossGroups {
                kind: CapabilityKind::Tool,
                name: "list_meeting_rooms".to_string(),
                first: "CorporateTools".to_string(),
                second: "FacilitiesTools".to_string(),
            }
        );
    }

    #[test]
    fn test_same_resource_name_across_groups_is_allowed() {
        let registry = RootRegistry::compose(vec![
            group("A", vec![resource("info", "a://info", &[])]),
            group("B", vec![resource("info", "b://info", &[])]),
        ])
        .unwrap();
        assert_eq!(registry.count(CapabilityKind::Resource), 2);
    }

    #[test]
    fn test_kind_filter() {
        let registry = RootRegistry::compose(vec![group(
            "Mixed",
            vec![tool("t"), resource("r", "x://r", &[])],
        )])
        .unwrap();

        let tools = registry.describe(Some(CapabilityKind::Tool));
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "t");
        assert!(registry.describe(Some(CapabilityKind::Prompt)).is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_templates_resolve_by_registration_order() {
        let registry = RootRegistry::compose(vec![
            group(
                "First",
                vec![CapabilityDescriptor::resource(
                    "by_name",
                    "x://{team}/admin",
                    &["team"],
                    tagged("A"),
                )],
            ),
            group(
                "Second",
                vec![CapabilityDescriptor::resource(
                    "by_role",
                    "x://ops/{role}",
                    &["role"],
                    tagged("B"),
                )],
            ),
        ])
        .unwrap();

        let (descriptor, arguments) = registry.resolve_uri("x://ops/admin").unwrap();
        assert_eq!(descriptor.name(), "by_name");
        assert_eq!(arguments.str("team").unwrap(), "ops");
        assert_eq!(descriptor.handler().call(arguments).await.unwrap(), json!("A"));

        let (descriptor, _) = registry.resolve_uri("x://ops/viewer").unwrap();
        assert_eq!(descriptor.name(), "by_role");
    }

    #[test]
    fn test_specific_before_general_is_allowed() {
        let registry = RootRegistry::compose(vec![group(
            "Employees",
            vec![
                resource("me", "corporate://employees/me", &[]),
                resource("employee", "corporate://employees/{employee_id}", &["employee_id"]),
            ],
        )])
        .unwrap();

        let (descriptor, _) = registry.resolve_uri("corporate://employees/me").unwrap();
        assert_eq!(descriptor.name(), "me");
        let (descriptor, _) = registry.resolve_uri("corporate://employees/U123").unwrap();
        assert_eq!(descriptor.name(), "employee");
    }

    #[test]
    fn test_shadowed_template_is_rejected() {
        let err = RootRegistry::compose(vec![
            group(
                "A",
                vec![resource("employee", "corporate://employees/{employee_id}", &["employee_id"])],
            ),
            group("B", vec![resource("me", "corporate://employees/me", &[])]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::ShadowedTemplate {
                template: "corporate://employees/me".to_string(),
                shadowed_by: "corporate://employees/{employee_id}".to_string(),
            }
        );
    }

    #[test]
    fn test_unmatched_uri() {
        let registry =
            RootRegistry::compose(vec![group("A", vec![resource("r", "x://r", &[])])]).unwrap();
        assert!(registry.resolve_uri("x://missing").is_none());
        assert!(registry.lookup(CapabilityKind::Tool, "r").is_none());
    }
}
