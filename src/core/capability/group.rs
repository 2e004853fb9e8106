//! Capability groups: independently built sub-registries.

use std::sync::Arc;
use tracing::debug;

use super::descriptor::CapabilityDescriptor;
use super::error::ConfigurationError;

/// A named collection of descriptors built without knowledge of other groups.
///
/// Descriptors keep their insertion order, which discovery preserves.
#[derive(Debug, Clone)]
pub struct CapabilityGroup {
    namespace: String,
    descriptors: Vec<Arc<CapabilityDescriptor>>,
}

impl CapabilityGroup {
    /// Create an empty group.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            descriptors: Vec::new(),
        }
    }

    /// Register a descriptor.
    ///
    /// Fails on a second descriptor with the same kind and name, and on any
    /// descriptor whose own invariants do not hold.
    pub fn register(&mut self, descriptor: CapabilityDescriptor) -> Result<(), ConfigurationError> {
        descriptor.validate()?;

        let duplicate = self
            .descriptors
            .iter()
            .any(|d| d.kind() == descriptor.kind() && d.name() == descriptor.name());
        if duplicate {
            return Err(ConfigurationError::DuplicateInGroup {
                group: self.namespace.clone(),
                kind: descriptor.kind(),
                name: descriptor.name().to_string(),
            });
        }

        debug!(
            group = %self.namespace,
            kind = %descriptor.kind(),
            name = descriptor.name(),
            "Registered capability"
        );
        self.descriptors.push(Arc::new(descriptor));
        Ok(())
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, descriptor: CapabilityDescriptor) -> Result<Self, ConfigurationError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Descriptors in insertion order.
    pub fn descriptors(&self) -> &[Arc<CapabilityDescriptor>] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
