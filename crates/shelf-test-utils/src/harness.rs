// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for dispatch and gateway tests.
//!
//! `TestHarness` pushes mock capabilities through the real registration and
//! settings pipeline, so tests observe the same ordering and instantiation
//! rules the host applies to scanned modules.

use std::collections::HashMap;
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Format, Toml};
use shelf_core::{ContentTypeResolver, ContractKind};
use shelf_plugin::{Capability, CapabilityRegistry, LoadedModule, PluginBuilder};

use crate::mock_module::MockModule;
use crate::mock_source::MockSource;
use crate::mock_transformer::MockTransformer;

/// Builder for creating test registries.
pub struct TestHarnessBuilder {
    capabilities: Vec<Capability>,
    config: String,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            capabilities: Vec::new(),
            config: String::new(),
        }
    }

    /// Register a source after the ones already added.
    pub fn with_source(self, source: &MockSource) -> Self {
        self.with_capability(source.capability())
    }

    /// Register a transformer after the ones already added.
    pub fn with_transformer(self, transformer: &MockTransformer) -> Self {
        self.with_capability(transformer.capability())
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// TOML the plugin settings sections are bound from.
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = toml.to_string();
        self
    }

    pub fn build(self) -> TestHarness {
        let module = self
            .capabilities
            .into_iter()
            .fold(MockModule::new("mock"), MockModule::with_capability);
        let figment = Figment::new().merge(Toml::string(&self.config));

        let registry = PluginBuilder::new()
            .add_contract(ContractKind::FileSource)
            .add_contract(ContractKind::Transformer)
            .add_settings_contract(ContractKind::FileSource)
            .add_settings_contract(ContractKind::Transformer)
            .load_modules(&[LoadedModule::linked(Arc::new(module))], &figment);

        TestHarness {
            registry: Arc::new(registry),
        }
    }
}

/// A registry assembled from mock capabilities.
pub struct TestHarness {
    pub registry: Arc<CapabilityRegistry>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}

/// Content types keyed by lowercase extension (with the dot).
#[derive(Debug, Clone, Default)]
pub struct StaticContentTypes {
    types: HashMap<String, String>,
}

impl StaticContentTypes {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            types: entries
                .iter()
                .map(|(ext, ty)| (ext.to_lowercase(), ty.to_string()))
                .collect(),
        }
    }
}

impl ContentTypeResolver for StaticContentTypes {
    fn content_type(&self, file_name: &str) -> Option<String> {
        let dot = file_name.rfind('.')?;
        self.types.get(&file_name[dot..].to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_registers_in_declaration_order() {
        let harness = TestHarness::builder()
            .with_source(&MockSource::new("first"))
            .with_transformer(&MockTransformer::new("upper", "_upper"))
            .with_source(&MockSource::new("second"))
            .build();

        let sources: Vec<&str> = harness
            .registry
            .file_sources()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(sources, vec!["first", "second"]);
        assert_eq!(harness.registry.count(ContractKind::Transformer), 1);
    }

    #[test]
    fn static_content_types_ignore_case() {
        let types = StaticContentTypes::new(&[(".txt", "text/plain")]);
        assert_eq!(types.content_type("A.TXT").as_deref(), Some("text/plain"));
        assert!(types.content_type("a.bin").is_none());
        assert!(types.content_type("noext").is_none());
    }
}
