// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registry consumed by the dispatcher.
//!
//! The `CapabilityRegistry` holds one ordered descriptor list per contract.
//! Each descriptor carries the resolved settings of its capability and a
//! constructor that builds a fresh instance on every call.

use std::fmt;

use shelf_core::{ContractKind, FileSource, Transformer};

use crate::module::{Capability, CapabilityConstructor, Constructor};
use crate::settings::{ResolvedSettings, SettingsOrigin, SettingsStore};

/// Settings state of a registered capability, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsState {
    /// The capability declares no settings type.
    None,
    /// Settings were bound from configuration or generated.
    Resolved(SettingsOrigin),
    /// The capability declares settings that could not be resolved, or
    /// settings resolution is disabled for its contract.
    Unresolved,
}

impl fmt::Display for SettingsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsState::None => write!(f, "none"),
            SettingsState::Resolved(origin) => write!(f, "{origin}"),
            SettingsState::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// A registered capability of contract `T`.
pub struct CapabilityDescriptor<T: ?Sized> {
    /// Entry-point name of the module that declared it.
    pub module: String,
    /// Capability name, unique within its contract.
    pub name: String,
    /// Section of the declared settings type, if any.
    pub settings_section: Option<&'static str>,
    settings: Option<ResolvedSettings>,
    constructor: Constructor<T>,
}

impl<T: ?Sized> CapabilityDescriptor<T> {
    /// Build a fresh instance, handing it the resolved settings.
    pub fn instantiate(&self) -> Box<T> {
        (self.constructor)(self.settings.as_ref().map(ResolvedSettings::value))
    }

    pub fn settings(&self) -> Option<&ResolvedSettings> {
        self.settings.as_ref()
    }

    pub fn settings_state(&self) -> SettingsState {
        match (&self.settings_section, &self.settings) {
            (None, _) => SettingsState::None,
            (Some(_), Some(resolved)) => SettingsState::Resolved(resolved.origin()),
            (Some(_), None) => SettingsState::Unresolved,
        }
    }
}

impl<T: ?Sized> fmt::Debug for CapabilityDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("settings_section", &self.settings_section)
            .field("settings", &self.settings_state())
            .finish()
    }
}

pub type FileSourceDescriptor = CapabilityDescriptor<dyn FileSource>;
pub type TransformerDescriptor = CapabilityDescriptor<dyn Transformer>;

/// Flat view of one registered capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySummary {
    pub contract: ContractKind,
    pub module: String,
    pub name: String,
    pub settings_section: Option<&'static str>,
    pub settings: SettingsState,
}

/// Registered capabilities, in dispatch order, plus their settings.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    file_sources: Vec<FileSourceDescriptor>,
    transformers: Vec<TransformerDescriptor>,
    settings: SettingsStore,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a capability declared by `module`.
    ///
    /// `settings` is the record the capability's constructor will receive.
    pub(crate) fn push(
        &mut self,
        module: &str,
        capability: Capability,
        settings: Option<ResolvedSettings>,
    ) {
        let settings_section = capability.settings().map(|s| s.section());
        let name = capability.name().to_string();
        match capability.constructor().clone() {
            CapabilityConstructor::FileSource(constructor) => {
                self.file_sources.push(CapabilityDescriptor {
                    module: module.to_string(),
                    name,
                    settings_section,
                    settings,
                    constructor,
                })
            }
            CapabilityConstructor::Transformer(constructor) => {
                self.transformers.push(CapabilityDescriptor {
                    module: module.to_string(),
                    name,
                    settings_section,
                    settings,
                    constructor,
                })
            }
        }
    }

    pub(crate) fn set_settings(&mut self, settings: SettingsStore) {
        self.settings = settings;
    }

    pub fn file_sources(&self) -> &[FileSourceDescriptor] {
        &self.file_sources
    }

    pub fn transformers(&self) -> &[TransformerDescriptor] {
        &self.transformers
    }

    /// Resolved settings of every registered settings type.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Fresh file source instances, in registration order.
    pub fn instantiate_file_sources(&self) -> Vec<Box<dyn FileSource>> {
        self.file_sources.iter().map(|d| d.instantiate()).collect()
    }

    /// Fresh transformer instances, in registration order.
    pub fn instantiate_transformers(&self) -> Vec<Box<dyn Transformer>> {
        self.transformers.iter().map(|d| d.instantiate()).collect()
    }

    /// Every registered capability, file sources first.
    pub fn summaries(&self) -> Vec<CapabilitySummary> {
        let sources = self
            .file_sources
            .iter()
            .map(|d| summarize(ContractKind::FileSource, d));
        let transformers = self
            .transformers
            .iter()
            .map(|d| summarize(ContractKind::Transformer, d));
        sources.chain(transformers).collect()
    }

    /// Look up a capability by contract and name.
    pub fn get(&self, contract: ContractKind, name: &str) -> Option<CapabilitySummary> {
        self.summaries()
            .into_iter()
            .find(|s| s.contract == contract && s.name == name)
    }

    pub fn count(&self, contract: ContractKind) -> usize {
        match contract {
            ContractKind::FileSource => self.file_sources.len(),
            ContractKind::Transformer => self.transformers.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.file_sources.len() + self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn summarize<T: ?Sized>(contract: ContractKind, d: &CapabilityDescriptor<T>) -> CapabilitySummary {
    CapabilitySummary {
        contract,
        module: d.module.clone(),
        name: d.name.clone(),
        settings_section: d.settings_section,
        settings: d.settings_state(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EchoSettings, EchoSource, UpperTransformer};

    fn registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry.push(
            "alpha",
            Capability::file_source::<EchoSettings, _, _>("Echo", EchoSource::from_settings),
            Some(ResolvedSettings::new(
                EchoSettings { prefix: "configured".into() },
                SettingsOrigin::Configured,
            )),
        );
        registry.push(
            "alpha",
            Capability::file_source::<EchoSettings, _, _>("Bare", EchoSource::from_settings),
            None,
        );
        registry.push(
            "beta",
            Capability::plain_transformer("Upper", UpperTransformer::default),
            None,
        );
        registry
    }

    #[test]
    fn empty_registry() {
        let registry = CapabilityRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.instantiate_file_sources().is_empty());
        assert!(registry.summaries().is_empty());
    }

    #[test]
    fn descriptors_keep_registration_order() {
        let registry = registry();
        let names: Vec<&str> = registry.file_sources().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Echo", "Bare"]);
        assert_eq!(registry.count(ContractKind::Transformer), 1);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn instances_receive_resolved_settings() {
        let registry = registry();
        let sources = registry.instantiate_file_sources();
        assert_eq!(sources[0].name(), "configured");
        assert_eq!(sources[1].name(), "echo");
    }

    #[test]
    fn every_instantiation_is_fresh() {
        let registry = registry();
        let a = registry.file_sources()[0].instantiate();
        let b = registry.file_sources()[0].instantiate();
        assert!(!std::ptr::eq(
            a.as_ref() as *const dyn FileSource as *const u8,
            b.as_ref() as *const dyn FileSource as *const u8,
        ));
    }

    #[test]
    fn summaries_report_settings_state() {
        let registry = registry();
        let echo = registry.get(ContractKind::FileSource, "Echo").unwrap();
        assert_eq!(echo.module, "alpha");
        assert_eq!(echo.settings_section, Some("EchoSettings"));
        assert_eq!(echo.settings, SettingsState::Resolved(SettingsOrigin::Configured));

        let bare = registry.get(ContractKind::FileSource, "Bare").unwrap();
        assert_eq!(bare.settings, SettingsState::Unresolved);

        let upper = registry.get(ContractKind::Transformer, "Upper").unwrap();
        assert_eq!(upper.settings, SettingsState::None);
        assert_eq!(upper.settings.to_string(), "none");

        assert!(registry.get(ContractKind::Transformer, "Echo").is_none());
    }
}
