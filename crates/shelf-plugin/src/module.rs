// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension module API.
//!
//! An extension module is a crate linked into the host binary. It declares a
//! list of [`Capability`] values, each pairing a contract with a name, an
//! optional settings type, and a constructor. The host only ever activates a
//! module when a `*.plugin.toml` manifest naming it is found on disk.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use shelf_core::{ContractKind, FileSource, NamedSettings, ShelfError, Transformer};

use crate::settings::SettingsSpec;

/// Type-erased settings value handed to capability constructors.
pub type SettingsValue = Arc<dyn Any + Send + Sync>;

/// Constructor producing a fresh contract instance from optional settings.
pub type Constructor<T> = Arc<dyn Fn(Option<SettingsValue>) -> Box<T> + Send + Sync>;

/// What the host exposes to modules while they enumerate capabilities.
#[derive(Debug, Clone)]
pub struct HostContext {
    /// Version of the running host.
    pub host_version: semver::Version,
    /// Contracts the host registers capabilities for.
    pub contracts: Vec<ContractKind>,
}

impl HostContext {
    /// Context for the current host build.
    pub fn new(contracts: Vec<ContractKind>) -> Self {
        Self {
            host_version: host_version(),
            contracts,
        }
    }

    /// Whether the host registers capabilities of this contract.
    pub fn wants(&self, contract: ContractKind) -> bool {
        self.contracts.contains(&contract)
    }
}

/// The host version, taken from this crate's package version.
pub fn host_version() -> semver::Version {
    semver::Version::parse(env!("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| semver::Version::new(0, 0, 0))
}

/// A linked extension module.
pub trait ExtensionModule: Send + Sync {
    /// Entry-point name; manifests refer to the module by this key.
    fn name(&self) -> &str;

    /// Module version.
    fn version(&self) -> semver::Version;

    /// Enumerate the capabilities this module provides.
    ///
    /// May be called once per contract; must return the same list each time.
    fn capabilities(&self, host: &HostContext) -> Result<Vec<Capability>, ShelfError>;
}

/// Contract-typed constructor of a capability.
#[derive(Clone)]
pub enum CapabilityConstructor {
    FileSource(Constructor<dyn FileSource>),
    Transformer(Constructor<dyn Transformer>),
}

impl CapabilityConstructor {
    pub fn contract(&self) -> ContractKind {
        match self {
            Self::FileSource(_) => ContractKind::FileSource,
            Self::Transformer(_) => ContractKind::Transformer,
        }
    }
}

/// One concrete implementation of a contract offered by a module.
#[derive(Clone)]
pub struct Capability {
    name: String,
    settings: Option<SettingsSpec>,
    constructor: CapabilityConstructor,
}

impl Capability {
    /// A file source configured by the settings type `S`.
    ///
    /// The constructor receives `None` when no settings could be resolved.
    pub fn file_source<S, T, F>(name: impl Into<String>, construct: F) -> Self
    where
        S: NamedSettings,
        T: FileSource + 'static,
        F: Fn(Option<Arc<S>>) -> T + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn FileSource> =
            Arc::new(move |settings: Option<SettingsValue>| {
                Box::new(construct(downcast_settings::<S>(settings))) as Box<dyn FileSource>
            });
        Self {
            name: name.into(),
            settings: Some(SettingsSpec::of::<S>()),
            constructor: CapabilityConstructor::FileSource(constructor),
        }
    }

    /// A file source without settings.
    pub fn plain_file_source<T, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: FileSource + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn FileSource> =
            Arc::new(move |_: Option<SettingsValue>| {
                Box::new(construct()) as Box<dyn FileSource>
            });
        Self {
            name: name.into(),
            settings: None,
            constructor: CapabilityConstructor::FileSource(constructor),
        }
    }

    /// A transformer configured by the settings type `S`.
    pub fn transformer<S, T, F>(name: impl Into<String>, construct: F) -> Self
    where
        S: NamedSettings,
        T: Transformer + 'static,
        F: Fn(Option<Arc<S>>) -> T + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn Transformer> =
            Arc::new(move |settings: Option<SettingsValue>| {
                Box::new(construct(downcast_settings::<S>(settings))) as Box<dyn Transformer>
            });
        Self {
            name: name.into(),
            settings: Some(SettingsSpec::of::<S>()),
            constructor: CapabilityConstructor::Transformer(constructor),
        }
    }

    /// A transformer without settings.
    pub fn plain_transformer<T, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: Transformer + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn Transformer> =
            Arc::new(move |_: Option<SettingsValue>| {
                Box::new(construct()) as Box<dyn Transformer>
            });
        Self {
            name: name.into(),
            settings: None,
            constructor: CapabilityConstructor::Transformer(constructor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contract(&self) -> ContractKind {
        self.constructor.contract()
    }

    pub fn settings(&self) -> Option<&SettingsSpec> {
        self.settings.as_ref()
    }

    pub fn constructor(&self) -> &CapabilityConstructor {
        &self.constructor
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("contract", &self.contract())
            .field("settings", &self.settings.as_ref().map(|s| s.section()))
            .finish()
    }
}

fn downcast_settings<S: NamedSettings>(settings: Option<SettingsValue>) -> Option<Arc<S>> {
    settings.and_then(|value| value.downcast::<S>().ok())
}

/// Extension modules linked into this binary, keyed by entry-point name.
#[derive(Clone, Default)]
pub struct ModuleTable {
    modules: HashMap<String, Arc<dyn ExtensionModule>>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a module. The first module registered under a name wins.
    pub fn register(&mut self, module: Arc<dyn ExtensionModule>) -> &mut Self {
        let name = module.name().to_string();
        if self.modules.contains_key(&name) {
            tracing::warn!(module = %name, "module already linked, ignoring duplicate");
        } else {
            self.modules.insert(name, module);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ExtensionModule>> {
        self.modules.get(name).cloned()
    }

    /// Linked entry-point names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleTable")
            .field("modules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EchoSource, EchoSettings, NamedModule};

    #[test]
    fn host_context_reports_wanted_contracts() {
        let host = HostContext::new(vec![ContractKind::FileSource]);
        assert!(host.wants(ContractKind::FileSource));
        assert!(!host.wants(ContractKind::Transformer));
        assert_eq!(host.host_version, host_version());
    }

    #[test]
    fn capability_reports_contract_and_settings() {
        let cap = Capability::file_source::<EchoSettings, _, _>("Echo", EchoSource::from_settings);
        assert_eq!(cap.name(), "Echo");
        assert_eq!(cap.contract(), ContractKind::FileSource);
        assert_eq!(cap.settings().map(|s| s.section()), Some("EchoSettings"));

        let plain = Capability::plain_file_source("Plain", EchoSource::default);
        assert!(plain.settings().is_none());
    }

    #[test]
    fn constructor_downcasts_matching_settings() {
        let cap = Capability::file_source::<EchoSettings, _, _>("Echo", EchoSource::from_settings);
        let CapabilityConstructor::FileSource(construct) = cap.constructor() else {
            panic!("expected a file source constructor");
        };

        let settings: SettingsValue = Arc::new(EchoSettings {
            prefix: "custom".into(),
        });
        let source = construct(Some(settings));
        assert_eq!(source.name(), "custom");

        let unconfigured = construct(None);
        assert_eq!(unconfigured.name(), "echo");
    }

    #[test]
    fn constructor_ignores_foreign_settings() {
        let cap = Capability::file_source::<EchoSettings, _, _>("Echo", EchoSource::from_settings);
        let CapabilityConstructor::FileSource(construct) = cap.constructor() else {
            panic!("expected a file source constructor");
        };
        let foreign: SettingsValue = Arc::new(42_u32);
        assert_eq!(construct(Some(foreign)).name(), "echo");
    }

    #[test]
    fn module_table_keeps_first_registration() {
        let mut table = ModuleTable::new();
        table
            .register(Arc::new(NamedModule::new("alpha", vec![])))
            .register(Arc::new(NamedModule::new("beta", vec![])))
            .register(Arc::new(NamedModule::new("alpha", vec![])));

        assert_eq!(table.len(), 2);
        assert_eq!(table.names(), vec!["alpha", "beta"]);
        assert!(table.get("beta").is_some());
        assert!(table.get("gamma").is_none());
    }
}
