// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fluent construction of a [`CapabilityRegistry`].
//!
//! ```no_run
//! use shelf_core::ContractKind;
//! use shelf_plugin::{ModuleTable, PluginBuilder};
//!
//! let table = ModuleTable::new();
//! let figment = figment::Figment::new();
//! let registry = PluginBuilder::new()
//!     .add_plugin_directory(["plugins"])
//!     .add_exclusion_pattern(["^disabled-"])
//!     .add_contract(ContractKind::FileSource)
//!     .add_contract(ContractKind::Transformer)
//!     .add_settings_contract(ContractKind::FileSource)
//!     .add_settings_contract(ContractKind::Transformer)
//!     .load(&table, &figment);
//! # let _ = registry;
//! ```

use std::collections::HashSet;

use figment::Figment;
use shelf_core::ContractKind;
use tracing::{info, warn};

use crate::module::{HostContext, ModuleTable};
use crate::registrar::CapabilityRegistrar;
use crate::registry::CapabilityRegistry;
use crate::scanner::{LoadedModule, ModuleScanner};
use crate::settings::{SettingsResolver, SettingsStore};

/// Collects plugin directories, exclusions, and contracts, then loads everything.
#[derive(Debug, Clone, Default)]
pub struct PluginBuilder {
    directories: Vec<String>,
    exclusions: Vec<String>,
    contracts: Vec<ContractKind>,
    settings_contracts: Vec<ContractKind>,
}

impl PluginBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add directories to scan, in order.
    pub fn add_plugin_directory<I, S>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories.extend(directories.into_iter().map(Into::into));
        self
    }

    /// Add regular expressions matched against candidate file names.
    pub fn add_exclusion_pattern<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Register capabilities of this contract.
    pub fn add_contract(mut self, contract: ContractKind) -> Self {
        if !self.contracts.contains(&contract) {
            self.contracts.push(contract);
        }
        self
    }

    /// Resolve settings for capabilities of this contract.
    pub fn add_settings_contract(mut self, contract: ContractKind) -> Self {
        if !self.settings_contracts.contains(&contract) {
            self.settings_contracts.push(contract);
        }
        self
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    pub fn host_context(&self) -> HostContext {
        HostContext::new(self.contracts.clone())
    }

    /// Scan the plugin directories and register what the manifests activate.
    pub fn load(&self, table: &ModuleTable, figment: &Figment) -> CapabilityRegistry {
        let host = self.host_context();
        let modules = ModuleScanner::new(table, &host, &self.exclusions).scan(&self.directories);
        info!(modules = modules.len(), "plugin modules activated");
        self.register(&host, &modules, figment)
    }

    /// Register already-activated modules, skipping the directory scan.
    pub fn load_modules(&self, modules: &[LoadedModule], figment: &Figment) -> CapabilityRegistry {
        self.register(&self.host_context(), modules, figment)
    }

    fn register(
        &self,
        host: &HostContext,
        modules: &[LoadedModule],
        figment: &Figment,
    ) -> CapabilityRegistry {
        let registrations = CapabilityRegistrar::new(host).register(modules);

        if self.settings_contracts.is_empty() {
            warn!("no settings contracts requested, capabilities get no settings");
        }

        let resolver = SettingsResolver::new(figment);
        let mut store = SettingsStore::new();
        let mut attempted: HashSet<&'static str> = HashSet::new();
        for &contract in &self.settings_contracts {
            for registration in registrations.iter().filter(|r| r.contract() == contract) {
                let Some(spec) = registration.capability.settings() else {
                    continue;
                };
                if !attempted.insert(spec.section()) {
                    continue;
                }
                if let Some(resolved) = resolver.resolve(spec) {
                    store.insert(resolved);
                }
            }
            info!(%contract, "plugin settings loading completed");
        }

        let mut registry = CapabilityRegistry::new();
        for registration in registrations {
            let settings = match registration.capability.settings() {
                Some(spec) if self.settings_contracts.contains(&registration.contract()) => {
                    store.get(spec.section()).cloned()
                }
                _ => None,
            };
            registry.push(&registration.module, registration.capability, settings);
        }
        registry.set_settings(store);
        registry
    }
}
