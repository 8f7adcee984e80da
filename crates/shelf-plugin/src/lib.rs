// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin system: module discovery, capability registration, and settings.
//!
//! Extension modules are linked into the host and listed in a
//! [`ModuleTable`]. A `*.plugin.toml` manifest found in a plugin directory
//! activates one of them. The [`PluginBuilder`] scans the directories,
//! registers the capabilities of every activated module, resolves their
//! settings, and produces the [`CapabilityRegistry`] the dispatcher reads.

pub mod builder;
pub mod manifest;
pub mod module;
pub mod registrar;
pub mod registry;
pub mod scanner;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use builder::PluginBuilder;
pub use manifest::{PluginManifest, parse_plugin_manifest};
pub use module::{Capability, ExtensionModule, HostContext, ModuleTable, host_version};
pub use registry::{
    CapabilityDescriptor, CapabilityRegistry, CapabilitySummary, FileSourceDescriptor,
    SettingsState, TransformerDescriptor,
};
pub use scanner::LoadedModule;
pub use settings::{ResolvedSettings, SettingsOrigin, SettingsStore};
