// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shelf serve` command implementation.
//!
//! Discovers the plugin modules activated by manifests, builds the capability
//! registry once, and serves it over HTTP until ctrl-c.

use std::sync::Arc;

use shelf_config::LoadedConfig;
use shelf_config::validation::pattern_warnings;
use shelf_core::{ContractKind, ShelfError};
use shelf_dispatch::Dispatcher;
use shelf_gateway::{AppState, ExtensionContentTypes, ServerConfig};
use shelf_plugin::{CapabilityRegistry, ModuleTable, PluginBuilder};
use tracing::{info, warn};

/// The extension modules linked into this binary.
pub fn module_table() -> ModuleTable {
    #[allow(unused_mut)]
    let mut table = ModuleTable::new();

    #[cfg(feature = "basic")]
    table.register(shelf_basic::module());

    table
}

/// Scan the configured plugin directories and build the registry.
pub fn build_registry(loaded: &LoadedConfig, table: &ModuleTable) -> CapabilityRegistry {
    let plugins = &loaded.config.plugins;
    PluginBuilder::new()
        .add_plugin_directory(plugins.effective_directories())
        .add_exclusion_pattern(plugins.exclude_patterns.iter().cloned())
        .add_contract(ContractKind::FileSource)
        .add_contract(ContractKind::Transformer)
        .add_settings_contract(ContractKind::FileSource)
        .add_settings_contract(ContractKind::Transformer)
        .load(table, &loaded.figment)
}

/// Runs the `shelf serve` command.
pub async fn run_serve(loaded: LoadedConfig) -> Result<(), ShelfError> {
    info!("starting shelf serve");
    for warning in pattern_warnings(&loaded.config) {
        warn!("{warning}");
    }

    let table = module_table();
    info!(linked = ?table.names(), "extension modules linked");

    let registry = Arc::new(build_registry(&loaded, &table));
    if registry.is_empty() {
        warn!("no capabilities registered, every request will be answered with 404");
    }

    let dispatcher = Dispatcher::new(registry, Arc::new(ExtensionContentTypes::new()));
    let server = ServerConfig {
        host: loaded.config.server.host.clone(),
        port: loaded.config.server.port,
    };

    shelf_gateway::start_server(&server, AppState::new(dispatcher), shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "cannot listen for ctrl-c, shutting down"),
    }
}
