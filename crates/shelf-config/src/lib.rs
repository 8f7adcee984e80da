// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Shelf file server.
//!
//! Provides TOML configuration parsing with strict validation of host
//! sections, XDG file hierarchy lookup, environment variable overrides, and
//! miette diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use shelf_config::load_and_validate;
//!
//! let loaded = load_and_validate(None).expect("config errors");
//! println!("listening on port {}", loaded.config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

use figment::Figment;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{build_figment, figment_from_str, load_config, load_config_from_str};
pub use model::ShelfConfig;

/// A validated configuration plus the merged Figment it was extracted from.
///
/// The Figment is kept so plugin settings sections can be bound by name once
/// the plugin settings types are known.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ShelfConfig,
    pub figment: Figment,
}

/// Load configuration from the XDG hierarchy (plus `explicit`) and validate it.
///
/// Returns either a valid configuration or every diagnostic collected.
pub fn load_and_validate(explicit: Option<&Path>) -> Result<LoadedConfig, Vec<ConfigError>> {
    let figment = loader::build_figment(explicit);
    extract_and_validate(figment, || collect_toml_sources(explicit))
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<LoadedConfig, Vec<ConfigError>> {
    let figment = loader::figment_from_str(toml_content);
    extract_and_validate(figment, || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn extract_and_validate(
    figment: Figment,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<LoadedConfig, Vec<ConfigError>> {
    match figment.extract::<ShelfConfig>() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(LoadedConfig { config, figment })
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/shelf/shelf.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("shelf/shelf.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("shelf.toml"));
    }
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
