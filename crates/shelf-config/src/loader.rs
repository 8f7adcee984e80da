// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shelf.toml` > `~/.config/shelf/shelf.toml` > `/etc/shelf/shelf.toml`
//! with environment variable overrides via `SHELF_` prefix.
//!
//! The merged [`Figment`] is kept alongside the extracted [`ShelfConfig`]
//! because plugin settings sections are bound from it after plugin discovery.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShelfConfig;

/// Build the layered Figment.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shelf/shelf.toml` (system-wide)
/// 3. `~/.config/shelf/shelf.toml` (user XDG config)
/// 4. `./shelf.toml` (local directory)
/// 5. `explicit` path, when given
/// 6. `SHELF_*` environment variables
pub fn build_figment(explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::file("/etc/shelf/shelf.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("shelf/shelf.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("shelf.toml"));

    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }

    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<ShelfConfig, figment::Error> {
    build_figment(explicit).extract()
}

/// Build a Figment from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn figment_from_str(toml_content: &str) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShelfConfig::default()))
        .merge(Toml::string(toml_content))
}

/// Load configuration from a TOML string only.
pub fn load_config_from_str(toml_content: &str) -> Result<ShelfConfig, figment::Error> {
    figment_from_str(toml_content).extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys survive: `SHELF_PLUGINS_EXCLUDE_PATTERNS` maps to
/// `plugins.exclude_patterns`, not `plugins.exclude.patterns`.
fn env_provider() -> Env {
    Env::prefixed("SHELF_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("logging_", "logging.", 1)
            .replacen("plugins_", "plugins.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SHELF_SERVER_PORT", "9191");
            jail.set_env("SHELF_LOGGING_LEVEL", "debug");
            let config: ShelfConfig = build_figment(None).extract()?;
            assert_eq!(config.server.port, 9191);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn local_file_and_explicit_path_are_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("shelf.toml", "[server]\nport = 7000\nhost = \"0.0.0.0\"\n")?;
            jail.create_file("override.toml", "[server]\nport = 7001\n")?;
            let config: ShelfConfig =
                build_figment(Some(Path::new("override.toml"))).extract()?;
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 7001);
            Ok(())
        });
    }

    #[test]
    fn figment_keeps_plugin_sections() {
        let figment = figment_from_str("[ImageResizeSettings]\ntarget_width = 64\n");
        assert!(figment.contains("ImageResizeSettings"));
        let width: u32 = figment
            .extract_inner("ImageResizeSettings.target_width")
            .unwrap();
        assert_eq!(width, 64);
    }
}
