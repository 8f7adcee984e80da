// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shelf file server.
//!
//! Host sections use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! keys at startup. The root struct does not: any other top-level section is a
//! plugin settings section, keyed by the settings type's name, and is bound
//! later by the plugin settings resolver.

use serde::{Deserialize, Serialize};

/// Plugin directory scanned when none is configured.
pub const DEFAULT_PLUGIN_DIRECTORY: &str = "plugins";

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level Shelf configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin discovery configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directories scanned recursively for plugin manifests.
    /// Empty means [`DEFAULT_PLUGIN_DIRECTORY`].
    #[serde(default)]
    pub directories: Vec<String>,

    /// Regular expressions matched against candidate file names; matches are not loaded.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl PluginsConfig {
    /// The directories to scan, falling back to the default directory.
    pub fn effective_directories(&self) -> Vec<String> {
        if self.directories.is_empty() {
            vec![DEFAULT_PLUGIN_DIRECTORY.to_string()]
        } else {
            self.directories.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directories_fall_back_to_default() {
        let plugins = PluginsConfig::default();
        assert_eq!(plugins.effective_directories(), vec!["plugins"]);
    }

    #[test]
    fn configured_directories_are_kept_in_order() {
        let plugins = PluginsConfig {
            directories: vec!["/opt/shelf/plugins".into(), "extra".into()],
            exclude_patterns: vec![],
        };
        assert_eq!(
            plugins.effective_directories(),
            vec!["/opt/shelf/plugins", "extra"]
        );
    }

    #[test]
    fn plugin_sections_are_accepted_at_top_level() {
        let toml_str = r#"
[server]
port = 9000

[FileSystemSourceSettings]
base_directory = "/srv/files"
"#;
        let config: ShelfConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn host_sections_deny_unknown_fields() {
        let toml_str = r#"
[plugins]
directorys = ["x"]
"#;
        assert!(toml::from_str::<ShelfConfig>(toml_str).is_err());
    }
}
