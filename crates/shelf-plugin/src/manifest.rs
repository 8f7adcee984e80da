// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `*.plugin.toml` files.
//!
//! A manifest activates one linked extension module: its `entry` names the
//! module in the [`ModuleTable`](crate::module::ModuleTable).

use serde::{Deserialize, Serialize};
use shelf_core::ShelfError;

/// File-name suffix identifying candidate manifests during a directory scan.
pub const MANIFEST_SUFFIX: &str = ".plugin.toml";

/// Parsed plugin manifest describing one extension module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Display name of the plugin (e.g., "basic").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Entry point: the key of the linked module this manifest activates.
    pub entry: String,
    /// Optional author identifier.
    pub author: Option<String>,
    /// Minimum host version required (e.g., "0.1.0").
    pub min_host_version: Option<String>,
}

/// Intermediate TOML deserialization struct for `*.plugin.toml`.
#[derive(Debug, Deserialize)]
struct PluginManifestFile {
    plugin: PluginSection,
}

/// The `[plugin]` section of a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    entry: String,
    author: Option<String>,
    min_host_version: Option<String>,
}

/// Parse a plugin manifest from TOML content.
///
/// Validates that name and entry are non-empty and that the version fields
/// are valid semantic versions.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginManifest, ShelfError> {
    let file: PluginManifestFile = toml::from_str(toml_content)
        .map_err(|e| ShelfError::Config(format!("invalid plugin manifest: {e}")))?;

    let section = file.plugin;

    if section.name.trim().is_empty() {
        return Err(ShelfError::Config(
            "plugin manifest: name must not be empty".to_string(),
        ));
    }

    if section.entry.trim().is_empty() {
        return Err(ShelfError::Config(
            "plugin manifest: entry must not be empty".to_string(),
        ));
    }

    semver::Version::parse(&section.version).map_err(|e| {
        ShelfError::Config(format!(
            "plugin manifest: version '{}' is not a semantic version: {e}",
            section.version
        ))
    })?;

    if let Some(min) = &section.min_host_version {
        semver::Version::parse(min).map_err(|e| {
            ShelfError::Config(format!(
                "plugin manifest: min_host_version '{min}' is not a semantic version: {e}"
            ))
        })?;
    }

    Ok(PluginManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        entry: section.entry,
        author: section.author,
        min_host_version: section.min_host_version,
    })
}

/// Whether a file name looks like a plugin manifest.
pub fn is_manifest_file_name(file_name: &str) -> bool {
    file_name.len() > MANIFEST_SUFFIX.len()
        && file_name.to_lowercase().ends_with(MANIFEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
[plugin]
name = "basic"
version = "0.1.0"
description = "Filesystem source and image resize transformer"
entry = "shelf-basic"
author = "Shelf Contributors"
min_host_version = "0.1.0"
"#;
        let manifest = parse_plugin_manifest(toml).unwrap();
        assert_eq!(manifest.name, "basic");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.entry, "shelf-basic");
        assert_eq!(manifest.author.as_deref(), Some("Shelf Contributors"));
        assert_eq!(manifest.min_host_version.as_deref(), Some("0.1.0"));
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[plugin]
name = "minimal"
version = "1.0.0"
entry = "minimal-module"
"#;
        let manifest = parse_plugin_manifest(toml).unwrap();
        assert!(manifest.description.is_empty());
        assert!(manifest.author.is_none());
        assert!(manifest.min_host_version.is_none());
    }

    #[test]
    fn parse_missing_entry() {
        let toml = r#"
[plugin]
name = "x"
version = "0.1.0"
entry = ""
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("entry must not be empty"));
    }

    #[test]
    fn parse_empty_name() {
        let toml = r#"
[plugin]
name = ""
version = "0.1.0"
entry = "e"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("name must not be empty"));
    }

    #[test]
    fn parse_bad_version() {
        let toml = r#"
[plugin]
name = "x"
version = "one"
entry = "e"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("not a semantic version"));
    }

    #[test]
    fn parse_unknown_key_is_rejected() {
        let toml = r#"
[plugin]
name = "x"
version = "0.1.0"
entry = "e"
entrypoint = "typo"
"#;
        assert!(parse_plugin_manifest(toml).is_err());
    }

    #[test]
    fn parse_garbage_is_rejected() {
        let err = parse_plugin_manifest("\u{0}\u{1}not toml").unwrap_err().to_string();
        assert!(err.contains("invalid plugin manifest"));
    }

    #[test]
    fn manifest_file_names() {
        assert!(is_manifest_file_name("basic.plugin.toml"));
        assert!(is_manifest_file_name("Basic.Plugin.TOML"));
        assert!(!is_manifest_file_name(".plugin.toml"));
        assert!(!is_manifest_file_name("shelf.toml"));
        assert!(!is_manifest_file_name("basic.plugin.toml.bak"));
    }
}
