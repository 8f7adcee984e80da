// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory scanning for plugin manifests.
//!
//! Every configured directory is walked recursively in file-name order.
//! Each `*.plugin.toml` found is a candidate: it is skipped when its name
//! carries a host-reserved prefix or matches an exclusion pattern, and
//! otherwise activates the linked module its `entry` names. A candidate that
//! fails to load is logged and skipped; the scan never fails as a whole.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use shelf_core::ShelfError;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::manifest::{PluginManifest, is_manifest_file_name, parse_plugin_manifest};
use crate::module::{ExtensionModule, HostContext, ModuleTable};

/// File-name prefixes reserved for host-owned files; never loaded as plugins.
pub const RESERVED_PREFIXES: &[&str] = &["host.", "system.", "shelf."];

/// A module activated by a manifest.
#[derive(Clone)]
pub struct LoadedModule {
    pub manifest: PluginManifest,
    /// Manifest path; `None` for modules registered without a scan.
    pub path: Option<PathBuf>,
    pub module: Arc<dyn ExtensionModule>,
}

impl LoadedModule {
    /// Activate a linked module directly, without a manifest on disk.
    pub fn linked(module: Arc<dyn ExtensionModule>) -> Self {
        let manifest = PluginManifest {
            name: module.name().to_string(),
            version: module.version().to_string(),
            description: String::new(),
            entry: module.name().to_string(),
            author: None,
            min_host_version: None,
        };
        Self {
            manifest,
            path: None,
            module,
        }
    }

    /// Entry-point name of the module.
    pub fn name(&self) -> &str {
        self.module.name()
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("manifest", &self.manifest)
            .field("path", &self.path)
            .finish()
    }
}

/// Walks plugin directories and activates modules from the [`ModuleTable`].
pub struct ModuleScanner<'a> {
    table: &'a ModuleTable,
    host: &'a HostContext,
    exclusions: Vec<Regex>,
}

impl<'a> ModuleScanner<'a> {
    /// Create a scanner. Malformed exclusion patterns are logged and never match.
    pub fn new(table: &'a ModuleTable, host: &'a HostContext, exclusions: &[String]) -> Self {
        let exclusions = exclusions
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    error!(pattern = %pattern, error = %e, "invalid exclusion pattern, ignoring it");
                    None
                }
            })
            .collect();
        Self {
            table,
            host,
            exclusions,
        }
    }

    /// Scan every directory in order and return the activated modules.
    ///
    /// The result follows discovery order: directory order, then file-name order.
    pub fn scan(&self, directories: &[String]) -> Vec<LoadedModule> {
        if directories.is_empty() {
            warn!("no plugin directories configured");
            return Vec::new();
        }

        let mut loaded = Vec::new();
        for directory in directories {
            let Some(root) = resolve_directory(directory) else {
                warn!(directory = %directory, "plugin directory not found");
                continue;
            };

            let before = loaded.len();
            self.scan_directory(&root, &mut loaded);
            info!(
                directory = %root.display(),
                modules = loaded.len() - before,
                "plugin directory scanned"
            );
        }
        loaded
    }

    fn scan_directory(&self, root: &Path, loaded: &mut Vec<LoadedModule>) {
        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file());

        for entry in entries {
            let file_name = entry.file_name().to_string_lossy();
            if !is_manifest_file_name(&file_name) {
                continue;
            }
            if is_reserved(&file_name) {
                debug!(file = %file_name, "skipping host-reserved file");
                continue;
            }
            if self.is_excluded(&file_name) {
                debug!(file = %file_name, "skipping excluded file");
                continue;
            }

            match self.load_candidate(entry.path()) {
                Ok(module) => {
                    debug!(
                        file = %entry.path().display(),
                        module = %module.name(),
                        "module activated"
                    );
                    loaded.push(module);
                }
                Err(e) => debug!(error = %e, "skipping plugin candidate"),
            }
        }
    }

    /// Whether any exclusion pattern matches the file name.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclusions.iter().any(|re| re.is_match(file_name))
    }

    /// Load one candidate manifest and activate its module.
    pub fn load_candidate(&self, path: &Path) -> Result<LoadedModule, ShelfError> {
        let fail = |reason: String| ShelfError::ModuleLoad {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        let manifest = parse_plugin_manifest(&content).map_err(|e| fail(e.to_string()))?;

        let module = self
            .table
            .get(&manifest.entry)
            .ok_or_else(|| fail(format!("no linked module named `{}`", manifest.entry)))?;

        if let Some(min) = &manifest.min_host_version {
            let required = semver::Version::parse(min).map_err(|e| fail(e.to_string()))?;
            if self.host.host_version < required {
                return Err(fail(format!(
                    "requires host version {required} or newer, running {}",
                    self.host.host_version
                )));
            }
        }

        let capabilities = module
            .capabilities(self.host)
            .map_err(|e| fail(e.to_string()))?;
        let usable = capabilities
            .iter()
            .filter(|c| self.host.wants(c.contract()))
            .count();
        if usable == 0 {
            return Err(fail("module provides no usable capabilities".to_string()));
        }

        Ok(LoadedModule {
            manifest,
            path: Some(path.to_path_buf()),
            module,
        })
    }
}

/// Whether a file name starts with a host-reserved prefix, ignoring case.
pub fn is_reserved(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    RESERVED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Resolve a configured directory, retrying relative to the executable's directory.
pub fn resolve_directory(directory: &str) -> Option<PathBuf> {
    let direct = PathBuf::from(directory);
    if direct.is_dir() {
        return Some(direct);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(directory)))?;
    if beside_exe.is_dir() {
        debug!(
            directory = %directory,
            resolved = %beside_exe.display(),
            "plugin directory resolved beside the executable"
        );
        Some(beside_exe)
    } else {
        None
    }
}
