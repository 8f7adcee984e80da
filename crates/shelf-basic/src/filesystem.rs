// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File source reading from a base directory on the local filesystem.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelf_core::{FileSource, NamedSettings, PluginSettings, StoredFile};
use tracing::{debug, error, warn};

/// Settings for [`FileSystemSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSystemSourceSettings {
    /// Directory requested names are resolved against.
    pub base_directory: String,
}

impl Default for FileSystemSourceSettings {
    fn default() -> Self {
        Self {
            base_directory: "/files".to_string(),
        }
    }
}

impl PluginSettings for FileSystemSourceSettings {
    fn verify(&self, errors: &mut Vec<String>) -> bool {
        if self.base_directory.trim().is_empty() {
            errors.push("No base directory given".to_string());
            return false;
        }
        true
    }
}

impl NamedSettings for FileSystemSourceSettings {
    const SECTION: &'static str = "FileSystemSourceSettings";
}

/// Opens `<base_directory>/<file_name>` read-only.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    settings: Arc<FileSystemSourceSettings>,
}

impl FileSystemSource {
    pub const NAME: &'static str = "FileSystem";

    /// Build a source; unresolved settings fall back to the defaults.
    pub fn new(settings: Option<Arc<FileSystemSourceSettings>>) -> Self {
        Self {
            settings: settings.unwrap_or_default(),
        }
    }

    pub fn settings(&self) -> &FileSystemSourceSettings {
        &self.settings
    }

    /// Path for a requested name, or `None` if the name escapes the base directory.
    fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        let relative = Path::new(file_name);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            warn!(file = %file_name, "refusing path outside the base directory");
            return None;
        }
        Some(Path::new(&self.settings.base_directory).join(relative))
    }
}

#[async_trait]
impl FileSource for FileSystemSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn get_file(&self, file_name: &str) -> Option<StoredFile> {
        debug!(file = %file_name, "getting file from filesystem");
        let path = self.resolve(file_name)?;

        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "file not found");
                return None;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "unable to open file");
                return None;
            }
        };

        match file.metadata().await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                debug!(path = %path.display(), "not a regular file");
                return None;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "unable to stat file");
                return None;
            }
        }

        StoredFile::new(path.display().to_string(), Box::new(file))
            .inspect_err(|e| error!(path = %path.display(), error = %e, "invalid stored file"))
            .ok()
    }
}
