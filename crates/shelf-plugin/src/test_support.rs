// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small capabilities and modules shared by this crate's unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shelf_core::{
    FileSource, NamedSettings, PluginSettings, ShelfError, StoredFile, Transformer,
};

use crate::module::{Capability, ExtensionModule, HostContext};

#[derive(Debug, Clone, Deserialize)]
pub struct EchoSettings {
    pub prefix: String,
}

impl Default for EchoSettings {
    fn default() -> Self {
        Self {
            prefix: "echo".to_string(),
        }
    }
}

impl PluginSettings for EchoSettings {
    fn verify(&self, errors: &mut Vec<String>) -> bool {
        if self.prefix.is_empty() {
            errors.push("prefix must not be empty".to_string());
            return false;
        }
        true
    }
}

impl NamedSettings for EchoSettings {
    const SECTION: &'static str = "EchoSettings";
}

#[derive(Debug, Default, Deserialize)]
pub struct BrokenSettings {}

impl PluginSettings for BrokenSettings {
    fn verify(&self, _errors: &mut Vec<String>) -> bool {
        true
    }
}

impl NamedSettings for BrokenSettings {
    const SECTION: &'static str = "BrokenSettings";

    fn generate() -> Result<Self, ShelfError> {
        Err(ShelfError::Internal("no defaults available".to_string()))
    }
}

/// Serves every name with its own name as content.
#[derive(Debug)]
pub struct EchoSource {
    name: String,
}

impl EchoSource {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn from_settings(settings: Option<Arc<EchoSettings>>) -> Self {
        match settings {
            Some(settings) => Self::named(&settings.prefix),
            None => Self::default(),
        }
    }
}

impl Default for EchoSource {
    fn default() -> Self {
        Self::named("echo")
    }
}

#[async_trait]
impl FileSource for EchoSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_file(&self, file_name: &str) -> Option<StoredFile> {
        StoredFile::from_bytes(file_name, file_name.as_bytes().to_vec()).ok()
    }
}

#[derive(Debug, Default)]
pub struct UpperTransformer;

#[async_trait]
impl Transformer for UpperTransformer {
    fn name(&self) -> &str {
        "Upper"
    }

    fn matches(&self, _file_name: &str, _file: &StoredFile) -> bool {
        true
    }

    fn clean_name(&self, file_name: &str) -> String {
        file_name.to_string()
    }

    async fn transform(&self, _file_name: &str, file: &mut StoredFile) -> Result<(), ShelfError> {
        let bytes = file.read_to_end().await?;
        file.replace_stream(Box::new(std::io::Cursor::new(bytes.to_ascii_uppercase())));
        Ok(())
    }
}

pub fn echo_source(name: &str) -> Capability {
    Capability::file_source::<EchoSettings, _, _>(name, EchoSource::from_settings)
}

pub fn upper_transformer(name: &str) -> Capability {
    Capability::plain_transformer(name, UpperTransformer::default)
}

/// A module declaring a fixed capability list.
pub struct NamedModule {
    name: String,
    capabilities: Vec<Capability>,
}

impl NamedModule {
    pub fn new(name: &str, capabilities: Vec<Capability>) -> Self {
        Self {
            name: name.to_string(),
            capabilities,
        }
    }
}

impl ExtensionModule for NamedModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn capabilities(&self, _host: &HostContext) -> Result<Vec<Capability>, ShelfError> {
        Ok(self.capabilities.clone())
    }
}

/// A module whose enumeration always fails.
pub struct FailingModule {
    name: String,
}

impl ExtensionModule for FailingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn capabilities(&self, _host: &HostContext) -> Result<Vec<Capability>, ShelfError> {
        Err(ShelfError::Internal("enumeration exploded".to_string()))
    }
}

pub fn failing_module(name: &str) -> FailingModule {
    FailingModule {
        name: name.to_string(),
    }
}

/// Manifest text activating `entry`.
pub fn manifest(name: &str, entry: &str) -> String {
    format!("[plugin]\nname = \"{name}\"\nversion = \"0.1.0\"\nentry = \"{entry}\"\n")
}
