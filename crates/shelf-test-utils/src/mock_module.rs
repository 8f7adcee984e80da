// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock extension module.

use shelf_core::ShelfError;
use shelf_plugin::{Capability, ExtensionModule, HostContext};

/// An extension module declaring whatever capabilities it is given.
#[derive(Debug, Clone)]
pub struct MockModule {
    name: String,
    capabilities: Vec<Capability>,
    fail: bool,
}

impl MockModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            capabilities: Vec::new(),
            fail: false,
        }
    }

    /// Declare one more capability, after the existing ones.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Make capability enumeration fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ExtensionModule for MockModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn capabilities(&self, _host: &HostContext) -> Result<Vec<Capability>, ShelfError> {
        if self.fail {
            return Err(ShelfError::Internal(format!(
                "mock module {} refuses to enumerate",
                self.name
            )));
        }
        Ok(self.capabilities.clone())
    }
}
