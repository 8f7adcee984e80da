// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings contracts for plugin capabilities.

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ShelfError;

/// A settings record attached to a plugin capability.
pub trait PluginSettings: Any + Send + Sync + fmt::Debug {
    /// Check the settings for problems.
    ///
    /// Appends human-readable problems to `errors` and returns whether the
    /// record is usable. Never panics.
    fn verify(&self, errors: &mut Vec<String>) -> bool;
}

/// A settings type bound from the configuration section named [`SECTION`](Self::SECTION).
pub trait NamedSettings: PluginSettings + DeserializeOwned + Default + Sized {
    /// Configuration section key; by convention the settings type's name.
    const SECTION: &'static str;

    /// Generate the settings used when the section is absent or unbindable.
    fn generate() -> Result<Self, ShelfError> {
        Ok(Self::default())
    }
}
