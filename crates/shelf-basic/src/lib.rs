// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built-in `shelf-basic` extension module.
//!
//! Provides the `FileSystem` file source and the `ImageResize` transformer.
//! Activate it with a manifest whose `entry` is [`MODULE_NAME`].

pub mod filesystem;
pub mod image_resize;

use std::sync::Arc;

use shelf_core::ShelfError;
use shelf_plugin::{Capability, ExtensionModule, HostContext};

pub use filesystem::{FileSystemSource, FileSystemSourceSettings};
pub use image_resize::{ImageResizeSettings, ImageResizeTransformer};

/// Entry-point name manifests use to activate this module.
pub const MODULE_NAME: &str = "shelf-basic";

/// The built-in module.
#[derive(Debug, Default)]
pub struct BasicModule;

/// The built-in module, ready to link into a [`ModuleTable`](shelf_plugin::ModuleTable).
pub fn module() -> Arc<dyn ExtensionModule> {
    Arc::new(BasicModule)
}

impl ExtensionModule for BasicModule {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::parse(env!("CARGO_PKG_VERSION"))
            .unwrap_or_else(|_| semver::Version::new(0, 0, 0))
    }

    fn capabilities(&self, _host: &HostContext) -> Result<Vec<Capability>, ShelfError> {
        Ok(vec![
            Capability::file_source::<FileSystemSourceSettings, _, _>(
                FileSystemSource::NAME,
                FileSystemSource::new,
            ),
            Capability::transformer::<ImageResizeSettings, _, _>(
                ImageResizeTransformer::NAME,
                ImageResizeTransformer::new,
            ),
        ])
    }
}
