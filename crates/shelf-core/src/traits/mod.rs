// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contract definitions for the Shelf plugin architecture.
//!
//! Extension modules provide implementations of [`FileSource`] and
//! [`Transformer`]. Both use `#[async_trait]` for dynamic dispatch.

pub mod content_type;
pub mod file_source;
pub mod settings;
pub mod transformer;

pub use content_type::ContentTypeResolver;
pub use file_source::FileSource;
pub use settings::{NamedSettings, PluginSettings};
pub use transformer::Transformer;
