// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shelf file server.
//!
//! This crate provides the extension-point contracts, the error type, and the
//! [`StoredFile`] model used throughout the workspace. Every extension module
//! implements traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShelfError;
pub use types::{BoxedStream, ContractKind, FileStream, StoredFile};

// Re-export all contracts at crate root.
pub use traits::{ContentTypeResolver, FileSource, NamedSettings, PluginSettings, Transformer};
