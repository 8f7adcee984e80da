// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Shelf file server.

use thiserror::Error;

/// The primary error type shared by the plugin system, the contracts, and the dispatcher.
///
/// Only `SourceNotFound` and `ContentTypeUnresolved` ever reach an HTTP client;
/// every other variant is recovered where it happens and reported through logs.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A candidate extension module could not be loaded.
    #[error("failed to load module {path}: {reason}")]
    ModuleLoad { path: String, reason: String },

    /// A loaded module failed while enumerating its capabilities for one contract.
    #[error("cannot enumerate {contract} capabilities of module {module}: {message}")]
    CapabilityEnumeration {
        module: String,
        contract: String,
        message: String,
    },

    /// A settings section was present but could not be bound to its settings type.
    #[error("settings section `{section}` could not be bound: {message}")]
    SettingsBind { section: String, message: String },

    /// Default settings could not be generated for a settings type.
    #[error("default settings for `{section}` could not be generated: {message}")]
    SettingsDefault { section: String, message: String },

    /// No file source produced the requested file.
    #[error("No file found for {requested} ({cleaned})")]
    SourceNotFound { requested: String, cleaned: String },

    /// A transformer failed to transform a file.
    #[error("transformer {transformer} failed: {message}")]
    Transform {
        transformer: String,
        message: String,
    },

    /// No content type could be determined for the requested name.
    #[error("No content type found for {requested} ({cleaned})")]
    ContentTypeUnresolved { requested: String, cleaned: String },

    /// A stored file was constructed with invalid metadata.
    #[error("invalid stored file: {0}")]
    InvalidFile(String),

    /// A stream was handed to a stored file that still owns a live stream.
    #[error("stored file already owns a stream; take it before giving a new one")]
    StreamOccupied,

    /// The stored file has no stream (it was taken and not given back).
    #[error("stored file has no stream")]
    StreamMissing,

    /// Wrapped I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
