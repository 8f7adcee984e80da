// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File source contract for storage backends (filesystem, object stores, etc.).

use async_trait::async_trait;

use crate::types::StoredFile;

/// A named lookup over an opaque storage backend.
///
/// Sources are consulted in registration order and the first one returning
/// `Some` wins. A source absorbs its own failures (I/O, permissions) and
/// reports them as `None` so later sources still get their turn.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Unique name of this source.
    fn name(&self) -> &str;

    /// Locate `file_name` and open it for reading.
    async fn get_file(&self, file_name: &str) -> Option<StoredFile>;
}
