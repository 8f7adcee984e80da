// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transformer contract for in-flight content modification.

use async_trait::async_trait;

use crate::error::ShelfError;
use crate::types::StoredFile;

/// Modifies a located file before it is served (resizing images, rewriting text, ...).
///
/// The dispatcher calls [`clean_name`](Self::clean_name) on every transformer
/// before any source lookup, then [`matches`](Self::matches) with the
/// *original* requested name once the file is located. The two are not called
/// in a coupled way: `matches` must re-derive its own condition.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Unique name of this transformer.
    fn name(&self) -> &str;

    /// Whether this transformer applies to the requested name and located file.
    fn matches(&self, file_name: &str, file: &StoredFile) -> bool;

    /// Strip this transformer's marker from a requested name.
    ///
    /// Must be pure; names without the marker are returned unchanged.
    fn clean_name(&self, file_name: &str) -> String;

    /// Transform the file in place, usually by replacing its stream.
    ///
    /// On error the file must still own a stream with its previous content.
    async fn transform(&self, file_name: &str, file: &mut StoredFile) -> Result<(), ShelfError>;
}
