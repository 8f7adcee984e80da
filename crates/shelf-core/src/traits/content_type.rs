// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-type resolution consumed by the dispatcher.

/// Resolves the content type to serve for a requested file name.
pub trait ContentTypeResolver: Send + Sync {
    /// Returns the content type for `file_name`, or `None` when it cannot be determined.
    fn content_type(&self, file_name: &str) -> Option<String>;
}
