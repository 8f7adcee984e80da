// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal dispatch failures.

use shelf_core::ShelfError;
use thiserror::Error;

/// Why a request could not be served.
///
/// The display text of `NotFound` and `Untyped` is sent to clients as is.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested name was empty or whitespace.
    #[error("Invalid file name passed")]
    BadRequest,

    /// No file source produced the cleaned name.
    #[error("No file found for {requested} ({cleaned})")]
    NotFound { requested: String, cleaned: String },

    /// No content type is known for the requested name.
    #[error("No content type found for {requested} ({cleaned})")]
    Untyped { requested: String, cleaned: String },

    /// The pipeline broke an invariant, e.g. a transformer lost the stream.
    #[error("internal dispatch error: {0}")]
    Internal(#[source] ShelfError),
}

impl From<DispatchError> for ShelfError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::BadRequest => ShelfError::InvalidFile("blank file name".to_string()),
            DispatchError::NotFound { requested, cleaned } => {
                ShelfError::SourceNotFound { requested, cleaned }
            }
            DispatchError::Untyped { requested, cleaned } => {
                ShelfError::ContentTypeUnresolved { requested, cleaned }
            }
            DispatchError::Internal(inner) => inner,
        }
    }
}
