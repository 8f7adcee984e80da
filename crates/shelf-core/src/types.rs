// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the contracts and the dispatcher.

use std::fmt;
use std::io::SeekFrom;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::error::ShelfError;

/// Identifies an extension-point contract a plugin capability implements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ContractKind {
    FileSource,
    Transformer,
}

/// A readable, seekable byte stream owned by a [`StoredFile`].
pub trait FileStream: AsyncRead + AsyncSeek + Send + Unpin {}

impl<T> FileStream for T where T: AsyncRead + AsyncSeek + Send + Unpin + ?Sized {}

/// Boxed stream as held by a [`StoredFile`].
pub type BoxedStream = Box<dyn FileStream>;

/// A located file travelling through the dispatch pipeline.
///
/// The file owns at most one stream. Ownership moves explicitly:
/// [`take_stream`](Self::take_stream) leaves the file empty and
/// [`give_stream`](Self::give_stream) refuses to overwrite a live stream,
/// so a replaced stream is always dropped by whoever took it.
pub struct StoredFile {
    location: String,
    stream: Option<BoxedStream>,
}

impl StoredFile {
    /// Create a stored file from a backend location and its stream.
    ///
    /// Fails when `location` is blank.
    pub fn new(location: impl Into<String>, stream: BoxedStream) -> Result<Self, ShelfError> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ShelfError::InvalidFile(
                "location must not be empty".to_string(),
            ));
        }
        Ok(Self {
            location,
            stream: Some(stream),
        })
    }

    /// Convenience constructor for an in-memory file.
    pub fn from_bytes(location: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ShelfError> {
        Self::new(location, Box::new(std::io::Cursor::new(bytes)))
    }

    /// The backend-specific location of this file.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Final path segment of the location.
    pub fn name(&self) -> &str {
        Path::new(&self.location)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.location)
    }

    /// Lower-cased extension of the location including the leading dot,
    /// or an empty string when the location has none.
    pub fn extension(&self) -> String {
        Path::new(&self.location)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }

    /// Whether the file currently owns a stream.
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Move the stream out, leaving the file empty.
    pub fn take_stream(&mut self) -> Option<BoxedStream> {
        self.stream.take()
    }

    /// Install a stream into an empty file.
    ///
    /// Fails with [`ShelfError::StreamOccupied`] while a stream is still held;
    /// the caller must take the previous stream first.
    pub fn give_stream(&mut self, stream: BoxedStream) -> Result<(), ShelfError> {
        if self.stream.is_some() {
            return Err(ShelfError::StreamOccupied);
        }
        self.stream = Some(stream);
        Ok(())
    }

    /// Release the current stream and install `stream` in its place.
    ///
    /// The previous stream is returned so its release is visible to the caller.
    pub fn replace_stream(&mut self, stream: BoxedStream) -> Option<BoxedStream> {
        let previous = self.stream.take();
        self.stream = Some(stream);
        previous
    }

    /// Borrow the live stream.
    pub fn stream_mut(&mut self) -> Result<&mut BoxedStream, ShelfError> {
        self.stream.as_mut().ok_or(ShelfError::StreamMissing)
    }

    /// Seek the live stream back to its first byte.
    pub async fn rewind(&mut self) -> Result<(), ShelfError> {
        self.stream_mut()?.seek(SeekFrom::Start(0)).await?;
        Ok(())
    }

    /// Read the remaining content of the live stream into memory.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>, ShelfError> {
        let mut buf = Vec::new();
        self.stream_mut()?.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Consume the file and hand its stream to the response writer.
    pub fn into_stream(mut self) -> Result<BoxedStream, ShelfError> {
        self.stream.take().ok_or(ShelfError::StreamMissing)
    }
}

impl fmt::Debug for StoredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredFile")
            .field("location", &self.location)
            .field("has_stream", &self.stream.is_some())
            .finish()
    }
}
