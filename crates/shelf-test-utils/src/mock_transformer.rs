// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker-driven mock transformer.
//!
//! A `MockTransformer` applies to names whose stem ends with its marker
//! (`notes_upper.txt` for marker `_upper`) and cleans the marker away, the
//! same convention the image resize transformer uses.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::sync::Mutex;

use shelf_core::{ShelfError, StoredFile, Transformer};
use shelf_plugin::Capability;

/// What the transformer does when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Replace the content with its ASCII uppercase form.
    Uppercase,
    /// Read the content, give it back untouched, and return an error.
    Fail,
    /// Take the stream and never give it back.
    DropStream,
}

#[derive(Clone)]
pub struct MockTransformer {
    name: String,
    marker: String,
    behavior: MockBehavior,
    applied: Arc<Mutex<Vec<String>>>,
}

impl MockTransformer {
    /// An uppercasing transformer keyed on `marker`.
    pub fn new(name: &str, marker: &str) -> Self {
        Self::with_behavior(name, marker, MockBehavior::Uppercase)
    }

    /// A transformer that always fails after restoring the content.
    pub fn failing(name: &str, marker: &str) -> Self {
        Self::with_behavior(name, marker, MockBehavior::Fail)
    }

    pub fn with_behavior(name: &str, marker: &str, behavior: MockBehavior) -> Self {
        Self {
            name: name.to_string(),
            marker: marker.to_string(),
            behavior,
            applied: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Names `transform` was called with, in call order.
    pub async fn applied(&self) -> Vec<String> {
        self.applied.lock().await.clone()
    }

    /// Capability constructing a clone of this transformer.
    pub fn capability(&self) -> Capability {
        let transformer = self.clone();
        Capability::plain_transformer(self.name.clone(), move || transformer.clone())
    }

    fn split<'a>(&self, file_name: &'a str) -> (&'a str, &'a str) {
        match file_name.rfind('.') {
            Some(dot) => file_name.split_at(dot),
            None => (file_name, ""),
        }
    }
}

#[async_trait]
impl Transformer for MockTransformer {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, file_name: &str, _file: &StoredFile) -> bool {
        let (stem, _) = self.split(file_name);
        stem.ends_with(&self.marker)
    }

    fn clean_name(&self, file_name: &str) -> String {
        let (stem, extension) = self.split(file_name);
        match stem.strip_suffix(&self.marker) {
            Some(clean) => format!("{clean}{extension}"),
            None => file_name.to_string(),
        }
    }

    async fn transform(&self, file_name: &str, file: &mut StoredFile) -> Result<(), ShelfError> {
        self.applied.lock().await.push(file_name.to_string());

        let mut stream = file.take_stream().ok_or(ShelfError::StreamMissing)?;
        if self.behavior == MockBehavior::DropStream {
            return Ok(());
        }

        let mut content = Vec::new();
        stream.read_to_end(&mut content).await?;
        drop(stream);

        match self.behavior {
            MockBehavior::Uppercase => {
                file.give_stream(Box::new(Cursor::new(content.to_ascii_uppercase())))
            }
            _ => {
                file.give_stream(Box::new(Cursor::new(content)))?;
                Err(ShelfError::Transform {
                    transformer: self.name.clone(),
                    message: "scripted failure".to_string(),
                })
            }
        }
    }
}
