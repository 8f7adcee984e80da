// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory file source for deterministic testing.
//!
//! `MockSource` serves a fixed set of files and records every name it was
//! asked for. Clones share the request log, so a test keeps one handle while
//! the registry builds fresh instances per request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shelf_core::{FileSource, StoredFile};
use shelf_plugin::Capability;

/// A mock file source backed by a map of name to content.
#[derive(Clone)]
pub struct MockSource {
    name: String,
    files: Arc<HashMap<String, Vec<u8>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    /// Create a source serving nothing.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: Arc::new(HashMap::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `content` under `file_name`.
    pub fn with_file(mut self, file_name: &str, content: impl Into<Vec<u8>>) -> Self {
        Arc::make_mut(&mut self.files).insert(file_name.to_string(), content.into());
        self
    }

    /// Names passed to `get_file`, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Capability constructing a clone of this source.
    pub fn capability(&self) -> Capability {
        let source = self.clone();
        Capability::plain_file_source(self.name.clone(), move || source.clone())
    }
}

#[async_trait]
impl FileSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_file(&self, file_name: &str) -> Option<StoredFile> {
        self.requests.lock().await.push(file_name.to_string());
        let content = self.files.get(file_name)?;
        StoredFile::from_bytes(format!("mock://{}/{file_name}", self.name), content.clone()).ok()
    }
}
