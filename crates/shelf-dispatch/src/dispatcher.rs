// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch state machine.
//!
//! `Received -> NameCleaned -> SourceResolved -> Transforming -> ContentTyped
//! -> Responding`. Transformers are consulted twice: every transformer cleans
//! the requested name before the source lookup, and each one then decides on
//! its own, from the original name, whether to transform the located file.

use std::sync::Arc;

use shelf_core::{ContentTypeResolver, FileSource, ShelfError, StoredFile, Transformer};
use shelf_plugin::CapabilityRegistry;
use strum::Display;
use tracing::{debug, error, warn};

use crate::error::DispatchError;

/// Stages a request passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DispatchStage {
    Received,
    NameCleaned,
    SourceResolved,
    Transforming,
    ContentTyped,
    Responding,
}

/// A located, transformed, typed file ready to stream.
#[derive(Debug)]
pub struct DispatchResponse {
    pub content_type: String,
    /// Positioned at the start of its content.
    pub file: StoredFile,
    pub requested: String,
    pub cleaned: String,
}

/// Serves requested file names from the registered capabilities.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
    content_types: Arc<dyn ContentTypeResolver>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        content_types: Arc<dyn ContentTypeResolver>,
    ) -> Self {
        Self {
            registry,
            content_types,
        }
    }

    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    /// Run one request through every stage.
    #[tracing::instrument(name = "dispatch", skip(self), fields(file = %file_name))]
    pub async fn dispatch(&self, file_name: &str) -> Result<DispatchResponse, DispatchError> {
        debug!(stage = %DispatchStage::Received);
        if file_name.trim().is_empty() {
            debug!("blank file name");
            return Err(DispatchError::BadRequest);
        }

        let transformers = self.registry.instantiate_transformers();
        let cleaned = clean_name(&transformers, file_name);
        debug!(stage = %DispatchStage::NameCleaned, cleaned = %cleaned);

        let sources = self.registry.instantiate_file_sources();
        let Some(mut file) = resolve_source(&sources, &cleaned).await else {
            error!(cleaned = %cleaned, "No file found for {file_name} ({cleaned})");
            return Err(DispatchError::NotFound {
                requested: file_name.to_string(),
                cleaned,
            });
        };
        debug!(stage = %DispatchStage::SourceResolved, location = %file.location());

        debug!(stage = %DispatchStage::Transforming);
        for transformer in &transformers {
            if !transformer.matches(file_name, &file) {
                continue;
            }
            match transformer.transform(file_name, &mut file).await {
                Ok(()) => debug!(transformer = %transformer.name(), "file transformed"),
                Err(e) => warn!(
                    transformer = %transformer.name(),
                    location = %file.location(),
                    error = %e,
                    "failed to transform file"
                ),
            }
            if !file.has_stream() {
                let err = ShelfError::StreamMissing;
                error!(
                    transformer = %transformer.name(),
                    error = %err,
                    "transformer lost the file stream"
                );
                return Err(DispatchError::Internal(err));
            }
        }

        let content_type = self
            .content_types
            .content_type(file_name)
            .filter(|ct| !ct.trim().is_empty());
        let Some(content_type) = content_type else {
            error!(cleaned = %cleaned, "No content type found for {file_name} ({cleaned})");
            return Err(DispatchError::Untyped {
                requested: file_name.to_string(),
                cleaned,
            });
        };
        debug!(stage = %DispatchStage::ContentTyped, content_type = %content_type);

        // Transformers may leave the stream anywhere.
        file.rewind().await.map_err(DispatchError::Internal)?;
        debug!(stage = %DispatchStage::Responding);

        Ok(DispatchResponse {
            content_type,
            file,
            requested: file_name.to_string(),
            cleaned,
        })
    }
}

/// Fold every transformer's `clean_name` over the requested name, in order.
pub fn clean_name(transformers: &[Box<dyn Transformer>], file_name: &str) -> String {
    transformers
        .iter()
        .fold(file_name.to_string(), |name, t| t.clean_name(&name))
}

/// First source that produces the file wins.
async fn resolve_source(sources: &[Box<dyn FileSource>], file_name: &str) -> Option<StoredFile> {
    for source in sources {
        if let Some(file) = source.get_file(file_name).await {
            debug!(source = %source.name(), "file located");
            return Some(file);
        }
    }
    None
}
