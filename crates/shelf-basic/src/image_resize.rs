// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thumbnail transformer.
//!
//! A request for `photo_thumb.png` is served from `photo.png`, resized to the
//! configured target and re-encoded in the stored file's format.

use std::io::{Cursor, SeekFrom};
use std::sync::Arc;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use shelf_core::{NamedSettings, PluginSettings, ShelfError, StoredFile, Transformer};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, info};

/// Settings for [`ImageResizeTransformer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageResizeSettings {
    /// Stem suffix that requests a resized copy.
    pub postfix: String,
    pub target_width: u32,
    pub target_height: u32,
    /// Fit within the target box instead of stretching to it.
    pub keep_aspect_ratio: bool,
}

impl Default for ImageResizeSettings {
    fn default() -> Self {
        Self {
            postfix: "_thumb".to_string(),
            target_width: 100,
            target_height: 100,
            keep_aspect_ratio: true,
        }
    }
}

impl PluginSettings for ImageResizeSettings {
    fn verify(&self, errors: &mut Vec<String>) -> bool {
        let before = errors.len();
        if self.target_width == 0 || self.target_height == 0 {
            errors.push("Target sizes must be greater than 0".to_string());
        }
        if self.postfix.trim().is_empty() {
            errors.push("Postfix must not be empty".to_string());
        }
        before == errors.len()
    }
}

impl NamedSettings for ImageResizeSettings {
    const SECTION: &'static str = "ImageResizeSettings";
}

/// Encoder format for a stored file extension (lowercase, with the dot).
pub fn format_for_extension(extension: &str) -> Option<ImageFormat> {
    match extension {
        ".png" => Some(ImageFormat::Png),
        ".jpg" | ".jpeg" => Some(ImageFormat::Jpeg),
        ".bmp" => Some(ImageFormat::Bmp),
        ".gif" => Some(ImageFormat::Gif),
        ".tga" => Some(ImageFormat::Tga),
        ".tiff" => Some(ImageFormat::Tiff),
        ".webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Split a name into everything before the final extension and the extension.
fn split_extension(file_name: &str) -> (&str, &str) {
    let segment_start = file_name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match file_name[segment_start..].rfind('.') {
        Some(dot) => file_name.split_at(segment_start + dot),
        None => (file_name, ""),
    }
}

/// Resizes images whose requested stem carries the configured postfix.
#[derive(Debug, Clone)]
pub struct ImageResizeTransformer {
    settings: Arc<ImageResizeSettings>,
}

impl ImageResizeTransformer {
    pub const NAME: &'static str = "ImageResize";

    /// Build a transformer; unresolved settings fall back to the defaults.
    pub fn new(settings: Option<Arc<ImageResizeSettings>>) -> Self {
        Self {
            settings: settings.unwrap_or_default(),
        }
    }

    pub fn settings(&self) -> &ImageResizeSettings {
        &self.settings
    }

    fn has_postfix(&self, stem: &str) -> bool {
        !self.settings.postfix.is_empty() && stem.ends_with(&self.settings.postfix)
    }
}

#[async_trait]
impl Transformer for ImageResizeTransformer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn matches(&self, file_name: &str, file: &StoredFile) -> bool {
        let (stem, _) = split_extension(file_name);
        self.has_postfix(stem) && format_for_extension(&file.extension()).is_some()
    }

    /// Strips one postfix occurrence. `photo_thumb_thumb.png` cleans to
    /// `photo_thumb.png`, which is then looked up literally.
    fn clean_name(&self, file_name: &str) -> String {
        let (stem, extension) = split_extension(file_name);
        if !self.has_postfix(stem) {
            return file_name.to_string();
        }
        let cleaned = &stem[..stem.len() - self.settings.postfix.len()];
        format!("{cleaned}{extension}")
    }

    async fn transform(&self, file_name: &str, file: &mut StoredFile) -> Result<(), ShelfError> {
        let settings = Arc::clone(&self.settings);
        info!(
            file = %file_name,
            location = %file.location(),
            width = settings.target_width,
            height = settings.target_height,
            keep_aspect_ratio = settings.keep_aspect_ratio,
            "resizing image"
        );

        let failure = |message: String| ShelfError::Transform {
            transformer: Self::NAME.to_string(),
            message,
        };

        let format = format_for_extension(&file.extension())
            .ok_or_else(|| failure(format!("no encoder for `{}`", file.extension())))?;

        // Earlier transformers may leave the stream anywhere.
        let mut stream = file.take_stream().ok_or(ShelfError::StreamMissing)?;
        let mut bytes = Vec::new();
        let read = async {
            stream.seek(SeekFrom::Start(0)).await?;
            stream.read_to_end(&mut bytes).await
        }
        .await;
        if let Err(e) = read {
            stream.seek(SeekFrom::Start(0)).await?;
            file.give_stream(stream)?;
            return Err(failure(e.to_string()));
        }
        drop(stream);

        let original: Arc<[u8]> = bytes.into();
        let input = Arc::clone(&original);
        let resized = tokio::task::spawn_blocking(move || resize(&input, format, &settings))
            .await
            .map_err(|e| failure(e.to_string()))
            .and_then(|result| result.map_err(|e| failure(e.to_string())));

        match resized {
            Ok(output) => {
                debug!(
                    file = %file_name,
                    before = original.len(),
                    after = output.len(),
                    "image resized"
                );
                file.give_stream(Box::new(Cursor::new(output)))
            }
            Err(e) => {
                file.give_stream(Box::new(Cursor::new(original)))?;
                Err(e)
            }
        }
    }
}

/// Decode, resize, and re-encode an image.
fn resize(
    data: &[u8],
    format: ImageFormat,
    settings: &ImageResizeSettings,
) -> Result<Vec<u8>, image::ImageError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    let (width, height) = (settings.target_width, settings.target_height);
    let resized = if settings.keep_aspect_ratio {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    // JPEG has no alpha channel.
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };

    let mut output = Cursor::new(Vec::new());
    resized.write_to(&mut output, format)?;
    Ok(output.into_inner())
}
