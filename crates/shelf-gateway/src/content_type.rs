// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content types from file name extensions.

use shelf_core::ContentTypeResolver;

/// Resolves content types from a fixed table of well-known extensions.
///
/// Matching is case-insensitive. Names without a known extension resolve to
/// `None` rather than a generic binary type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionContentTypes;

impl ExtensionContentTypes {
    pub fn new() -> Self {
        Self
    }
}

impl ContentTypeResolver for ExtensionContentTypes {
    fn content_type(&self, file_name: &str) -> Option<String> {
        mime_for_name(file_name).map(str::to_string)
    }
}

/// Look up the content type for the extension of `file_name`.
pub fn mime_for_name(file_name: &str) -> Option<&'static str> {
    let segment = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (_, extension) = segment.rsplit_once('.')?;
    let mime = match extension.to_ascii_lowercase().as_str() {
        // images
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "tga" => "image/x-tga",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        // text
        "txt" => "text/plain",
        "htm" | "html" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "xml" => "text/xml",
        "js" | "mjs" => "text/javascript",
        // documents and data
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "wasm" => "application/wasm",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "bin" => "application/octet-stream",
        // audio and video
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        // fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        _ => return None,
    };
    Some(mime)
}
