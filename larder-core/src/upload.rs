//! File attachments for multipart requests.
//!
//! Recipe and step images are sent as the "file" part of a multipart body.
//! The content type is sniffed from the bytes so the backend sees the real
//! image format regardless of the file's extension.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::error::ClientError;

/// Content type used when the bytes are not a recognised image.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Image formats the dashboard accepts for recipe and step photos.
pub const IMAGE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// A file to attach to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    /// Wrap in-memory bytes, detecting the content type.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = detect_content_type(&bytes)
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk. I/O failures surface as `ClientError::Io`.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Detect an accepted image format and return its MIME type (e.g., "image/png").
pub fn detect_content_type(data: &[u8]) -> Option<&'static str> {
    let format = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .format()?;

    if IMAGE_FORMATS.contains(&format) {
        Some(format.to_mime_type())
    } else {
        None
    }
}
