// Vision models and upload validation
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ApiError, Result};

/// MIME types accepted by the prediction endpoint.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Map an allowed MIME type to its format. Parameters such as
    /// `; charset=binary` are ignored.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Encoder format used when re-encoding for the model.
    pub fn encoder_format(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Validate the declared content type of an upload.
///
/// Runs before the body is decoded so that unsupported files are rejected
/// without doing any image work.
pub fn validate_content_type(content_type: Option<&str>) -> Result<ImageFormat> {
    content_type
        .and_then(ImageFormat::from_mime_type)
        .ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "Invalid file type: '{}'. Allowed: {}",
                content_type.unwrap_or("none"),
                ALLOWED_MIME_TYPES.join(", ")
            ))
        })
}

/// Image bytes in the shape the model expects, one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}
