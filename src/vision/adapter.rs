// Upload decoding and re-encoding for the vision model
// Author: kelexine (https://github.com/kelexine)

use super::models::{ImageFormat, ImagePart};
use crate::error::{ApiError, Result};
use image::{ColorType, DynamicImage};
use std::io::Cursor;
use tracing::debug;

/// Decode uploaded bytes and re-encode them in `format`.
///
/// The source container is guessed from the bytes; only the output follows
/// the declared MIME type.
pub fn to_image_part(bytes: &[u8], format: ImageFormat) -> Result<ImagePart> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ApiError::ImageProcessing(format!("failed to decode image: {}", e)))?;

    debug!(
        "Decoded upload: {}x{} {:?}",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let encodable = encodable_for(format, decoded);

    let mut data = Vec::new();
    encodable
        .write_to(&mut Cursor::new(&mut data), format.encoder_format())
        .map_err(|e| {
            ApiError::ImageProcessing(format!(
                "failed to encode image as {}: {}",
                format.mime_type(),
                e
            ))
        })?;

    Ok(ImagePart {
        mime_type: format.mime_type().to_string(),
        data,
    })
}

/// Run [`to_image_part`] on the blocking pool.
pub async fn adapt_upload(bytes: Vec<u8>, format: ImageFormat) -> Result<ImagePart> {
    tokio::task::spawn_blocking(move || to_image_part(&bytes, format))
        .await
        .map_err(|e| ApiError::Internal(format!("image task failed: {}", e)))?
}

/// Convert pixel layouts the target encoder cannot write.
fn encodable_for(format: ImageFormat, image: DynamicImage) -> DynamicImage {
    match (format, image.color()) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => image,
        (ImageFormat::Jpeg, _) => DynamicImage::ImageRgb8(image.to_rgb8()),
        (ImageFormat::WebP, ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8) => {
            image
        }
        (ImageFormat::WebP, _) => DynamicImage::ImageRgba8(image.to_rgba8()),
        (ImageFormat::Png, ColorType::Rgb32F | ColorType::Rgba32F) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        (ImageFormat::Png, _) => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn encode(image: &DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    fn green(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([0, 200, 0])))
    }

    #[test]
    fn test_output_keeps_declared_type_and_dimensions() {
        let source = green(17, 9);
        for (format, encoder) in [
            (ImageFormat::Jpeg, image::ImageFormat::Jpeg),
            (ImageFormat::Png, image::ImageFormat::Png),
            (ImageFormat::WebP, image::ImageFormat::WebP),
        ] {
            let bytes = encode(&source, encoder);
            let part = to_image_part(&bytes, format).unwrap();
            assert_eq!(part.mime_type, format.mime_type());

            let round_trip = image::load_from_memory(&part.data).unwrap();
            assert_eq!((round_trip.width(), round_trip.height()), (17, 9));
        }
    }

    #[test]
    fn test_output_uses_declared_format_not_source_format() {
        let png_bytes = encode(&green(4, 4), image::ImageFormat::Png);
        let part = to_image_part(&png_bytes, ImageFormat::Jpeg).unwrap();

        assert_eq!(part.mime_type, "image/jpeg");
        assert_eq!(image::guess_format(&part.data).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_alpha_png_declared_as_jpeg_is_flattened() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(6, 3, Rgba([10, 120, 30, 128])));
        let bytes = encode(&rgba, image::ImageFormat::Png);

        let part = to_image_part(&bytes, ImageFormat::Jpeg).unwrap();
        let decoded = image::load_from_memory(&part.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 3));
    }

    #[test]
    fn test_corrupt_bytes_are_an_image_error() {
        let err = to_image_part(b"definitely not an image", ImageFormat::Png).unwrap_err();
        assert!(matches!(err, ApiError::ImageProcessing(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_truncated_image_is_an_image_error() {
        let bytes = encode(&green(32, 32), image::ImageFormat::Png);
        let err = to_image_part(&bytes[..bytes.len() / 2], ImageFormat::Png).unwrap_err();
        assert!(matches!(err, ApiError::ImageProcessing(_)));
    }

    #[tokio::test]
    async fn test_adapt_upload_runs_off_the_runtime() {
        let bytes = encode(&green(10, 10), image::ImageFormat::Jpeg);
        let part = adapt_upload(bytes, ImageFormat::Jpeg).await.unwrap();
        assert_eq!(part.mime_type, "image/jpeg");
    }
}
