//! Validation for uploaded bottle photos.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

/// Formats the vision service accepts and we are willing to forward.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum upload size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Check size and format from the magic bytes.
///
/// Returns the content type on success (e.g., "image/jpeg"). The image is not
/// decoded; the vision service does that.
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    if data.is_empty() {
        return Err("Image is empty".to_string());
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(format!(
            "Image too large: {} bytes (max {})",
            data.len(),
            MAX_FILE_SIZE
        ));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}
