//! Image decoding utilities.
//!
//! Decodes raw bytes or base64 data URIs to RGBA and re-encodes pixels as
//! PNG data URIs for embedding in frame documents.

use std::io::Cursor;

use base64::Engine;

use crate::error::{RenderError, RenderResult};

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
    /// Original format of the image.
    pub format: ImageFormat,
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Self::WebP
        } else {
            Self::Unknown
        }
    }
}

/// Decode an image from raw bytes.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn load_image_from_bytes(data: &[u8]) -> RenderResult<TextureData> {
    let format = ImageFormat::from_magic_bytes(data);

    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        width,
        height,
        data: rgba.into_raw(),
        format,
    })
}

/// Decode an image from a base64 data URI such as
/// `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns an error if the URI is malformed, not base64, or the payload
/// cannot be decoded.
pub fn load_image_from_data_uri(uri: &str) -> RenderResult<TextureData> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("Not a data URI".to_string()))?;
    let (metadata, encoded) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;
    if !metadata.contains(";base64") {
        return Err(RenderError::Resource(
            "Only base64 data URIs are supported".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))?;

    load_image_from_bytes(&bytes)
}

/// Encode RGBA pixels as a `data:image/png;base64,...` URI.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions or
/// PNG encoding fails.
pub fn to_png_data_uri(texture: &TextureData) -> RenderResult<String> {
    let img = image::RgbaImage::from_raw(texture.width, texture.height, texture.data.clone())
        .ok_or_else(|| RenderError::Encode("Pixel buffer does not match dimensions".to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(buf.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}

/// Create a solid color texture.
#[must_use]
pub fn create_solid_color(width: u32, height: u32, rgba: [u8; 4]) -> TextureData {
    let pixel_count = (width as usize) * (height as usize);
    TextureData {
        width,
        height,
        data: rgba.repeat(pixel_count),
        format: ImageFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn test_format_detection_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            ImageFormat::Jpeg
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(b"RIFF\x00\x00\x00\x00WEBP"),
            ImageFormat::WebP
        );
        assert_eq!(ImageFormat::from_magic_bytes(&[0x00]), ImageFormat::Unknown);
    }

    #[test]
    fn test_data_uri_parsing() {
        let texture = load_image_from_data_uri(&format!("data:image/png;base64,{RED_PIXEL_PNG}"))
            .expect("valid data uri");
        assert_eq!((texture.width, texture.height), (1, 1));
        assert_eq!(texture.format, ImageFormat::Png);
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(load_image_from_data_uri("not a data uri").is_err());
        assert!(load_image_from_data_uri("data:image/png").is_err());
        assert!(load_image_from_data_uri("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_png_data_uri_round_trips_pixels() {
        let texture = create_solid_color(2, 3, [10, 20, 30, 255]);
        let uri = to_png_data_uri(&texture).expect("encode");
        assert!(uri.starts_with("data:image/png;base64,"));
        let decoded = load_image_from_data_uri(&uri).expect("decode");
        assert_eq!((decoded.width, decoded.height), (2, 3));
        assert_eq!(decoded.data, texture.data);
    }

    #[test]
    fn test_mismatched_buffer_is_encode_error() {
        let texture = TextureData {
            width: 4,
            height: 4,
            data: vec![0; 3],
            format: ImageFormat::Unknown,
        };
        assert!(matches!(
            to_png_data_uri(&texture),
            Err(RenderError::Encode(_))
        ));
    }
}
