//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
///
/// Only [`RenderError::Surface`] aborts a frame. Image failures are
/// recorded in the [`ImageStore`](crate::ImageStore) and the frame falls
/// back to drawing without the image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface could not be allocated.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Resource loading failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// The frame document could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Encoding pixels to an image format failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
