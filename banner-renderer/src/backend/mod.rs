//! Rasterization backends.

pub mod software;

use crate::RenderResult;

/// Turns a frame document into pixels.
pub trait RasterBackend {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Rasterize `svg` into a `pixel_width x pixel_height` pixmap.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`](crate::RenderError::Surface) if the
    /// pixmap cannot be allocated and
    /// [`RenderError::Svg`](crate::RenderError::Svg) if the document does
    /// not parse.
    fn rasterize(
        &self,
        svg: &str,
        pixel_width: u32,
        pixel_height: u32,
    ) -> RenderResult<tiny_skia::Pixmap>;
}
