//! CPU rasterization with resvg and tiny-skia.

use super::RasterBackend;
use crate::{RenderError, RenderResult, RendererConfig};

/// resvg-based backend. Holds the parse options, including the font
/// database, across frames.
pub struct ResvgBackend {
    options: usvg::Options<'static>,
}

impl ResvgBackend {
    /// Create a backend configured from `config`.
    #[must_use]
    pub fn new(config: &RendererConfig) -> Self {
        let mut options = usvg::Options::default();
        if config.load_system_fonts {
            options.fontdb_mut().load_system_fonts();
            tracing::debug!("Loaded {} system font faces", options.fontdb.len());
        }
        if !config.anti_aliasing {
            options.shape_rendering = usvg::ShapeRendering::CrispEdges;
        }
        Self { options }
    }
}

impl RasterBackend for ResvgBackend {
    fn name(&self) -> &'static str {
        "resvg"
    }

    fn rasterize(
        &self,
        svg: &str,
        pixel_width: u32,
        pixel_height: u32,
    ) -> RenderResult<tiny_skia::Pixmap> {
        let mut pixmap = tiny_skia::Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
            RenderError::Surface(format!(
                "Failed to create {pixel_width}x{pixel_height} pixmap"
            ))
        })?;

        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}
