//! # Banner Renderer
//!
//! Deterministic draw pipeline for banner scenes. Each frame is composed
//! as an SVG document from a read-only scene snapshot and rasterized into
//! a `tiny-skia` pixmap.
//!
//! ## Frame flow
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Scene   │──▶│ pipeline      │──▶│ RasterBackend│──▶│ Frame        │
//! │ Viewport │   │ (SVG layers)  │   │ (resvg)      │   │ svg, pixmap, │
//! │ Images   │   └───────────────┘   └──────────────┘   │ face_bounds  │
//! └──────────┘                                          └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod image;
pub mod image_store;
pub mod pipeline;
pub mod svg;

pub use backend::software::ResvgBackend;
pub use backend::RasterBackend;
pub use error::{RenderError, RenderResult};
pub use image_store::{ImageState, ImageStore, LoadedImage};
pub use pipeline::{FrameDocument, Layer};

use banner_core::geometry::{ApproxTextMeasure, Bounds, TextMeasure};
use banner_core::{Scene, ViewportConfig, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Logical canvas width.
    pub width: u32,
    /// Logical canvas height.
    pub height: u32,
    /// Output pixels per logical unit (e.g. 2.0 for retina).
    pub scale: f32,
    /// Load the system font database for text.
    pub load_system_fonts: bool,
    /// Enable anti-aliasing.
    pub anti_aliasing: bool,
    /// Colour of selection outlines and vertex handles.
    pub selection_color: String,
}

impl Default for RendererConfig {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH as u32,
            height: CANVAS_HEIGHT as u32,
            scale: 1.0,
            load_system_fonts: true,
            anti_aliasing: true,
            selection_color: "#2563eb".to_string(),
        }
    }
}

impl RendererConfig {
    /// Output surface size in pixels.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        (
            (self.width as f32 * scale).round() as u32,
            (self.height as f32 * scale).round() as u32,
        )
    }
}

/// One rendered frame.
pub struct Frame {
    /// The composed frame document.
    pub svg: String,
    /// The drawing surface.
    pub pixmap: tiny_skia::Pixmap,
    /// Absolute bounds of the drawn face cutout, for hit-testing.
    pub face_bounds: Option<Bounds>,
    /// Layers that drew something, in draw order.
    pub layers: Vec<Layer>,
}

impl Frame {
    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }
}

/// The main renderer interface.
pub struct Renderer {
    config: RendererConfig,
    backend: Box<dyn RasterBackend>,
    measure: Box<dyn TextMeasure>,
    last_face_bounds: Option<Bounds>,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer using the resvg backend.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        let backend = Box::new(ResvgBackend::new(&config));
        Self::with_backend(config, backend)
    }

    /// Create a renderer with a custom backend.
    #[must_use]
    pub fn with_backend(config: RendererConfig, backend: Box<dyn RasterBackend>) -> Self {
        tracing::debug!(
            "Renderer using {} backend at {}x{}",
            backend.name(),
            config.width,
            config.height
        );
        Self {
            config,
            backend,
            measure: Box::new(ApproxTextMeasure),
            last_face_bounds: None,
            frame_count: 0,
        }
    }

    /// Replace the text measurement used for pivots and text selection
    /// boxes.
    #[must_use]
    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    /// Compose the frame document without rasterizing it.
    #[must_use]
    pub fn compose(
        &self,
        scene: &Scene,
        viewport: &ViewportConfig,
        images: &ImageStore,
    ) -> FrameDocument {
        let ctx = pipeline::FrameContext {
            scene,
            viewport,
            images,
            config: &self.config,
            measure: self.measure.as_ref(),
            palette: scene.backdrop.palette(),
        };
        pipeline::compose(&ctx)
    }

    /// Render a frame.
    ///
    /// Missing, pending or failed images are drawn as absent. The face
    /// bounds of the frame are cached for [`Renderer::last_face_bounds`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if the drawing surface cannot be
    /// allocated.
    pub fn render(
        &mut self,
        scene: &Scene,
        viewport: &ViewportConfig,
        images: &ImageStore,
    ) -> RenderResult<Frame> {
        let document = self.compose(scene, viewport, images);
        self.last_face_bounds = document.face_bounds;

        let (pixel_width, pixel_height) = self.config.pixel_size();
        let pixmap = self
            .backend
            .rasterize(&document.svg, pixel_width, pixel_height)?;
        self.frame_count += 1;

        Ok(Frame {
            svg: document.svg,
            pixmap,
            face_bounds: document.face_bounds,
            layers: document.layers,
        })
    }

    /// Face bounds computed by the most recent render.
    #[must_use]
    pub fn last_face_bounds(&self) -> Option<Bounds> {
        self.last_face_bounds
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}
