//! The frame draw pipeline.
//!
//! Each step paints one layer into the frame document, in a fixed order:
//!
//! ```text
//! background → overlay → decoration → logo → text → face → badges
//!            → elements (with selection affordances) → grid
//! ```
//!
//! Steps that have nothing to draw leave no trace in the document.

mod backdrop;
mod badges;
mod elements;
mod face;
mod grid;

use banner_core::geometry::{Bounds, TextMeasure};
use banner_core::{Palette, Scene, ViewportConfig};
use serde::{Deserialize, Serialize};

use crate::image_store::ImageStore;
use crate::svg::SvgDocument;
use crate::RendererConfig;

/// A pipeline layer, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Background photo or palette fill.
    Background,
    /// Black legibility overlay over a photo.
    Overlay,
    /// Template accent shapes.
    Decoration,
    /// Circular logo, top right.
    Logo,
    /// Title, tagline and CTA line.
    Text,
    /// Face cutout.
    Face,
    /// Badges.
    Badges,
    /// Freeform elements and their selection affordances.
    Elements,
    /// Grid overlay.
    Grid,
}

impl Layer {
    /// All layers in draw order.
    pub const ORDER: [Self; 9] = [
        Self::Background,
        Self::Overlay,
        Self::Decoration,
        Self::Logo,
        Self::Text,
        Self::Face,
        Self::Badges,
        Self::Elements,
        Self::Grid,
    ];

    /// Layer name, used as the `layer-<name>` group id in frame documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Overlay => "overlay",
            Self::Decoration => "decoration",
            Self::Logo => "logo",
            Self::Text => "text",
            Self::Face => "face",
            Self::Badges => "badges",
            Self::Elements => "elements",
            Self::Grid => "grid",
        }
    }
}

/// Read-only inputs of one frame.
pub(crate) struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub viewport: &'a ViewportConfig,
    pub images: &'a ImageStore,
    pub config: &'a RendererConfig,
    pub measure: &'a dyn TextMeasure,
    pub palette: Palette,
}

/// A composed frame document before rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDocument {
    /// The SVG markup.
    pub svg: String,
    /// Absolute bounds of the drawn face cutout.
    pub face_bounds: Option<Bounds>,
    /// Layers that drew something, in draw order.
    pub layers: Vec<Layer>,
}

/// Run every pipeline step for one frame.
pub(crate) fn compose(ctx: &FrameContext<'_>) -> FrameDocument {
    let (pixel_width, pixel_height) = ctx.config.pixel_size();
    #[allow(clippy::cast_precision_loss)]
    let mut doc = SvgDocument::new(
        ctx.config.width as f32,
        ctx.config.height as f32,
        pixel_width,
        pixel_height,
    );
    let mut layers = Vec::with_capacity(Layer::ORDER.len());
    let mut face_bounds = None;

    let photo = ctx
        .images
        .ready_ref(ctx.scene.backdrop.background.as_deref());

    step(&mut doc, &mut layers, Layer::Background, |doc| {
        backdrop::background(doc, ctx, photo)
    });
    step(&mut doc, &mut layers, Layer::Overlay, |doc| {
        photo.is_some() && backdrop::overlay(doc, ctx)
    });
    step(&mut doc, &mut layers, Layer::Decoration, |doc| {
        backdrop::decoration(doc, ctx)
    });
    step(&mut doc, &mut layers, Layer::Logo, |doc| backdrop::logo(doc, ctx));
    step(&mut doc, &mut layers, Layer::Text, |doc| {
        backdrop::title_block(doc, ctx)
    });
    step(&mut doc, &mut layers, Layer::Face, |doc| {
        face_bounds = face::face(doc, ctx);
        face_bounds.is_some()
    });
    step(&mut doc, &mut layers, Layer::Badges, |doc| badges::badges(doc, ctx));
    step(&mut doc, &mut layers, Layer::Elements, |doc| {
        elements::elements(doc, ctx)
    });
    step(&mut doc, &mut layers, Layer::Grid, |doc| grid::grid(doc, ctx));

    tracing::trace!("Composed frame with layers {layers:?}");

    FrameDocument {
        svg: doc.finish(),
        face_bounds,
        layers,
    }
}

/// Run one step inside its layer group, discarding the group if the step
/// drew nothing.
fn step<F>(doc: &mut SvgDocument, layers: &mut Vec<Layer>, layer: Layer, draw: F)
where
    F: FnOnce(&mut SvgDocument) -> bool,
{
    let mark = doc.checkpoint();
    doc.open_layer(layer.name());
    if draw(doc) {
        doc.close_group();
        layers.push(layer);
    } else {
        doc.rollback(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_names_match_serde() {
        for layer in Layer::ORDER {
            let json = serde_json::to_string(&layer).expect("serialize");
            assert_eq!(json, format!("\"{}\"", layer.name()));
        }
    }

    #[test]
    fn test_order_is_sorted() {
        let mut sorted = Layer::ORDER;
        sorted.sort();
        assert_eq!(sorted, Layer::ORDER);
    }
}
