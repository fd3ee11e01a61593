//! The face cutout.

use std::fmt::Write;

use banner_core::geometry::{finite_or, Bounds};
use banner_core::FaceFilters;

use super::FrameContext;
use crate::svg::SvgDocument;

/// Draw the face image centred on its bounds, mirrored when flipped.
///
/// Returns the drawn absolute bounds, or `None` when there is no face
/// image or it is not loaded.
pub(super) fn face(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> Option<Bounds> {
    let face = &ctx.scene.face;
    if !face.has_image() {
        return None;
    }
    let image = ctx.images.ready_ref(face.image.as_deref())?;
    let bounds = face.bounds_for(image.width, image.height);
    let (w, h) = (bounds.width, bounds.height);

    let filter = match face.filters.filter(|f| !f.is_identity()) {
        Some(filters) => {
            let id = doc.unique_id("face-filter");
            doc.def(&filter_markup(&id, &filters));
            format!(" filter=\"url(#{id})\"")
        }
        None => String::new(),
    };

    let _ = write!(
        doc.body(),
        "<g transform=\"translate({} {}) scale({} 1)\"><image x=\"{}\" y=\"{}\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"none\"{filter} href=\"{}\"/></g>",
        bounds.x + w / 2.0,
        bounds.y + h / 2.0,
        face.flip_sign(),
        -w / 2.0,
        -h / 2.0,
        image.data_uri,
    );

    tracing::trace!("Face drawn at {bounds:?}");
    Some(bounds)
}

/// `contrast() saturate() brightness()` as SVG filter primitives.
fn filter_markup(id: &str, filters: &FaceFilters) -> String {
    let contrast = finite_or(filters.contrast, 1.0).max(0.0);
    let saturation = finite_or(filters.saturation, 1.0).max(0.0);
    let brightness = finite_or(filters.brightness, 1.0).max(0.0);
    let intercept = 0.5 - 0.5 * contrast;

    let mut markup = String::new();
    let _ = write!(
        markup,
        "<filter id=\"{id}\" x=\"0\" y=\"0\" width=\"1\" height=\"1\" color-interpolation-filters=\"sRGB\">"
    );
    push_linear_transfer(&mut markup, contrast, intercept);
    let _ = write!(
        markup,
        "<feColorMatrix type=\"saturate\" values=\"{saturation}\"/>"
    );
    push_linear_transfer(&mut markup, brightness, 0.0);
    markup.push_str("</filter>");
    markup
}

fn push_linear_transfer(markup: &mut String, slope: f32, intercept: f32) {
    markup.push_str("<feComponentTransfer>");
    for channel in ["R", "G", "B"] {
        let _ = write!(
            markup,
            "<feFunc{channel} type=\"linear\" slope=\"{slope}\" intercept=\"{intercept}\"/>"
        );
    }
    markup.push_str("</feComponentTransfer>");
}
