//! Background, overlay, template decoration, logo and the title block.

use std::fmt::Write;

use banner_core::{TemplateStyle, TextAnchor, CTA_TEXT};

use super::FrameContext;
use crate::image_store::LoadedImage;
use crate::svg::{escape_xml, SvgDocument};

const LOGO_SIZE: f32 = 64.0;
const LOGO_PADDING: f32 = 32.0;

const TITLE_Y: f32 = 140.0;
const TAGLINE_Y: f32 = 210.0;
const CTA_Y: f32 = 260.0;
const TEXT_MARGIN: f32 = 50.0;

/// Cover-scaled photo, or the palette background colour when no photo is
/// ready. Always draws.
#[allow(clippy::cast_precision_loss)]
pub(super) fn background(
    doc: &mut SvgDocument,
    ctx: &FrameContext<'_>,
    photo: Option<&LoadedImage>,
) -> bool {
    let (w, h) = (doc.width(), doc.height());
    match photo.filter(|p| p.width > 0 && p.height > 0) {
        Some(photo) => {
            let (iw, ih) = (photo.width as f32, photo.height as f32);
            let scale = (w / iw).max(h / ih);
            let (dw, dh) = (iw * scale, ih * scale);
            let _ = write!(
                doc.body(),
                "<image x=\"{}\" y=\"{}\" width=\"{dw}\" height=\"{dh}\" preserveAspectRatio=\"none\" href=\"{}\"/>",
                (w - dw) / 2.0,
                (h - dh) / 2.0,
                photo.data_uri,
            );
        }
        None => {
            let fill = escape_xml(ctx.palette.background());
            let _ = write!(
                doc.body(),
                "<rect width=\"{w}\" height=\"{h}\" fill=\"{fill}\"/>"
            );
        }
    }
    true
}

/// Uniform black overlay over a photo background.
pub(super) fn overlay(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let opacity = ctx.scene.backdrop.overlay();
    if opacity <= 0.0 {
        return false;
    }
    let (w, h) = (doc.width(), doc.height());
    let _ = write!(
        doc.body(),
        "<rect width=\"{w}\" height=\"{h}\" fill=\"#000000\" fill-opacity=\"{opacity}\"/>"
    );
    true
}

/// Accent shapes of the active template style. Needs both a template and
/// a non-blank profession.
pub(super) fn decoration(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let backdrop = &ctx.scene.backdrop;
    if !backdrop.profession.as_ref().is_some_and(|p| !p.is_blank()) {
        return false;
    }
    let Some(template) = &backdrop.template else {
        return false;
    };

    let (w, h) = (doc.width(), doc.height());
    let primary = escape_xml(ctx.palette.primary());
    let secondary = escape_xml(ctx.palette.secondary());

    match template.style {
        TemplateStyle::Modern => {
            let _ = write!(
                doc.body(),
                "<path d=\"M {} 0 L {} {h} L 0 {h} L 0 0 Z\" fill=\"{primary}\" opacity=\"0.9\"/>",
                w * 0.4,
                w * 0.5,
            );
        }
        TemplateStyle::Bold => {
            let _ = write!(
                doc.body(),
                "<rect x=\"0\" y=\"{}\" width=\"{w}\" height=\"{}\" fill=\"{primary}\"/>",
                h * 0.75,
                h * 0.25,
            );
        }
        TemplateStyle::Clean => {
            let id = doc.unique_id("side-gradient");
            doc.def(&format!(
                "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"0\"><stop offset=\"0\" stop-color=\"{primary}\"/><stop offset=\"1\" stop-color=\"{primary}\" stop-opacity=\"0\"/></linearGradient>",
                w * 0.5,
            ));
            let _ = write!(
                doc.body(),
                "<rect width=\"{w}\" height=\"{h}\" fill=\"url(#{id})\" opacity=\"0.8\"/>"
            );
        }
        TemplateStyle::Minimal => {
            let _ = write!(
                doc.body(),
                "<rect x=\"{}\" y=\"0\" width=\"20\" height=\"{h}\" fill=\"{primary}\"/>",
                w - 20.0,
            );
        }
        TemplateStyle::Grid => {
            let body = doc.body();
            for x in [w / 3.0, 2.0 * w / 3.0] {
                let _ = write!(
                    body,
                    "<rect x=\"{x}\" y=\"0\" width=\"2\" height=\"{h}\" fill=\"{secondary}\" opacity=\"0.2\"/>"
                );
            }
            let _ = write!(
                body,
                "<rect x=\"0\" y=\"{}\" width=\"{w}\" height=\"80\" fill=\"{primary}\" opacity=\"0.9\"/>",
                h - 80.0,
            );
        }
    }
    true
}

/// Circular-clipped logo in the top-right corner.
pub(super) fn logo(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let Some(logo) = ctx.images.ready_ref(ctx.scene.backdrop.logo.as_deref()) else {
        return false;
    };
    let w = doc.width();
    let x = w - LOGO_PADDING - LOGO_SIZE;
    let radius = LOGO_SIZE / 2.0;

    let id = doc.unique_id("logo-clip");
    doc.def(&format!(
        "<clipPath id=\"{id}\"><circle cx=\"{}\" cy=\"{}\" r=\"{radius}\"/></clipPath>",
        x + radius,
        LOGO_PADDING + radius,
    ));
    let _ = write!(
        doc.body(),
        "<image x=\"{x}\" y=\"{LOGO_PADDING}\" width=\"{LOGO_SIZE}\" height=\"{LOGO_SIZE}\" preserveAspectRatio=\"none\" clip-path=\"url(#{id})\" href=\"{}\"/>",
        logo.data_uri,
    );
    true
}

/// Title, tagline and CTA line at the template's text anchor.
pub(super) fn title_block(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let backdrop = &ctx.scene.backdrop;
    if backdrop.is_blank() {
        return false;
    }

    let (w, h) = (doc.width(), doc.height());
    let style = backdrop.template.as_ref().map(|t| t.style);
    let anchor = backdrop
        .template
        .as_ref()
        .map(banner_core::Template::anchor)
        .unwrap_or_default();

    let (x, align, y_offset) = match anchor {
        TextAnchor::Left => (TEXT_MARGIN, "start", 0.0),
        TextAnchor::Center | TextAnchor::CenterBig => {
            let offset = if style == Some(TemplateStyle::Clean) {
                -20.0
            } else {
                0.0
            };
            (w / 2.0, "middle", offset)
        }
        TextAnchor::Right => (w - TEXT_MARGIN, "end", 0.0),
        TextAnchor::OverlayBottom => (w / 2.0, "middle", h / 2.0 - 40.0),
    };

    let font = escape_xml(backdrop.font());
    let title_size = if style == Some(TemplateStyle::Bold) {
        100
    } else {
        64
    };

    let shadow = doc.unique_id("title-shadow");
    doc.def(&format!(
        "<filter id=\"{shadow}\" x=\"-10%\" y=\"-50%\" width=\"120%\" height=\"200%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"2\" flood-color=\"#000000\" flood-opacity=\"0.5\"/></filter>"
    ));

    let body = doc.body();
    let _ = write!(
        body,
        "<g text-anchor=\"{align}\" dominant-baseline=\"middle\" font-family=\"{font}, sans-serif\">"
    );
    let _ = write!(
        body,
        "<text x=\"{x}\" y=\"{}\" font-size=\"{title_size}\" font-weight=\"bold\" fill=\"{}\" filter=\"url(#{shadow})\">{}</text>",
        TITLE_Y + y_offset,
        escape_xml(backdrop.title_color()),
        escape_xml(backdrop.title()),
    );
    let _ = write!(
        body,
        "<text x=\"{x}\" y=\"{}\" font-size=\"32\" fill=\"#f0f0f0\">{}</text>",
        TAGLINE_Y + y_offset,
        escape_xml(backdrop.tagline()),
    );
    if style != Some(TemplateStyle::Minimal) {
        let _ = write!(
            body,
            "<text x=\"{x}\" y=\"{}\" font-size=\"20\" fill=\"#cbd5e1\">{CTA_TEXT}</text>",
            CTA_Y + y_offset,
        );
    }
    body.push_str("</g>");
    true
}
