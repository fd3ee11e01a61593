//! Freeform elements in z-order, with selection affordances.
//!
//! Every element is drawn inside
//! `translate(origin + pivot) rotate(r) scale(s) translate(-pivot)`, so
//! shapes are written in their own local coordinates with `(0, 0)` at the
//! element origin.

use std::fmt::Write;

use banner_core::geometry::{
    compute_pivot, finite_or, normalize_degrees, size_or_default, Bounds, Point,
};
use banner_core::{Element, ElementKind};

use super::FrameContext;
use crate::svg::{escape_xml, line_path_data, polygon_path_data, SvgDocument};

/// Radius of vertex handles on a selected line or polygon.
const HANDLE_RADIUS: f32 = 6.0;

pub(super) fn elements(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let scene = ctx.scene;
    for element in scene.elements() {
        draw_element(doc, ctx, element, element.origin(), scene.is_selected(element.id));
    }
    !scene.is_empty()
}

fn draw_element(
    doc: &mut SvgDocument,
    ctx: &FrameContext<'_>,
    element: &Element,
    origin: Point,
    selected: bool,
) {
    tracing::trace!("Draw {} {}", element.kind.type_name(), element.id);

    let pivot = compute_pivot(element, ctx.measure);
    let (cx, cy) = (finite_or(pivot.x, 0.0), finite_or(pivot.y, 0.0));
    let _ = write!(
        doc.body(),
        "<g transform=\"translate({} {}) rotate({}) scale({}) translate({} {})\">",
        origin.x + cx,
        origin.y + cy,
        normalize_degrees(element.rotation),
        element.effective_scale(),
        -cx,
        -cy,
    );

    let accent = escape_xml(&ctx.config.selection_color);
    match &element.kind {
        ElementKind::Text {
            text,
            font_size,
            font_weight,
            font_family,
            color,
        } => {
            let size = size_or_default(*font_size);
            let _ = write!(
                doc.body(),
                "<text x=\"0\" y=\"0\" font-size=\"{size}\" font-weight=\"{}\" font-family=\"{}, sans-serif\" fill=\"{}\" dominant-baseline=\"hanging\" xml:space=\"preserve\">{}</text>",
                escape_xml(font_weight),
                escape_xml(font_family),
                escape_xml(color),
                escape_xml(text),
            );
            if selected {
                let width = finite_or(
                    ctx.measure.text_width(text, size, font_weight, font_family),
                    0.0,
                );
                outline_rect(doc, &accent, Bounds::new(0.0, 0.0, width, size).expand(5.0), false);
            }
        }
        ElementKind::Rect {
            width,
            height,
            fill,
            stroke,
            stroke_width,
        } => {
            let (w, h) = (size_or_default(*width), size_or_default(*height));
            let _ = write!(
                doc.body(),
                "<rect width=\"{w}\" height=\"{h}\" fill=\"{}\"{}/>",
                escape_xml(fill),
                stroke_attrs(stroke.as_deref(), *stroke_width),
            );
            if selected {
                outline_rect(doc, &accent, Bounds::new(0.0, 0.0, w, h).expand(2.0), false);
            }
        }
        ElementKind::Circle {
            width,
            fill,
            stroke,
            stroke_width,
        } => {
            let r = size_or_default(*width) / 2.0;
            let _ = write!(
                doc.body(),
                "<circle cx=\"{r}\" cy=\"{r}\" r=\"{r}\" fill=\"{}\"{}/>",
                escape_xml(fill),
                stroke_attrs(stroke.as_deref(), *stroke_width),
            );
            if selected {
                let _ = write!(
                    doc.body(),
                    "<circle cx=\"{r}\" cy=\"{r}\" r=\"{r}\" fill=\"none\" stroke=\"{accent}\" stroke-width=\"2\"/>"
                );
            }
        }
        ElementKind::Line {
            points,
            line_type,
            stroke,
            stroke_width,
        } => match line_path_data(points, *line_type) {
            Some(d) => {
                let _ = write!(
                    doc.body(),
                    "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
                    escape_xml(stroke),
                    finite_or(*stroke_width, 4.0).max(0.0),
                );
                if selected {
                    if let Some(bounds) = Bounds::from_points(points) {
                        outline_rect(doc, &accent, bounds.expand(5.0), false);
                    }
                    vertex_handles(doc, &accent, points);
                }
            }
            None => placeholder(doc),
        },
        ElementKind::Polygon {
            points,
            fill,
            stroke,
            stroke_width,
        } => match polygon_path_data(points) {
            Some(d) => {
                let _ = write!(
                    doc.body(),
                    "<path d=\"{d}\" fill=\"{}\"{}/>",
                    escape_xml(fill),
                    stroke_attrs(stroke.as_deref(), *stroke_width),
                );
                if selected {
                    let _ = write!(
                        doc.body(),
                        "<path d=\"{d}\" fill=\"none\" stroke=\"{accent}\" stroke-width=\"1\"/>"
                    );
                    vertex_handles(doc, &accent, points);
                }
            }
            None => placeholder(doc),
        },
        ElementKind::Group {
            width,
            height,
            child_elements,
        } => {
            for child in child_elements {
                let child_origin =
                    Point::new(finite_or(child.rel_x, 0.0), finite_or(child.rel_y, 0.0));
                draw_element(doc, ctx, &child.element, child_origin, false);
            }
            if selected {
                let bounds =
                    Bounds::new(0.0, 0.0, size_or_default(*width), size_or_default(*height));
                outline_rect(doc, &accent, bounds.expand(2.0), true);
            }
        }
    }

    doc.close_group();
}

fn stroke_attrs(stroke: Option<&str>, width: f32) -> String {
    match stroke.filter(|s| !s.is_empty()) {
        Some(stroke) => format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml(stroke),
            finite_or(width, 2.0).max(0.0),
        ),
        None => String::new(),
    }
}

fn outline_rect(doc: &mut SvgDocument, accent: &str, b: Bounds, dashed: bool) {
    let dash = if dashed {
        " stroke-dasharray=\"6 4\""
    } else {
        ""
    };
    let _ = write!(
        doc.body(),
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{accent}\" stroke-width=\"2\"{dash}/>",
        b.x, b.y, b.width, b.height,
    );
}

fn vertex_handles(doc: &mut SvgDocument, accent: &str, points: &[Point]) {
    for p in points.iter().filter(|p| p.is_finite()) {
        let _ = write!(
            doc.body(),
            "<circle cx=\"{}\" cy=\"{}\" r=\"{HANDLE_RADIUS}\" fill=\"{accent}\"/>",
            p.x, p.y,
        );
    }
}

/// Stand-in for an element whose geometry is unusable.
fn placeholder(doc: &mut SvgDocument) {
    doc.push(
        "<rect width=\"100\" height=\"100\" fill=\"none\" stroke=\"#94a3b8\" stroke-width=\"1\" stroke-dasharray=\"4 4\"/>",
    );
}
