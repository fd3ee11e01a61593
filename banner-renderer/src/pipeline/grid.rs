//! Grid overlay, drawn above all content.

use std::fmt::Write;

use super::FrameContext;
use crate::svg::SvgDocument;

#[allow(clippy::cast_precision_loss)]
pub(super) fn grid(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    if !ctx.viewport.show_grid {
        return false;
    }
    let cell = ctx.viewport.grid_size();
    let (w, h) = (doc.width(), doc.height());

    let mut d = String::new();
    let mut i = 1u32;
    while (i as f32) * cell < w {
        let x = i as f32 * cell;
        let _ = write!(d, "M {x} 0 L {x} {h} ");
        i += 1;
    }
    let mut j = 1u32;
    while (j as f32) * cell < h {
        let y = j as f32 * cell;
        let _ = write!(d, "M 0 {y} L {w} {y} ");
        j += 1;
    }

    let _ = write!(
        doc.body(),
        "<path d=\"{}\" fill=\"none\" stroke=\"#000000\" stroke-opacity=\"0.1\" stroke-width=\"1\"/>",
        d.trim_end(),
    );
    true
}
