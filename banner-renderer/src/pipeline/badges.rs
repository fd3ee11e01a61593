//! Badges: white discs with a palette-tinted glyph.

use std::fmt::Write;

use banner_core::geometry::finite_or;
use banner_core::BADGE_RADIUS;

use super::FrameContext;
use crate::svg::{escape_xml, SvgDocument};

pub(super) fn badges(doc: &mut SvgDocument, ctx: &FrameContext<'_>) -> bool {
    let badges = ctx.scene.badges();
    if badges.is_empty() {
        return false;
    }

    let shadow = doc.unique_id("badge-shadow");
    doc.def(&format!(
        "<filter id=\"{shadow}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"2.5\" flood-color=\"#000000\" flood-opacity=\"0.2\"/></filter>"
    ));
    let tint = escape_xml(ctx.palette.primary());

    for badge in badges {
        let _ = write!(
            doc.body(),
            "<g transform=\"translate({} {})\"><circle r=\"{BADGE_RADIUS}\" fill=\"#ffffff\" filter=\"url(#{shadow})\"/><text x=\"0\" y=\"2\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"Inter, sans-serif\" font-size=\"20\" font-weight=\"bold\" fill=\"{tint}\">{}</text></g>",
            finite_or(badge.x, 0.0),
            finite_or(badge.y, 0.0),
            badge.kind.glyph(),
        );
    }
    true
}
