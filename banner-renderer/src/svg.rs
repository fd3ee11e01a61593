//! Frame document assembly and path data helpers.

use std::fmt::Write;

use banner_core::geometry::{finite_or, Point};
use banner_core::LineType;

/// An SVG document under construction.
///
/// Shared definitions (filters, gradients, clip paths) are collected
/// separately from the drawing body and emitted first.
#[derive(Debug)]
pub struct SvgDocument {
    width: f32,
    height: f32,
    pixel_width: u32,
    pixel_height: u32,
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgDocument {
    /// Start a document with a logical `width x height` view box drawn
    /// into a `pixel_width x pixel_height` surface.
    #[must_use]
    pub fn new(width: f32, height: f32, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            width,
            height,
            pixel_width,
            pixel_height,
            defs: String::new(),
            body: String::with_capacity(4096),
            next_id: 0,
        }
    }

    /// Logical width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// A document-unique id with the given prefix.
    pub fn unique_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Append markup to the `<defs>` section.
    pub fn def(&mut self, markup: &str) {
        self.defs.push_str(markup);
    }

    /// Append markup to the drawing body.
    pub fn push(&mut self, markup: &str) {
        self.body.push_str(markup);
    }

    /// Mutable access to the body for `write!`.
    pub fn body(&mut self) -> &mut String {
        &mut self.body
    }

    /// Open a named layer group.
    pub fn open_layer(&mut self, name: &str) {
        let _ = write!(self.body, "<g id=\"layer-{name}\">");
    }

    /// Close the innermost open group.
    pub fn close_group(&mut self) {
        self.body.push_str("</g>");
    }

    /// Current body length, for a later [`SvgDocument::rollback`].
    #[must_use]
    pub fn checkpoint(&self) -> usize {
        self.body.len()
    }

    /// Drop body markup written after `mark`.
    pub fn rollback(&mut self, mark: usize) {
        self.body.truncate(mark);
    }

    /// Serialize the finished document.
    #[must_use]
    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.pixel_width, self.pixel_height, self.width, self.height,
        );
        if !self.defs.is_empty() {
            let _ = write!(svg, "<defs>{}</defs>", self.defs);
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

/// Escape special XML characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Path data through `points` using the interpolation of `line_type`.
///
/// Returns `None` for fewer than two points.
#[must_use]
pub fn line_path_data(points: &[Point], line_type: LineType) -> Option<String> {
    let points: Vec<Point> = points.iter().map(|p| sanitize(*p)).collect();
    if points.len() < 2 {
        return None;
    }
    Some(match line_type {
        LineType::Straight => straight_path_data(&points),
        LineType::Spline => spline_path_data(&points),
        LineType::Ortho => ortho_path_data(&points),
    })
}

/// Closed path data through `points`. Returns `None` for no points.
#[must_use]
pub fn polygon_path_data(points: &[Point]) -> Option<String> {
    let first = points.first()?;
    let mut d = move_to(sanitize(*first));
    for p in &points[1..] {
        line_to(&mut d, sanitize(*p));
    }
    d.push_str(" Z");
    Some(d)
}

/// Direct segments between consecutive points.
fn straight_path_data(points: &[Point]) -> String {
    let mut d = move_to(points[0]);
    for p in &points[1..] {
        line_to(&mut d, *p);
    }
    d
}

/// Quadratic curves using each interior point as the control point and
/// the midpoint of the following segment as the end point.
fn spline_path_data(points: &[Point]) -> String {
    let mut d = move_to(points[0]);
    let last = points.len() - 1;
    for i in 1..last {
        let ctrl = points[i];
        let end = ctrl.midpoint(points[i + 1]);
        let _ = write!(d, " Q {} {} {} {}", ctrl.x, ctrl.y, end.x, end.y);
    }
    line_to(&mut d, points[last]);
    d
}

/// Horizontal-first step connectors routed through the horizontal
/// midpoint of each segment.
fn ortho_path_data(points: &[Point]) -> String {
    let mut d = move_to(points[0]);
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mid_x = start.midpoint(end).x;
        line_to(&mut d, Point::new(mid_x, start.y));
        line_to(&mut d, Point::new(mid_x, end.y));
        line_to(&mut d, end);
    }
    d
}

fn move_to(p: Point) -> String {
    format!("M {} {}", p.x, p.y)
}

fn line_to(d: &mut String, p: Point) {
    let _ = write!(d, " L {} {}", p.x, p.y);
}

fn sanitize(p: Point) -> Point {
    Point::new(finite_or(p.x, 0.0), finite_or(p.y, 0.0))
}
