//! Geometry and transform helpers shared by hit-testing and rendering.
//!
//! Every element is drawn by translating to its absolute pivot, rotating
//! clockwise by `rotation` degrees, scaling uniformly by `scale` and then
//! drawing the shape in pivot-relative coordinates. Hit-testing ignores the
//! rotation and scale and works on unrotated, axis-aligned boxes.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};

/// Fallback width/height for elements that do not declare a size.
pub const DEFAULT_SIZE: f32 = 100.0;

/// Approximate hit box of a text element.
pub const TEXT_HIT_WIDTH: f32 = 200.0;
/// Approximate hit box height of a text element.
pub const TEXT_HIT_HEIGHT: f32 = 50.0;

/// Margin added around a line/polygon's point bounds when hit-testing.
pub const POINTS_HIT_MARGIN: f32 = 10.0;

/// A point in canvas or shape-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Offset this point by another.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise subtraction.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Bounds {
    /// Create new bounds.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow the bounds by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Bounding box of a set of points, or `None` if no finite point exists.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite());
        let first = finite.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in finite {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Measures rendered text width. Height is approximated by the font size.
pub trait TextMeasure {
    /// Width in canvas units of `text` drawn at `font_size`.
    fn text_width(&self, text: &str, font_size: f32, font_weight: &str, font_family: &str) -> f32;
}

/// Font-independent text measurement: a fixed advance per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: f32, font_weight: &str, _font_family: &str) -> f32 {
        let advance = match font_weight {
            "bold" | "bolder" | "600" | "700" | "800" | "900" => 0.65,
            _ => 0.6,
        };
        text.chars().count() as f32 * font_size * advance
    }
}

/// Replace a non-finite value with `default`.
#[must_use]
pub fn finite_or(value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// Replace a non-finite or non-positive size with [`DEFAULT_SIZE`].
#[must_use]
pub fn size_or_default(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        DEFAULT_SIZE
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Arithmetic mean of all finite points. Empty input yields the origin.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point]) -> Point {
    let (sum_x, sum_y, count) = points
        .iter()
        .filter(|p| p.is_finite())
        .fold((0.0_f32, 0.0_f32, 0_usize), |(sx, sy, n), p| {
            (sx + p.x, sy + p.y, n + 1)
        });
    if count == 0 {
        return Point::zero();
    }
    Point::new(sum_x / count as f32, sum_y / count as f32)
}

/// Round `value` to the nearest multiple of `grid`.
#[must_use]
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 || !value.is_finite() {
        return value;
    }
    // `+ 0.0` folds negative zero into positive zero.
    (value / grid).round() * grid + 0.0
}

/// Snap both axes of a point.
#[must_use]
pub fn snap_point(p: Point, grid: f32) -> Point {
    Point::new(snap_to_grid(p.x, grid), snap_to_grid(p.y, grid))
}

/// Restrict a point to `[0, width] x [0, height]`.
#[must_use]
pub fn clamp_to_canvas(p: Point, width: f32, height: f32) -> Point {
    Point::new(
        finite_or(p.x, 0.0).clamp(0.0, width),
        finite_or(p.y, 0.0).clamp(0.0, height),
    )
}

/// Rotation in degrees normalised to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let d = finite_or(degrees, 0.0).rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Pivot of an element relative to its own `(x, y)` origin.
///
/// - text: centre of the measured box (height = font size)
/// - rect and group: centre of the declared box
/// - circle: `(radius, radius)`
/// - line and polygon: centroid of the points
#[must_use]
pub fn compute_pivot(element: &Element, measure: &dyn TextMeasure) -> Point {
    match &element.kind {
        ElementKind::Text {
            text,
            font_size,
            font_weight,
            font_family,
            ..
        } => {
            let size = size_or_default(*font_size);
            let width = finite_or(measure.text_width(text, size, font_weight, font_family), 0.0);
            Point::new(width / 2.0, size / 2.0)
        }
        ElementKind::Rect { width, height, .. } | ElementKind::Group { width, height, .. } => {
            Point::new(size_or_default(*width) / 2.0, size_or_default(*height) / 2.0)
        }
        ElementKind::Circle { width, .. } => {
            let radius = size_or_default(*width) / 2.0;
            Point::new(radius, radius)
        }
        ElementKind::Line { points, .. } | ElementKind::Polygon { points, .. } => centroid(points),
    }
}

/// Axis-aligned hit box of an element in absolute canvas space.
///
/// Rotation and scale are ignored; this is an approximation and matches the
/// boxes the pointer controller has always used.
#[must_use]
pub fn hit_bounds(element: &Element) -> Bounds {
    let (x, y) = (finite_or(element.x, 0.0), finite_or(element.y, 0.0));
    match &element.kind {
        ElementKind::Text { .. } => Bounds::new(x, y, TEXT_HIT_WIDTH, TEXT_HIT_HEIGHT),
        ElementKind::Rect { width, height, .. } | ElementKind::Group { width, height, .. } => {
            Bounds::new(x, y, size_or_default(*width), size_or_default(*height))
        }
        ElementKind::Line { points, .. } | ElementKind::Polygon { points, .. } => {
            match Bounds::from_points(points) {
                Some(b) => Bounds::new(x + b.x, y + b.y, b.width, b.height).expand(POINTS_HIT_MARGIN),
                None => Bounds::new(x, y, DEFAULT_SIZE, DEFAULT_SIZE),
            }
        }
        ElementKind::Circle { .. } => Bounds::new(x, y, DEFAULT_SIZE, DEFAULT_SIZE),
    }
}

/// Whether `point` falls inside the element's unrotated hit box.
#[must_use]
pub fn point_in_bounds(point: Point, element: &Element) -> bool {
    point.is_finite() && hit_bounds(element).contains(point)
}
