//! Canvas elements - the freeform building blocks of a banner.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{finite_or, size_or_default, Point, DEFAULT_SIZE};

/// Default position for newly added elements.
pub const DEFAULT_POSITION: f32 = 100.0;

const DEFAULT_FILL: &str = "#e2e8f0";
const DEFAULT_LINE_STROKE: &str = "#64748b";

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interpolation used between consecutive points of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Direct segments.
    #[default]
    Straight,
    /// Quadratic curves through segment midpoints.
    Spline,
    /// Horizontal/vertical step connector through the horizontal midpoint.
    Ortho,
}

/// A former member of a group, stored by value with its offset from the
/// group origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChild {
    /// Full copy of the element as it was when grouped.
    #[serde(flatten)]
    pub element: Element,
    /// X offset from the group's origin.
    pub rel_x: f32,
    /// Y offset from the group's origin.
    pub rel_y: f32,
}

/// The shape payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    /// A single-line text run, drawn from its top-left corner.
    Text {
        /// Text content.
        #[serde(default = "default_text")]
        text: String,
        /// Font size in pixels.
        #[serde(default = "default_font_size")]
        font_size: f32,
        /// CSS-style font weight (`normal`, `bold`, `700`...).
        #[serde(default = "default_font_weight")]
        font_weight: String,
        /// Font family name.
        #[serde(default = "default_font_family")]
        font_family: String,
        /// Fill colour.
        #[serde(default = "default_text_color")]
        color: String,
    },

    /// An axis-aligned rectangle with its origin at the top-left.
    Rect {
        /// Width in pixels.
        #[serde(default = "default_size")]
        width: f32,
        /// Height in pixels.
        #[serde(default = "default_size")]
        height: f32,
        /// Fill colour.
        #[serde(default = "default_fill")]
        fill: String,
        /// Optional outline colour.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Outline width.
        #[serde(default = "default_shape_stroke_width")]
        stroke_width: f32,
    },

    /// A circle whose bounding square starts at the element origin.
    Circle {
        /// Diameter in pixels.
        #[serde(default = "default_size")]
        width: f32,
        /// Fill colour.
        #[serde(default = "default_fill")]
        fill: String,
        /// Optional outline colour.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Outline width.
        #[serde(default = "default_shape_stroke_width")]
        stroke_width: f32,
    },

    /// An open polyline through shape-local points.
    Line {
        /// Two or more points, relative to the element origin.
        #[serde(default = "default_line_points")]
        points: Vec<Point>,
        /// Interpolation between points.
        #[serde(default)]
        line_type: LineType,
        /// Stroke colour.
        #[serde(default = "default_line_stroke")]
        stroke: String,
        /// Stroke width.
        #[serde(default = "default_line_stroke_width")]
        stroke_width: f32,
    },

    /// A closed filled path through shape-local points.
    Polygon {
        /// Three or more points, relative to the element origin.
        #[serde(default = "default_polygon_points")]
        points: Vec<Point>,
        /// Fill colour.
        #[serde(default = "default_fill")]
        fill: String,
        /// Optional outline colour.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Outline width.
        #[serde(default = "default_shape_stroke_width")]
        stroke_width: f32,
    },

    /// A value-copy group of former top-level elements.
    Group {
        /// Width of the members' bounding box at creation time.
        #[serde(default = "default_size")]
        width: f32,
        /// Height of the members' bounding box at creation time.
        #[serde(default = "default_size")]
        height: f32,
        /// Member copies with offsets relative to the group origin.
        #[serde(default)]
        child_elements: Vec<GroupChild>,
    },
}

fn default_text() -> String {
    "Text".to_string()
}

fn default_font_size() -> f32 {
    24.0
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_family() -> String {
    "Inter".to_string()
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_size() -> f32 {
    DEFAULT_SIZE
}

fn default_fill() -> String {
    DEFAULT_FILL.to_string()
}

fn default_shape_stroke_width() -> f32 {
    2.0
}

fn default_line_stroke() -> String {
    DEFAULT_LINE_STROKE.to_string()
}

fn default_line_stroke_width() -> f32 {
    4.0
}

fn default_line_points() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)]
}

fn default_polygon_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]
}

impl ElementKind {
    /// Text with default styling.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            text: content.into(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_family: default_font_family(),
            color: default_text_color(),
        }
    }

    /// A rectangle with the default fill.
    #[must_use]
    pub fn rect(width: f32, height: f32) -> Self {
        Self::Rect {
            width,
            height,
            fill: default_fill(),
            stroke: None,
            stroke_width: default_shape_stroke_width(),
        }
    }

    /// A circle with the given diameter.
    #[must_use]
    pub fn circle(diameter: f32) -> Self {
        Self::Circle {
            width: diameter,
            fill: "#64748b".to_string(),
            stroke: None,
            stroke_width: default_shape_stroke_width(),
        }
    }

    /// A line through `points` using `line_type` interpolation.
    #[must_use]
    pub fn line(points: Vec<Point>, line_type: LineType) -> Self {
        Self::Line {
            points,
            line_type,
            stroke: default_line_stroke(),
            stroke_width: default_line_stroke_width(),
        }
    }

    /// The horizontal 200px straight line preset.
    #[must_use]
    pub fn straight_line() -> Self {
        Self::line(default_line_points(), LineType::Straight)
    }

    /// The three-point spline preset.
    #[must_use]
    pub fn spline() -> Self {
        Self::line(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(200.0, 0.0),
            ],
            LineType::Spline,
        )
    }

    /// The two-point orthogonal connector preset.
    #[must_use]
    pub fn ortho() -> Self {
        Self::line(
            vec![Point::new(0.0, 0.0), Point::new(200.0, 100.0)],
            LineType::Ortho,
        )
    }

    /// A polygon through `points`.
    #[must_use]
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::Polygon {
            points,
            fill: default_fill(),
            stroke: None,
            stroke_width: default_shape_stroke_width(),
        }
    }

    /// The 100px square polygon preset.
    #[must_use]
    pub fn square() -> Self {
        Self::polygon(default_polygon_points())
    }

    /// The triangle polygon preset.
    #[must_use]
    pub fn triangle() -> Self {
        Self::polygon(vec![
            Point::new(50.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
    }

    /// Lowercase type tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Line { .. } => "line",
            Self::Polygon { .. } => "polygon",
            Self::Group { .. } => "group",
        }
    }
}

/// A positioned, transformable drawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// X position (meaning depends on the element type).
    pub x: f32,
    /// Y position (meaning depends on the element type).
    pub y: f32,
    /// Clockwise rotation in degrees about the pivot.
    #[serde(default)]
    pub rotation: f32,
    /// Uniform scale about the pivot.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Optional layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shape payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn default_scale() -> f32 {
    1.0
}

impl Element {
    /// Create a new element at the default position.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        ElementDraft::new(kind).build()
    }

    /// Whether this is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }

    /// Line/polygon points, if this element has any.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match &self.kind {
            ElementKind::Line { points, .. } | ElementKind::Polygon { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Declared box size used when computing group bounds.
    ///
    /// A circle is its diameter square; types without a declared size fall
    /// back to 100x100.
    #[must_use]
    pub fn declared_size(&self) -> (f32, f32) {
        match &self.kind {
            ElementKind::Rect { width, height, .. } | ElementKind::Group { width, height, .. } => {
                (size_or_default(*width), size_or_default(*height))
            }
            ElementKind::Circle { width, .. } => {
                let d = size_or_default(*width);
                (d, d)
            }
            _ => (DEFAULT_SIZE, DEFAULT_SIZE),
        }
    }

    /// Finite origin, with non-finite coordinates treated as zero.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(finite_or(self.x, 0.0), finite_or(self.y, 0.0))
    }

    /// Finite uniform scale; anything unusable becomes 1.
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale != 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Layer-list label.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match &self.kind {
            ElementKind::Text { text, .. } if !text.is_empty() => text.clone(),
            ElementKind::Text { .. } => "Text Layer".to_string(),
            ElementKind::Group { child_elements, .. } => {
                format!("Group ({})", child_elements.len())
            }
            kind => {
                let tag = kind.type_name();
                let mut chars = tag.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            }
        }
    }

    /// Shallow-merge a patch into this element.
    ///
    /// Fields that do not exist on this element's variant are ignored. A
    /// `points` patch replaces the whole array, and an empty one is ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }

        match &mut self.kind {
            ElementKind::Text {
                text,
                font_size,
                font_weight,
                font_family,
                color,
            } => {
                assign(text, patch.text.as_ref());
                assign(font_size, patch.font_size.as_ref());
                assign(font_weight, patch.font_weight.as_ref());
                assign(font_family, patch.font_family.as_ref());
                assign(color, patch.color.as_ref());
            }
            ElementKind::Rect {
                width,
                height,
                fill,
                stroke,
                stroke_width,
            } => {
                assign(width, patch.width.as_ref());
                assign(height, patch.height.as_ref());
                assign(fill, patch.fill.as_ref());
                if let Some(s) = &patch.stroke {
                    *stroke = Some(s.clone());
                }
                assign(stroke_width, patch.stroke_width.as_ref());
            }
            ElementKind::Circle {
                width,
                fill,
                stroke,
                stroke_width,
            } => {
                assign(width, patch.width.as_ref());
                assign(fill, patch.fill.as_ref());
                if let Some(s) = &patch.stroke {
                    *stroke = Some(s.clone());
                }
                assign(stroke_width, patch.stroke_width.as_ref());
            }
            ElementKind::Line {
                points,
                line_type,
                stroke,
                stroke_width,
            } => {
                replace_points(points, patch.points.as_ref());
                assign(line_type, patch.line_type.as_ref());
                assign(stroke, patch.stroke.as_ref());
                assign(stroke_width, patch.stroke_width.as_ref());
            }
            ElementKind::Polygon {
                points,
                fill,
                stroke,
                stroke_width,
            } => {
                replace_points(points, patch.points.as_ref());
                assign(fill, patch.fill.as_ref());
                if let Some(s) = &patch.stroke {
                    *stroke = Some(s.clone());
                }
                assign(stroke_width, patch.stroke_width.as_ref());
            }
            ElementKind::Group { .. } => {}
        }
    }
}

fn assign<T: Clone>(slot: &mut T, value: Option<&T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn replace_points(slot: &mut Vec<Point>, value: Option<&Vec<Point>>) {
    if let Some(points) = value.filter(|p| !p.is_empty()) {
        slot.clone_from(points);
    }
}

/// Caller-supplied fields for a new element. Unset common fields take the
/// defaults `x = 100, y = 100, rotation = 0, scale = 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDraft {
    /// X position override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Rotation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// Scale override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Optional layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shape payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementDraft {
    /// Start a draft for the given shape.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            x: None,
            y: None,
            rotation: None,
            scale: None,
            name: None,
            kind,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Set the uniform scale.
    #[must_use]
    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the layer name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Merge over the defaults and assign a fresh id.
    #[must_use]
    pub fn build(self) -> Element {
        Element {
            id: ElementId::new(),
            x: self.x.unwrap_or(DEFAULT_POSITION),
            y: self.y.unwrap_or(DEFAULT_POSITION),
            rotation: self.rotation.unwrap_or(0.0),
            scale: self.scale.unwrap_or(1.0),
            name: self.name,
            kind: self.kind,
        }
    }
}

/// A partial update merged into an existing element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ElementPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub points: Option<Vec<Point>>,
    pub line_type: Option<LineType>,
}

impl ElementPatch {
    /// A patch that moves the element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that replaces the point list.
    #[must_use]
    pub fn points(points: Vec<Point>) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }
}
