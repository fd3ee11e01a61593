//! # Banner Core
//!
//! Core logic for the profile banner editor: the scene model, geometry,
//! hit-testing and the pointer interaction state machine. Rendering lives
//! in `banner-renderer`; this crate has no drawing dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 banner-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Scene           │  Interaction             │
//! │  - Elements      │  - Hit-testing           │
//! │  - Badges, face  │  - Drag state machine    │
//! │  - Groups        │  - Mutations → SceneHost │
//! ├─────────────────────────────────────────────┤
//! │  Backdrop        │  Geometry                │
//! │  - Templates     │  - Pivots, hit boxes     │
//! │  - Palettes      │  - Grid snapping         │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backdrop;
pub mod badge;
pub mod element;
pub mod error;
pub mod event;
pub mod face;
pub mod geometry;
pub mod interaction;
pub mod palette;
pub mod scene;
pub mod selection;
pub mod state;
pub mod template;
pub mod viewport;

pub use backdrop::{Backdrop, TextContent, CTA_TEXT};
pub use badge::{Badge, BadgeId, BadgeKind, BADGE_HIT_RADIUS, BADGE_RADIUS};
pub use element::{
    Element, ElementDraft, ElementId, ElementKind, ElementPatch, GroupChild, LineType,
};
pub use error::{CanvasError, CanvasResult};
pub use event::{InputEvent, KeyEvent, KeyModifiers, PointerEvent, PointerPhase};
pub use face::{FaceConfig, FaceFilters, FacePatch};
pub use geometry::{ApproxTextMeasure, Bounds, Point, TextMeasure};
pub use interaction::{
    CursorHint, DragState, HitTarget, InteractionController, InteractionSnapshot, Mutation,
    SceneHost,
};
pub use palette::{Palette, Profession, BLANK_PROFESSION_ID};
pub use scene::Scene;
pub use selection::Selection;
pub use state::{CanvasState, EventOutcome};
pub use template::{Template, TemplateLayout, TemplateStyle, TextAnchor};
pub use viewport::{ViewportConfig, CANVAS_HEIGHT, CANVAS_WIDTH, GRID_SIZE};

/// Banner core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
