//! Pointer-driven direct manipulation.
//!
//! ```text
//!                 pointer down (hit)
//!        ┌──────────────────────────────────────┐
//!        │                                      ▼
//!   ┌─────────┐   pointer up / leave   ┌─────────────────────┐
//!   │  Idle   │ ◀───────────────────── │ Dragging{Badge,     │
//!   └─────────┘                        │   Face, Element,    │
//!        ▲  │ pointer move: hover only │   Vertex}           │
//!        └──┘                          └─────────────────────┘
//!                                         │ pointer move:
//!                                         └─ emit position mutation
//! ```
//!
//! The controller never mutates the scene. It reads a snapshot and returns
//! [`Mutation`]s which the host applies through [`SceneHost`] before the
//! next render.

use serde::{Deserialize, Serialize};

use crate::badge::{BadgeId, BADGE_HIT_RADIUS};
use crate::element::{ElementId, ElementPatch};
use crate::event::{KeyEvent, KeyModifiers};
use crate::face::FacePatch;
use crate::geometry::{clamp_to_canvas, distance, point_in_bounds, snap_point, Bounds, Point};
use crate::viewport::{ViewportConfig, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::Scene;

/// Hit radius around a vertex handle of a selected line or polygon.
pub const VERTEX_HIT_RADIUS: f32 = 10.0;

/// The single active drag, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging a badge.
    Badge {
        /// Dragged badge.
        id: BadgeId,
        /// Pointer position minus badge centre at press time.
        offset: Point,
    },
    /// Dragging the face cutout.
    Face {
        /// Pointer position minus face origin at press time.
        offset: Point,
    },
    /// Dragging an element body.
    Element {
        /// Dragged element.
        id: ElementId,
        /// Pointer position minus element origin at press time.
        offset: Point,
    },
    /// Dragging one vertex of a line or polygon.
    Vertex {
        /// Edited element.
        id: ElementId,
        /// Index into the element's points.
        point_index: usize,
    },
}

impl DragState {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    /// A vertex handle of a selected line/polygon.
    Vertex {
        /// Owning element.
        id: ElementId,
        /// Point index.
        point_index: usize,
    },
    /// An element body.
    Element(ElementId),
    /// A badge and its centre.
    Badge {
        /// Hit badge.
        id: BadgeId,
        /// Badge centre.
        center: Point,
    },
    /// The face cutout and its cached bounds.
    Face(Bounds),
    /// Empty canvas.
    Nothing,
}

/// A state change requested by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Mutation {
    /// Change the selection. `None` clears it; `additive` toggles.
    Select {
        /// Target element.
        id: Option<ElementId>,
        /// Toggle instead of replace.
        additive: bool,
    },
    /// Merge a patch into an element.
    UpdateElement {
        /// Target element.
        id: ElementId,
        /// Fields to merge.
        patch: ElementPatch,
    },
    /// Move a badge centre.
    MoveBadge {
        /// Target badge.
        id: BadgeId,
        /// New centre X.
        x: f32,
        /// New centre Y.
        y: f32,
    },
    /// Merge a patch into the face configuration.
    UpdateFace(FacePatch),
    /// Remove elements.
    DeleteElements(Vec<ElementId>),
}

/// Host-side state mutation callbacks.
pub trait SceneHost {
    /// Change the selection.
    fn select(&mut self, id: Option<ElementId>, additive: bool);

    /// Merge a patch into an element; unknown ids are ignored.
    fn update_element(&mut self, id: ElementId, patch: &ElementPatch);

    /// Move a badge; unknown ids are ignored.
    fn update_badge_position(&mut self, id: BadgeId, x: f32, y: f32);

    /// Merge a patch into the face configuration.
    fn update_face_config(&mut self, patch: &FacePatch);

    /// Remove elements; unknown ids are ignored.
    fn delete_elements(&mut self, ids: &[ElementId]);

    /// Dispatch one mutation to the matching callback.
    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::Select { id, additive } => self.select(*id, *additive),
            Mutation::UpdateElement { id, patch } => self.update_element(*id, patch),
            Mutation::MoveBadge { id, x, y } => self.update_badge_position(*id, *x, *y),
            Mutation::UpdateFace(patch) => self.update_face_config(patch),
            Mutation::DeleteElements(ids) => self.delete_elements(ids),
        }
    }

    /// Dispatch mutations in order.
    fn apply_all(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            self.apply(mutation);
        }
    }
}

impl SceneHost for Scene {
    fn select(&mut self, id: Option<ElementId>, additive: bool) {
        Scene::select(self, id, additive);
    }

    fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        Scene::update_element(self, id, patch);
    }

    fn update_badge_position(&mut self, id: BadgeId, x: f32, y: f32) {
        Scene::update_badge_position(self, id, x, y);
    }

    fn update_face_config(&mut self, patch: &FacePatch) {
        self.update_face(patch);
    }

    fn delete_elements(&mut self, ids: &[ElementId]) {
        Scene::delete_elements(self, ids);
    }
}

/// Cursor feedback for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorHint {
    /// Nothing interactive under the pointer.
    Default,
    /// An interactive target is under the pointer.
    Move,
    /// A drag is in progress.
    Grabbing,
}

/// Read-only view of everything hit-testing needs.
#[derive(Debug, Clone, Copy)]
pub struct InteractionSnapshot<'a> {
    /// Current scene.
    pub scene: &'a Scene,
    /// Current viewport settings.
    pub viewport: &'a ViewportConfig,
    /// Face bounds from the most recent render.
    pub face_bounds: Option<Bounds>,
}

impl<'a> InteractionSnapshot<'a> {
    /// Bundle a snapshot.
    #[must_use]
    pub fn new(scene: &'a Scene, viewport: &'a ViewportConfig, face_bounds: Option<Bounds>) -> Self {
        Self {
            scene,
            viewport,
            face_bounds,
        }
    }

    fn snap(&self, p: Point) -> Point {
        if self.viewport.snap_to_grid {
            snap_point(p, self.viewport.grid_size())
        } else {
            p
        }
    }
}

/// The drag state machine.
#[derive(Debug, Clone)]
pub struct InteractionController {
    drag: DragState,
    canvas_width: f32,
    canvas_height: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Create an idle controller for the standard banner canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::with_canvas_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Create an idle controller for a custom canvas size.
    #[must_use]
    pub fn with_canvas_size(width: f32, height: f32) -> Self {
        Self {
            drag: DragState::Idle,
            canvas_width: width,
            canvas_height: height,
        }
    }

    /// The active drag.
    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Resolve a canvas point against the scene, topmost first.
    ///
    /// Elements are tested before badges, badges before the face. Within
    /// an already selected line or polygon, vertex handles win over the
    /// body.
    #[must_use]
    pub fn hit_test(snapshot: &InteractionSnapshot<'_>, pos: Point) -> HitTarget {
        if !pos.is_finite() {
            return HitTarget::Nothing;
        }
        let scene = snapshot.scene;

        for element in scene.elements().iter().rev() {
            if scene.is_selected(element.id) {
                if let Some(points) = element.points() {
                    let origin = element.origin();
                    let handle = points.iter().position(|p| {
                        distance(pos, origin.offset(p.x, p.y)) < VERTEX_HIT_RADIUS
                    });
                    if let Some(point_index) = handle {
                        return HitTarget::Vertex {
                            id: element.id,
                            point_index,
                        };
                    }
                }
            }
            if point_in_bounds(pos, element) {
                return HitTarget::Element(element.id);
            }
        }

        for badge in scene.badges().iter().rev() {
            let center = Point::new(badge.x, badge.y);
            if distance(pos, center) < BADGE_HIT_RADIUS {
                return HitTarget::Badge {
                    id: badge.id,
                    center,
                };
            }
        }

        if scene.face.has_image() {
            if let Some(bounds) = snapshot.face_bounds.filter(|b| b.contains(pos)) {
                return HitTarget::Face(bounds);
            }
        }

        HitTarget::Nothing
    }

    /// Handle a press: pick the drag target and update the selection.
    pub fn pointer_down(
        &mut self,
        snapshot: &InteractionSnapshot<'_>,
        pos: Point,
        modifiers: KeyModifiers,
    ) -> Vec<Mutation> {
        self.drag = DragState::Idle;
        let additive = modifiers.shift;

        match Self::hit_test(snapshot, pos) {
            HitTarget::Vertex { id, point_index } => {
                tracing::debug!("Start vertex drag on {id} point {point_index}");
                self.drag = DragState::Vertex { id, point_index };
                vec![Mutation::Select {
                    id: Some(id),
                    additive,
                }]
            }
            HitTarget::Element(id) => {
                let origin = snapshot
                    .scene
                    .element(id)
                    .map_or_else(Point::zero, crate::Element::origin);
                tracing::debug!("Start element drag on {id}");
                self.drag = DragState::Element {
                    id,
                    offset: pos.sub(origin),
                };
                vec![Mutation::Select {
                    id: Some(id),
                    additive,
                }]
            }
            HitTarget::Badge { id, center } => {
                tracing::debug!("Start badge drag on {id}");
                self.drag = DragState::Badge {
                    id,
                    offset: pos.sub(center),
                };
                Vec::new()
            }
            HitTarget::Face(bounds) => {
                tracing::debug!("Start face drag");
                self.drag = DragState::Face {
                    offset: pos.sub(Point::new(bounds.x, bounds.y)),
                };
                Vec::new()
            }
            HitTarget::Nothing => vec![Mutation::Select {
                id: None,
                additive: false,
            }],
        }
    }

    /// Handle a move. Produces a position mutation while dragging and
    /// nothing otherwise. A drag whose target no longer exists is a no-op.
    #[must_use]
    pub fn pointer_move(&self, snapshot: &InteractionSnapshot<'_>, pos: Point) -> Vec<Mutation> {
        if !pos.is_finite() {
            return Vec::new();
        }
        let scene = snapshot.scene;

        match self.drag {
            DragState::Idle => Vec::new(),
            DragState::Badge { id, offset } => {
                if scene.badge(id).is_none() {
                    return Vec::new();
                }
                let target = snapshot.snap(pos.sub(offset));
                vec![Mutation::MoveBadge {
                    id,
                    x: target.x,
                    y: target.y,
                }]
            }
            DragState::Face { offset } => {
                if !scene.face.has_image() {
                    return Vec::new();
                }
                let target = snapshot.snap(pos.sub(offset));
                vec![Mutation::UpdateFace(FacePatch::position(target.x, target.y))]
            }
            DragState::Element { id, offset } => {
                if scene.element(id).is_none() {
                    return Vec::new();
                }
                let target = snapshot.snap(pos.sub(offset));
                vec![Mutation::UpdateElement {
                    id,
                    patch: ElementPatch::position(target.x, target.y),
                }]
            }
            DragState::Vertex { id, point_index } => {
                let Some(element) = scene.element(id) else {
                    return Vec::new();
                };
                let Some(points) = element.points().filter(|p| point_index < p.len()) else {
                    return Vec::new();
                };
                let clamped = clamp_to_canvas(pos, self.canvas_width, self.canvas_height);
                let local = snapshot.snap(clamped).sub(element.origin());
                let mut updated = points.to_vec();
                updated[point_index] = local;
                vec![Mutation::UpdateElement {
                    id,
                    patch: ElementPatch::points(updated),
                }]
            }
        }
    }

    /// Handle a release (or the pointer leaving the canvas): always idle.
    pub fn pointer_up(&mut self) {
        if self.drag.is_active() {
            tracing::debug!("End drag {:?}", self.drag);
        }
        self.drag = DragState::Idle;
    }

    /// Cursor feedback for a pointer position. Never mutates state.
    #[must_use]
    pub fn hover(&self, snapshot: &InteractionSnapshot<'_>, pos: Point) -> CursorHint {
        if self.drag.is_active() {
            return CursorHint::Grabbing;
        }
        match Self::hit_test(snapshot, pos) {
            HitTarget::Nothing => CursorHint::Default,
            _ => CursorHint::Move,
        }
    }

    /// Handle a key press. Delete/Backspace removes the selection unless
    /// focus is in a text field.
    #[must_use]
    pub fn key_down(&self, snapshot: &InteractionSnapshot<'_>, key: &KeyEvent) -> Vec<Mutation> {
        if !key.is_delete() || key.text_input_focused {
            return Vec::new();
        }
        let ids: Vec<_> = snapshot.scene.selected_elements().map(|e| e.id).collect();
        if ids.is_empty() {
            return Vec::new();
        }
        tracing::debug!("Delete {} selected elements", ids.len());
        vec![Mutation::DeleteElements(ids)]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::badge::{Badge, BadgeKind};
    use crate::element::{ElementDraft, ElementKind};

    fn press(
        controller: &mut InteractionController,
        scene: &mut Scene,
        viewport: &ViewportConfig,
        x: f32,
        y: f32,
        modifiers: KeyModifiers,
    ) {
        let mutations = {
            let snap = InteractionSnapshot::new(scene, viewport, None);
            controller.pointer_down(&snap, Point::new(x, y), modifiers)
        };
        scene.apply_all(&mutations);
    }

    fn drag_to(
        controller: &InteractionController,
        scene: &mut Scene,
        viewport: &ViewportConfig,
        x: f32,
        y: f32,
    ) {
        let mutations = {
            let snap = InteractionSnapshot::new(scene, viewport, None);
            controller.pointer_move(&snap, Point::new(x, y))
        };
        scene.apply_all(&mutations);
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let mut scene = Scene::new();
        scene.add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(0.0, 0.0));
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();

        press(&mut controller, &mut scene, &viewport, 800.0, 300.0, KeyModifiers::default());
        assert!(scene.selection().is_empty());
        assert!(!controller.drag_state().is_active());
    }

    #[test]
    fn test_element_drag_keeps_anchor_offset() {
        let mut scene = Scene::new();
        let id = scene
            .add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(0.0, 0.0))
            .id;
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();

        press(&mut controller, &mut scene, &viewport, 30.0, 40.0, KeyModifiers::default());
        drag_to(&controller, &mut scene, &viewport, 130.0, 45.0);
        let el = scene.element(id).expect("element");
        assert_eq!((el.x, el.y), (100.0, 5.0));
    }

    #[test]
    fn test_badge_beats_face_and_face_needs_image() {
        let mut scene = Scene::new();
        let badge = scene.insert_badge(Badge::new(BadgeKind::Zap, 1010.0, 110.0));
        let viewport = ViewportConfig::default();
        let bounds = Some(Bounds::new(1000.0, 100.0, 200.0, 200.0));

        let snap = InteractionSnapshot::new(&scene, &viewport, bounds);
        assert!(matches!(
            InteractionController::hit_test(&snap, Point::new(1012.0, 112.0)),
            HitTarget::Badge { id, .. } if id == badge
        ));
        // No face image: cached bounds are ignored.
        assert_eq!(
            InteractionController::hit_test(&snap, Point::new(1150.0, 250.0)),
            HitTarget::Nothing
        );

        scene.face.image = Some("face.png".to_string());
        let snap = InteractionSnapshot::new(&scene, &viewport, bounds);
        assert!(matches!(
            InteractionController::hit_test(&snap, Point::new(1150.0, 250.0)),
            HitTarget::Face(_)
        ));
    }

    #[test]
    fn test_face_drag_moves_origin() {
        let mut scene = Scene::new();
        scene.face.image = Some("face.png".to_string());
        let viewport = ViewportConfig::default();
        let bounds = Some(Bounds::new(1000.0, 100.0, 200.0, 200.0));
        let mut controller = InteractionController::new();

        let snap = InteractionSnapshot::new(&scene, &viewport, bounds);
        assert!(controller
            .pointer_down(&snap, Point::new(1050.0, 150.0), KeyModifiers::default())
            .is_empty());
        let mutations = controller.pointer_move(&snap, Point::new(1060.0, 140.0));
        scene.apply_all(&mutations);
        assert_eq!((scene.face.x, scene.face.y), (1010.0, 90.0));
    }

    #[test]
    fn test_vertex_handles_only_when_selected() {
        let mut scene = Scene::new();
        let id = scene
            .add_element(ElementDraft::new(ElementKind::square()).at(100.0, 100.0))
            .id;
        let viewport = ViewportConfig::default();

        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert_eq!(
            InteractionController::hit_test(&snap, Point::new(202.0, 198.0)),
            HitTarget::Vertex { id, point_index: 2 }
        );

        scene.clear_selection();
        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert_eq!(
            InteractionController::hit_test(&snap, Point::new(202.0, 198.0)),
            HitTarget::Element(id)
        );
    }

    #[test]
    fn test_vertex_drag_is_clamped_to_canvas() {
        let mut scene = Scene::new();
        let id = scene
            .add_element(ElementDraft::new(ElementKind::square()).at(100.0, 100.0))
            .id;
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();

        press(&mut controller, &mut scene, &viewport, 100.0, 100.0, KeyModifiers::default());
        assert!(matches!(controller.drag_state(), DragState::Vertex { point_index: 0, .. }));
        drag_to(&controller, &mut scene, &viewport, -50.0, 9000.0);
        let points = scene.element(id).and_then(|e| e.points()).expect("points");
        assert_eq!(points[0], Point::new(-100.0, 296.0));
    }

    #[test]
    fn test_drag_target_deleted_mid_drag_is_noop() {
        let mut scene = Scene::new();
        let id = scene
            .add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(0.0, 0.0))
            .id;
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();

        press(&mut controller, &mut scene, &viewport, 10.0, 10.0, KeyModifiers::default());
        scene.delete_element(id).expect("delete");
        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert!(controller.pointer_move(&snap, Point::new(50.0, 50.0)).is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_pointer_up_always_idles() {
        let mut scene = Scene::new();
        scene.add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(0.0, 0.0));
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();
        press(&mut controller, &mut scene, &viewport, 10.0, 10.0, KeyModifiers::default());
        assert!(controller.drag_state().is_active());
        controller.pointer_up();
        assert_eq!(*controller.drag_state(), DragState::Idle);
        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert!(controller.pointer_move(&snap, Point::new(300.0, 300.0)).is_empty());
    }

    #[test]
    fn test_hover_hints() {
        let mut scene = Scene::new();
        scene.add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(0.0, 0.0));
        let viewport = ViewportConfig::default();
        let mut controller = InteractionController::new();

        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert_eq!(controller.hover(&snap, Point::new(50.0, 50.0)), CursorHint::Move);
        assert_eq!(controller.hover(&snap, Point::new(500.0, 50.0)), CursorHint::Default);
        controller.pointer_down(&snap, Point::new(50.0, 50.0), KeyModifiers::default());
        assert_eq!(controller.hover(&snap, Point::new(500.0, 50.0)), CursorHint::Grabbing);
    }

    #[test]
    fn test_delete_key_suppressed_in_text_input() {
        let mut scene = Scene::new();
        scene.add_element(ElementDraft::new(ElementKind::text("Draft")));
        let viewport = ViewportConfig::default();
        let controller = InteractionController::new();
        let snap = InteractionSnapshot::new(&scene, &viewport, None);

        assert!(controller
            .key_down(&snap, &KeyEvent::new("Backspace").in_text_input())
            .is_empty());
        let mutations = controller.key_down(&snap, &KeyEvent::new("Delete"));
        assert_eq!(mutations.len(), 1);
        scene.apply_all(&mutations);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_delete_key_without_selection_is_noop() {
        let mut scene = Scene::new();
        scene.add_element(ElementDraft::new(ElementKind::text("Keep")));
        scene.clear_selection();
        let viewport = ViewportConfig::default();
        let controller = InteractionController::new();
        let snap = InteractionSnapshot::new(&scene, &viewport, None);
        assert!(controller.key_down(&snap, &KeyEvent::new("Delete")).is_empty());
    }
}
