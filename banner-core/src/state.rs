//! Canvas state management.

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::interaction::{CursorHint, InteractionController, InteractionSnapshot, SceneHost};
use crate::{InputEvent, PointerPhase, Scene, ViewportConfig};

/// The result of feeding one event to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Cursor the host should show.
    pub cursor: CursorHint,
    /// Whether the scene changed and needs re-rendering.
    pub changed: bool,
}

/// The complete editor state: scene, viewport and the drag controller.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    /// The scene.
    pub scene: Scene,
    /// Zoom and grid settings.
    pub viewport: ViewportConfig,
    controller: InteractionController,
    /// Face bounds from the most recent render.
    face_bounds: Option<Bounds>,
    /// Whether there are changes not yet rendered.
    pub has_local_changes: bool,
}

impl CanvasState {
    /// Create state around an existing scene.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Record the face bounds the renderer produced for the latest frame.
    pub fn set_face_bounds(&mut self, bounds: Option<Bounds>) {
        self.face_bounds = bounds;
    }

    /// Face bounds from the most recent render.
    #[must_use]
    pub fn face_bounds(&self) -> Option<Bounds> {
        self.face_bounds
    }

    /// The drag controller.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Mark the state as rendered.
    pub fn mark_rendered(&mut self) {
        self.has_local_changes = false;
    }

    /// Process an input event. Pointer coordinates are in display pixels
    /// and are mapped to canvas units through the viewport zoom.
    pub fn process_event(&mut self, event: &InputEvent) -> EventOutcome {
        let mutations = match event {
            InputEvent::Pointer(pointer) => {
                let pos = self.viewport.screen_to_canvas(pointer.x, pointer.y);
                let snapshot = InteractionSnapshot::new(&self.scene, &self.viewport, self.face_bounds);
                match pointer.phase {
                    PointerPhase::Down => {
                        self.controller
                            .pointer_down(&snapshot, pos, pointer.modifiers)
                    }
                    PointerPhase::Move => self.controller.pointer_move(&snapshot, pos),
                    PointerPhase::Up | PointerPhase::Leave => {
                        self.controller.pointer_up();
                        Vec::new()
                    }
                }
            }
            InputEvent::Key(key) => {
                let snapshot = InteractionSnapshot::new(&self.scene, &self.viewport, self.face_bounds);
                self.controller.key_down(&snapshot, key)
            }
        };

        let changed = !mutations.is_empty();
        self.scene.apply_all(&mutations);
        if changed {
            self.has_local_changes = true;
        }

        let cursor = match event {
            InputEvent::Pointer(pointer) => {
                let pos = self.viewport.screen_to_canvas(pointer.x, pointer.y);
                let snapshot = InteractionSnapshot::new(&self.scene, &self.viewport, self.face_bounds);
                self.controller.hover(&snapshot, pos)
            }
            InputEvent::Key(_) => CursorHint::Default,
        };

        EventOutcome { cursor, changed }
    }
}
