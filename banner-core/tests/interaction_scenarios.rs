//! End-to-end editing scenarios for banner-core.
//!
//! These tests drive the scene through [`CanvasState::process_event`] the
//! way a host forwards pointer and key input, and check:
//! - element creation defaults
//! - topmost-first hit-testing and selection rules
//! - grouping and ungrouping round trips
//! - badge, face and vertex drags, with and without grid snap
//! - the delete key and its text-field guard

#![allow(clippy::float_cmp)]

use banner_core::{
    Badge, BadgeKind, CanvasState, CursorHint, DragState, ElementDraft, ElementId, ElementKind,
    FacePatch, InputEvent, KeyEvent, KeyModifiers, Point, PointerEvent, PointerPhase, Scene,
};

/// A rect draft at an explicit position.
fn rect(x: f32, y: f32, width: f32, height: f32) -> ElementDraft {
    ElementDraft::new(ElementKind::rect(width, height)).at(x, y)
}

/// Scene with R1 (0,0,100,100) below R2 (50,50,100,100), nothing selected.
fn overlapping_rects() -> (CanvasState, ElementId, ElementId) {
    let mut scene = Scene::new();
    let r1 = scene.add_element(rect(0.0, 0.0, 100.0, 100.0)).id;
    let r2 = scene.add_element(rect(50.0, 50.0, 100.0, 100.0)).id;
    scene.clear_selection();
    (CanvasState::new(scene), r1, r2)
}

fn pointer(state: &mut CanvasState, phase: PointerPhase, x: f32, y: f32) -> bool {
    state
        .process_event(&InputEvent::Pointer(PointerEvent::new(phase, x, y)))
        .changed
}

fn shift_click(state: &mut CanvasState, x: f32, y: f32) {
    let event = PointerEvent::new(PointerPhase::Down, x, y).with_modifiers(KeyModifiers::shift());
    state.process_event(&InputEvent::Pointer(event));
    pointer(state, PointerPhase::Up, x, y);
}

fn click(state: &mut CanvasState, x: f32, y: f32) {
    pointer(state, PointerPhase::Down, x, y);
    pointer(state, PointerPhase::Up, x, y);
}

/// Press at `from`, move through `path`, release at the last point.
fn drag(state: &mut CanvasState, from: (f32, f32), path: &[(f32, f32)]) {
    pointer(state, PointerPhase::Down, from.0, from.1);
    for &(x, y) in path {
        pointer(state, PointerPhase::Move, x, y);
    }
    let end = path.last().copied().unwrap_or(from);
    pointer(state, PointerPhase::Up, end.0, end.1);
}

fn selected_ids(scene: &Scene) -> Vec<ElementId> {
    scene.selection().iter().collect()
}

fn selected(state: &CanvasState) -> Vec<ElementId> {
    selected_ids(&state.scene)
}

fn position(state: &CanvasState, id: ElementId) -> (f32, f32) {
    let element = state.scene.element(id).expect("element present");
    (element.x, element.y)
}

fn polygon_points(state: &CanvasState, id: ElementId) -> Vec<Point> {
    state
        .scene
        .element(id)
        .and_then(banner_core::Element::points)
        .expect("polygon points")
        .to_vec()
}

// ============================================================================
// Creation defaults
// ============================================================================

#[test]
fn test_rect_from_bare_type_gets_defaults() {
    let draft: ElementDraft = serde_json::from_str(r#"{"type":"rect"}"#).expect("draft");
    let mut scene = Scene::new();
    let element = scene.add_element(draft).clone();

    assert_eq!((element.x, element.y), (100.0, 100.0));
    assert_eq!(element.rotation, 0.0);
    assert_eq!(element.scale, 1.0);
    assert_eq!(element.declared_size(), (100.0, 100.0));
    assert_eq!(selected_ids(&scene), vec![element.id]);
}

// ============================================================================
// Hit-testing and selection
// ============================================================================

#[test]
fn test_press_on_overlap_selects_topmost() {
    let (mut state, r1, r2) = overlapping_rects();
    click(&mut state, 75.0, 75.0);
    assert_eq!(selected(&state), vec![r2]);

    click(&mut state, 25.0, 25.0);
    assert_eq!(selected(&state), vec![r1]);
}

#[test]
fn test_plain_click_is_exclusive() {
    let (mut state, r1, r2) = overlapping_rects();
    click(&mut state, 25.0, 25.0);
    shift_click(&mut state, 140.0, 140.0);
    assert_eq!(selected(&state).len(), 2);

    click(&mut state, 140.0, 140.0);
    assert_eq!(selected(&state), vec![r2]);
    assert!(!state.scene.is_selected(r1));
}

#[test]
fn test_shift_click_toggles_membership() {
    let (mut state, r1, r2) = overlapping_rects();
    click(&mut state, 25.0, 25.0);

    shift_click(&mut state, 140.0, 140.0);
    assert!(state.scene.is_selected(r1));
    assert!(state.scene.is_selected(r2));

    shift_click(&mut state, 25.0, 25.0);
    assert!(!state.scene.is_selected(r1));
    assert!(state.scene.is_selected(r2));
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let (mut state, _, _) = overlapping_rects();
    click(&mut state, 25.0, 25.0);
    assert!(pointer(&mut state, PointerPhase::Down, 800.0, 300.0));
    assert!(state.scene.selection().is_empty());
}

#[test]
fn test_zoomed_display_maps_to_canvas() {
    let (mut state, r1, _) = overlapping_rects();
    state.viewport.set_zoom(50.0);
    // (12, 12) on a half-size display is canvas (24, 24), inside R1 only.
    click(&mut state, 12.0, 12.0);
    assert_eq!(selected(&state), vec![r1]);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_group_spans_members() {
    let (mut state, r1, r2) = overlapping_rects();
    let group_id = state.scene.group_elements(&[r1, r2]).expect("group");

    let group = state.scene.element(group_id).expect("group element");
    assert_eq!((group.x, group.y), (0.0, 0.0));
    assert_eq!(group.declared_size(), (150.0, 150.0));
    assert_eq!(state.scene.element_count(), 1);

    let ElementKind::Group { child_elements, .. } = &group.kind else {
        panic!("expected group, got {}", group.kind.type_name());
    };
    let offsets: Vec<_> = child_elements
        .iter()
        .map(|c| (c.element.id, c.rel_x, c.rel_y))
        .collect();
    assert_eq!(offsets, vec![(r1, 0.0, 0.0), (r2, 50.0, 50.0)]);
}

#[test]
fn test_ungroup_restores_positions() {
    let (mut state, r1, r2) = overlapping_rects();
    let before: Vec<_> = state.scene.elements().to_vec();
    let group_id = state.scene.group_elements(&[r1, r2]).expect("group");

    let restored = state.scene.ungroup_elements(group_id).expect("ungroup");
    assert_eq!(restored, vec![r1, r2]);
    assert!(state.scene.element(group_id).is_none());
    assert_eq!(position(&state, r1), (0.0, 0.0));
    assert_eq!(position(&state, r2), (50.0, 50.0));
    assert_eq!(state.scene.elements(), before.as_slice());
}

#[test]
fn test_moved_group_ungroups_at_new_offset() {
    let (mut state, r1, r2) = overlapping_rects();
    let group_id = state.scene.group_elements(&[r1, r2]).expect("group");
    drag(&mut state, (10.0, 10.0), &[(110.0, 60.0)]);
    assert_eq!(position(&state, group_id), (100.0, 50.0));

    state.scene.ungroup_elements(group_id).expect("ungroup");
    assert_eq!(position(&state, r1), (100.0, 50.0));
    assert_eq!(position(&state, r2), (150.0, 100.0));
}

#[test]
fn test_group_needs_two_members() {
    let (mut state, r1, _) = overlapping_rects();
    assert!(state.scene.group_elements(&[r1]).is_err());
    assert_eq!(state.scene.element_count(), 2);
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_badge_drag_is_exact_without_snap() {
    let mut scene = Scene::new();
    let badge = scene.insert_badge(Badge::new(BadgeKind::Star, 1400.0, 50.0));
    let mut state = CanvasState::new(scene);

    drag(&mut state, (1400.0, 50.0), &[(1405.0, 48.0), (1410.0, 45.0)]);
    let moved = state.scene.badge(badge).expect("badge");
    assert_eq!((moved.x, moved.y), (1410.0, 45.0));
    assert_eq!(state.controller().drag_state(), &DragState::Idle);
}

#[test]
fn test_badge_press_keeps_element_selection() {
    let mut scene = Scene::new();
    let id = scene.add_element(rect(0.0, 0.0, 50.0, 50.0)).id;
    scene.insert_badge(Badge::new(BadgeKind::Heart, 1400.0, 50.0));
    let mut state = CanvasState::new(scene);

    assert!(!pointer(&mut state, PointerPhase::Down, 1400.0, 50.0));
    assert_eq!(selected(&state), vec![id]);
}

#[test]
fn test_snapped_drags_land_on_grid() {
    let (mut state, _, r2) = overlapping_rects();
    let badge = state
        .scene
        .insert_badge(Badge::new(BadgeKind::Zap, 1400.0, 50.0));
    state.viewport.snap_to_grid = true;

    drag(&mut state, (140.0, 140.0), &[(163.0, 171.0), (207.0, 229.0)]);
    drag(&mut state, (1400.0, 50.0), &[(1291.0, 117.0)]);

    let (x, y) = position(&state, r2);
    let moved = state.scene.badge(badge).expect("badge");
    for value in [x, y, moved.x, moved.y] {
        assert_eq!(value % 40.0, 0.0, "{value} is off the grid");
    }
}

#[test]
fn test_face_drag_needs_render_bounds() {
    let mut scene = Scene::new();
    scene.update_face(&FacePatch {
        image: Some(Some("face.png".to_string())),
        ..FacePatch::default()
    });
    let mut state = CanvasState::new(scene);

    drag(&mut state, (1050.0, 150.0), &[(1070.0, 160.0)]);
    assert_eq!((state.scene.face.x, state.scene.face.y), (1000.0, 100.0));

    state.set_face_bounds(Some(banner_core::Bounds::new(1000.0, 100.0, 200.0, 200.0)));
    drag(&mut state, (1050.0, 150.0), &[(1070.0, 160.0)]);
    assert_eq!((state.scene.face.x, state.scene.face.y), (1020.0, 110.0));
}

#[test]
fn test_vertex_drag_touches_one_point() {
    let mut scene = Scene::new();
    let id = scene
        .add_element(ElementDraft::new(ElementKind::square()).at(200.0, 100.0))
        .id;
    let mut state = CanvasState::new(scene);
    let before = state.scene.element(id).cloned().expect("square");
    let before_points = polygon_points(&state, id);

    // Vertex 2 of the square sits at local (100, 100), canvas (300, 200).
    drag(&mut state, (301.0, 199.0), &[(330.0, 240.0)]);

    let after = state.scene.element(id).cloned().expect("square");
    let points = polygon_points(&state, id);
    for (k, (old, new)) in before_points.iter().zip(&points).enumerate() {
        if k == 2 {
            assert_eq!(*new, Point::new(130.0, 140.0));
        } else {
            assert_eq!(old, new, "point {k} changed");
        }
    }
    assert_eq!((after.x, after.y), (before.x, before.y));
    assert_eq!(after.rotation, before.rotation);
    assert_eq!(after.scale, before.scale);
    assert_eq!(after.name, before.name);
}

#[test]
fn test_vertex_handles_need_selection() {
    let mut scene = Scene::new();
    let id = scene
        .add_element(ElementDraft::new(ElementKind::square()).at(200.0, 100.0))
        .id;
    scene.clear_selection();
    let mut state = CanvasState::new(scene);
    let before_points = polygon_points(&state, id);

    // Unselected, the same press moves the whole polygon.
    drag(&mut state, (299.0, 199.0), &[(309.0, 209.0)]);
    assert_eq!(position(&state, id), (210.0, 110.0));
    assert_eq!(polygon_points(&state, id), before_points);
}

#[test]
fn test_deleted_drag_target_is_ignored() {
    let (mut state, _, r2) = overlapping_rects();
    pointer(&mut state, PointerPhase::Down, 140.0, 140.0);
    state.scene.delete_element(r2).expect("delete");

    assert!(!pointer(&mut state, PointerPhase::Move, 200.0, 200.0));
    pointer(&mut state, PointerPhase::Up, 200.0, 200.0);
    assert_eq!(state.controller().drag_state(), &DragState::Idle);
}

#[test]
fn test_leave_ends_drag() {
    let (mut state, _, r2) = overlapping_rects();
    pointer(&mut state, PointerPhase::Down, 140.0, 140.0);
    assert!(state.controller().drag_state().is_active());

    pointer(&mut state, PointerPhase::Leave, 900.0, 300.0);
    assert!(!pointer(&mut state, PointerPhase::Move, 910.0, 310.0));
    assert_eq!(position(&state, r2), (50.0, 50.0));
}

#[test]
fn test_cursor_feedback() {
    let (mut state, _, _) = overlapping_rects();
    let hover = |state: &mut CanvasState, phase, x, y| {
        state
            .process_event(&InputEvent::Pointer(PointerEvent::new(phase, x, y)))
            .cursor
    };
    assert_eq!(hover(&mut state, PointerPhase::Move, 800.0, 300.0), CursorHint::Default);
    assert_eq!(hover(&mut state, PointerPhase::Move, 25.0, 25.0), CursorHint::Move);
    assert_eq!(hover(&mut state, PointerPhase::Down, 25.0, 25.0), CursorHint::Grabbing);
    assert_eq!(hover(&mut state, PointerPhase::Up, 25.0, 25.0), CursorHint::Move);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_delete_key_removes_selection() {
    let (mut state, r1, r2) = overlapping_rects();
    click(&mut state, 25.0, 25.0);

    for key in ["Delete", "Backspace"] {
        let outcome = state.process_event(&InputEvent::Key(KeyEvent::new(key)));
        if key == "Delete" {
            assert!(outcome.changed);
        } else {
            assert!(!outcome.changed, "nothing left selected");
        }
    }
    assert!(state.scene.element(r1).is_none());
    assert!(state.scene.element(r2).is_some());
    assert!(state.scene.selection().is_empty());
}

#[test]
fn test_delete_key_ignored_in_text_field() {
    let (mut state, r1, _) = overlapping_rects();
    click(&mut state, 25.0, 25.0);

    let outcome = state.process_event(&InputEvent::Key(KeyEvent::new("Backspace").in_text_input()));
    assert!(!outcome.changed);
    assert!(state.scene.element(r1).is_some());
    assert_eq!(selected(&state), vec![r1]);
}

#[test]
fn test_other_keys_do_nothing() {
    let (mut state, _, _) = overlapping_rects();
    click(&mut state, 25.0, 25.0);
    let outcome = state.process_event(&InputEvent::Key(KeyEvent::new("a")));
    assert!(!outcome.changed);
    assert_eq!(state.scene.element_count(), 2);
}
