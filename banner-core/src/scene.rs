//! The scene model: ordered elements, badges, the face cutout and the
//! selection.
//!
//! Array position is z-order: later elements are drawn on top and win
//! hit-tests. There is no separate z-index.

use serde::{Deserialize, Serialize};

use crate::badge::{Badge, BadgeId, BadgeKind};
use crate::backdrop::Backdrop;
use crate::element::{Element, ElementDraft, ElementId, ElementKind, ElementPatch, GroupChild};
use crate::face::{FaceConfig, FacePatch};
use crate::selection::Selection;
use crate::{CanvasError, CanvasResult};

/// A banner scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Freeform elements in z-order.
    elements: Vec<Element>,
    /// Badges in z-order.
    badges: Vec<Badge>,
    /// Face cutout.
    pub face: FaceConfig,
    /// Background and template configuration.
    pub backdrop: Backdrop,
    /// Currently selected element ids.
    selection: Selection,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `draft` over the element defaults, append it on top and select
    /// it exclusively.
    pub fn add_element(&mut self, draft: ElementDraft) -> &Element {
        let element = draft.build();
        let id = element.id;
        tracing::debug!("Add {} element {id}", element.kind.type_name());
        self.elements.push(element);
        self.selection.replace(id);
        &self.elements[self.elements.len() - 1]
    }

    /// Append a fully formed element on top without touching the selection.
    ///
    /// An element whose id is already present is given a fresh id.
    pub fn insert_element(&mut self, mut element: Element) -> ElementId {
        if self.index_of(element.id).is_some() {
            element.id = ElementId::new();
        }
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Shallow-merge `patch` into the element. Returns false if absent.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Set the layer name of an element.
    pub fn rename_element(&mut self, id: ElementId, name: impl Into<String>) -> bool {
        let patch = ElementPatch {
            name: Some(name.into()),
            ..ElementPatch::default()
        };
        self.update_element(id, &patch)
    }

    /// Remove an element from the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn delete_element(&mut self, id: ElementId) -> CanvasResult<Element> {
        let index = self
            .index_of(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        self.selection.remove(id);
        Ok(self.elements.remove(index))
    }

    /// Remove every element in `ids`; unknown ids are skipped.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.elements.len());
        for element in self.elements.drain(..) {
            if ids.contains(&element.id) {
                removed.push(element);
            } else {
                kept.push(element);
            }
        }
        self.elements = kept;
        for element in &removed {
            self.selection.remove(element.id);
        }
        removed
    }

    /// Remove all selected elements and clear the selection.
    pub fn delete_selected(&mut self) -> Vec<Element> {
        let ids: Vec<_> = self.selection.iter().collect();
        let removed = self.delete_elements(&ids);
        self.selection.clear();
        removed
    }

    /// Replace two or more elements with a group holding copies of them.
    ///
    /// The group sits at the members' union bounding box; each copy records
    /// its offset from the box origin. Members keep their relative z-order
    /// and the group is appended on top and becomes the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidOperation`] if fewer than two ids
    /// resolve to elements in the scene. The scene is left unchanged.
    pub fn group_elements(&mut self, ids: &[ElementId]) -> CanvasResult<ElementId> {
        let members: Vec<&Element> = self
            .elements
            .iter()
            .filter(|e| ids.contains(&e.id))
            .collect();
        if members.len() < 2 {
            return Err(CanvasError::InvalidOperation(format!(
                "grouping needs at least 2 elements, found {}",
                members.len()
            )));
        }

        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for member in &members {
            let origin = member.origin();
            let (w, h) = member.declared_size();
            min_x = min_x.min(origin.x);
            min_y = min_y.min(origin.y);
            max_x = max_x.max(origin.x + w);
            max_y = max_y.max(origin.y + h);
        }

        let child_elements: Vec<GroupChild> = members
            .iter()
            .map(|member| {
                let origin = member.origin();
                GroupChild {
                    element: (*member).clone(),
                    rel_x: origin.x - min_x,
                    rel_y: origin.y - min_y,
                }
            })
            .collect();

        let group = ElementDraft::new(ElementKind::Group {
            width: max_x - min_x,
            height: max_y - min_y,
            child_elements,
        })
        .at(min_x, min_y)
        .build();
        let group_id = group.id;

        tracing::debug!(
            "Group {} elements into {group_id} at ({min_x}, {min_y}) size {}x{}",
            members.len(),
            max_x - min_x,
            max_y - min_y
        );

        self.elements.retain(|e| !ids.contains(&e.id));
        self.elements.push(group);
        self.selection.replace(group_id);
        Ok(group_id)
    }

    /// Group the current selection.
    ///
    /// # Errors
    ///
    /// See [`Scene::group_elements`].
    pub fn group_selected(&mut self) -> CanvasResult<ElementId> {
        let ids: Vec<_> = self.selection.iter().collect();
        self.group_elements(&ids)
    }

    /// Replace a group with its children restored to absolute positions
    /// `group.x + relX, group.y + relY`.
    ///
    /// Children are appended on top in their stored relative order and
    /// become the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ElementNotFound`] for an unknown id and
    /// [`CanvasError::InvalidOperation`] if the element is not a group.
    pub fn ungroup_elements(&mut self, group_id: ElementId) -> CanvasResult<Vec<ElementId>> {
        let index = self
            .index_of(group_id)
            .ok_or_else(|| CanvasError::ElementNotFound(group_id.to_string()))?;
        if !self.elements[index].is_group() {
            return Err(CanvasError::InvalidOperation(format!(
                "{group_id} is not a group"
            )));
        }

        let group = self.elements.remove(index);
        self.selection.remove(group_id);
        let origin = group.origin();
        let ElementKind::Group { child_elements, .. } = group.kind else {
            return Ok(Vec::new());
        };

        let mut restored = Vec::with_capacity(child_elements.len());
        for child in child_elements {
            let mut element = child.element;
            element.x = origin.x + child.rel_x;
            element.y = origin.y + child.rel_y;
            restored.push(self.insert_element(element));
        }

        tracing::debug!("Ungroup {group_id} into {} elements", restored.len());
        self.selection.replace_all(restored.iter().copied());
        Ok(restored)
    }

    /// Ungroup the selection if it is exactly one group.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidOperation`] for an empty selection, a
    /// multi-selection, or a single non-group element.
    pub fn ungroup_selected(&mut self) -> CanvasResult<Vec<ElementId>> {
        let id = self.selection.single().ok_or_else(|| {
            CanvasError::InvalidOperation("ungroup needs exactly one selected group".to_string())
        })?;
        self.ungroup_elements(id)
    }

    /// Move an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.elements.len() => {
                let element = self.elements.remove(i);
                self.elements.push(element);
                true
            }
            _ => false,
        }
    }

    /// Move an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                let element = self.elements.remove(i);
                self.elements.insert(0, element);
                true
            }
            _ => false,
        }
    }

    /// Swap an element with the one above it.
    pub fn move_forward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.elements.len() => {
                self.elements.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap an element with the one below it.
    pub fn move_backward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                self.elements.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    /// Update the selection.
    ///
    /// `None` clears it. With `additive` the id's membership is toggled,
    /// otherwise the selection becomes exactly that id. Unknown ids are
    /// ignored.
    pub fn select(&mut self, id: Option<ElementId>, additive: bool) {
        match id {
            None => self.selection.clear(),
            Some(id) if self.index_of(id).is_none() => {}
            Some(id) if additive => {
                self.selection.toggle(id);
            }
            Some(id) => self.selection.replace(id),
        }
    }

    /// Deselect all elements.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Selected elements in z-order.
    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| self.selection.contains(e.id))
    }

    /// Place a new badge in the top-right drop zone.
    pub fn add_badge(&mut self, kind: BadgeKind, jitter: (f32, f32)) -> BadgeId {
        let badge = Badge::placed(kind, jitter);
        let id = badge.id;
        self.badges.push(badge);
        id
    }

    /// Append a badge as-is.
    pub fn insert_badge(&mut self, badge: Badge) -> BadgeId {
        let id = badge.id;
        self.badges.push(badge);
        id
    }

    /// Move a badge. Returns false if absent.
    pub fn update_badge_position(&mut self, id: BadgeId, x: f32, y: f32) -> bool {
        match self.badges.iter_mut().find(|b| b.id == id) {
            Some(badge) => {
                badge.x = x;
                badge.y = y;
                true
            }
            None => false,
        }
    }

    /// Remove a badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the badge is not found.
    pub fn remove_badge(&mut self, id: BadgeId) -> CanvasResult<Badge> {
        let index = self
            .badges
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CanvasError::BadgeNotFound(id.to_string()))?;
        Ok(self.badges.remove(index))
    }

    /// Get a badge by ID.
    #[must_use]
    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// All badges in z-order.
    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Merge a patch into the face configuration.
    pub fn update_face(&mut self, patch: &FacePatch) {
        self.face.apply_patch(patch);
    }

    /// Position of an element in the z-order.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// All elements, bottom to top.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize a scene from JSON. Selection entries that do not name an
    /// element are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut scene: Self = serde_json::from_str(json).map_err(CanvasError::Serialization)?;
        let ids: Vec<_> = scene.elements.iter().map(|e| e.id).collect();
        scene.selection.retain(|id| ids.contains(id));
        Ok(scene)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn rect_at(scene: &mut Scene, x: f32, y: f32) -> ElementId {
        scene
            .add_element(ElementDraft::new(ElementKind::rect(100.0, 100.0)).at(x, y))
            .id
    }

    #[test]
    fn test_scene_add_remove() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        let id = rect_at(&mut scene, 0.0, 0.0);
        assert_eq!(scene.element_count(), 1);
        assert!(scene.is_selected(id));

        scene.delete_element(id).expect("should remove");
        assert!(scene.is_empty());
        assert!(scene.selection().is_empty());
        assert!(scene.delete_element(id).is_err());
    }

    #[test]
    fn test_add_selects_exclusively() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 10.0, 10.0);
        assert!(!scene.is_selected(a));
        assert_eq!(scene.selection().single(), Some(b));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut scene = Scene::new();
        rect_at(&mut scene, 0.0, 0.0);
        let before = scene.clone();
        assert!(!scene.update_element(ElementId::new(), &ElementPatch::position(1.0, 1.0)));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_delete_selected_drops_selection() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 0.0, 0.0);
        let c = rect_at(&mut scene, 0.0, 0.0);
        scene.select(Some(a), false);
        scene.select(Some(b), true);
        let removed = scene.delete_selected();
        assert_eq!(removed.len(), 2);
        assert_eq!(scene.elements().len(), 1);
        assert_eq!(scene.elements()[0].id, c);
        assert!(scene.selection().is_empty());
    }

    #[test]
    fn test_group_requires_two() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let before = scene.clone();
        assert!(matches!(
            scene.group_elements(&[a, ElementId::new()]),
            Err(CanvasError::InvalidOperation(_))
        ));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_group_preserves_member_order() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 50.0, 50.0);
        let group = scene.group_elements(&[b, a]).expect("group");
        let element = scene.element(group).expect("group element");
        let ElementKind::Group { child_elements, .. } = &element.kind else {
            panic!("expected group");
        };
        let order: Vec<_> = child_elements.iter().map(|c| c.element.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_ungroup_non_group_is_rejected() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        assert!(matches!(
            scene.ungroup_elements(a),
            Err(CanvasError::InvalidOperation(_))
        ));
        assert_eq!(scene.element_count(), 1);
    }

    #[test]
    fn test_ungroup_selected_rejects_multi_selection() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 0.0, 0.0);
        let c = rect_at(&mut scene, 0.0, 0.0);
        let group = scene.group_elements(&[a, b]).expect("group");
        scene.select(Some(c), true);
        assert!(scene.is_selected(group));
        assert!(scene.ungroup_selected().is_err());
        assert!(scene.element(group).is_some());
    }

    #[test]
    fn test_ungroup_selected_restores_children() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 20.0, 40.0);
        let b = rect_at(&mut scene, 70.0, 10.0);
        let group = scene.group_elements(&[a, b]).expect("group");
        assert_eq!(scene.selection().single(), Some(group));

        let restored = scene.ungroup_selected().expect("ungroup");
        assert_eq!(restored, vec![a, b]);
        assert!(scene.element(group).is_none());
        assert_eq!(scene.element_count(), 2);
        assert_eq!(scene.selection().len(), 2);
        assert!(scene.is_selected(a) && scene.is_selected(b));

        let pos = |id| scene.element(id).map(|e| (e.x, e.y));
        assert_eq!(pos(a), Some((20.0, 40.0)));
        assert_eq!(pos(b), Some((70.0, 10.0)));
    }

    #[test]
    fn test_rename_element() {
        let mut scene = Scene::new();
        let id = rect_at(&mut scene, 0.0, 0.0);
        assert_eq!(scene.element(id).map(Element::display_name).as_deref(), Some("Rect"));

        assert!(scene.rename_element(id, "Accent bar"));
        assert_eq!(
            scene.element(id).and_then(|e| e.name.as_deref()),
            Some("Accent bar")
        );
        assert_eq!(scene.element(id).map(Element::display_name).as_deref(), Some("Accent bar"));

        let before = scene.clone();
        assert!(!scene.rename_element(ElementId::new(), "Ghost"));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_z_order_ops() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 0.0, 0.0);
        let c = rect_at(&mut scene, 0.0, 0.0);
        let order = |s: &Scene| s.elements().iter().map(|e| e.id).collect::<Vec<_>>();

        assert!(scene.bring_to_front(a));
        assert_eq!(order(&scene), vec![b, c, a]);
        assert!(!scene.bring_to_front(a));

        assert!(scene.send_to_back(a));
        assert_eq!(order(&scene), vec![a, b, c]);
        assert!(!scene.send_to_back(a));

        assert!(scene.move_forward(a));
        assert_eq!(order(&scene), vec![b, a, c]);
        assert!(scene.move_backward(c) && scene.move_backward(c));
        assert_eq!(order(&scene), vec![c, b, a]);
        assert!(!scene.move_backward(c));
        assert!(!scene.move_forward(a));
    }

    #[test]
    fn test_select_semantics() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 0.0, 0.0);
        scene.select(Some(a), false);
        scene.select(Some(b), true);
        assert_eq!(scene.selection().len(), 2);
        scene.select(Some(a), true);
        assert_eq!(scene.selection().single(), Some(b));
        scene.select(Some(ElementId::new()), false);
        assert_eq!(scene.selection().single(), Some(b));
        scene.select(None, false);
        assert!(scene.selection().is_empty());
    }

    #[test]
    fn test_badges() {
        let mut scene = Scene::new();
        let id = scene.add_badge(BadgeKind::Star, (0.0, 0.0));
        assert!(scene.update_badge_position(id, 10.0, 20.0));
        let badge = scene.badge(id).expect("badge");
        assert_eq!((badge.x, badge.y), (10.0, 20.0));
        assert!(!scene.update_badge_position(BadgeId::new(), 1.0, 1.0));
        scene.remove_badge(id).expect("remove");
        assert!(scene.badges().is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut scene = Scene::new();
        rect_at(&mut scene, 5.0, 6.0);
        scene.add_element(ElementDraft::new(ElementKind::spline()));
        scene.add_badge(BadgeKind::Heart, (0.5, 0.5));
        let json = scene.to_json().expect("serialize");
        let back = Scene::from_json(&json).expect("deserialize");
        assert_eq!(back, scene);
    }
}
