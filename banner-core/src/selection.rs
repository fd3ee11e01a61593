//! The set of selected element ids.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Selected element ids, kept ordered by id so iteration and JSON output
/// are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single id.
    pub fn replace(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Replace the selection with the given ids.
    pub fn replace_all<I: IntoIterator<Item = ElementId>>(&mut self, ids: I) {
        self.ids.clear();
        self.ids.extend(ids);
    }

    /// Toggle membership of `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Remove `id` if present.
    pub fn remove(&mut self, id: ElementId) {
        self.ids.remove(&id);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only ids for which `keep` returns true.
    pub fn retain<F: FnMut(&ElementId) -> bool>(&mut self, keep: F) {
        self.ids.retain(keep);
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The only selected id, if exactly one is selected.
    #[must_use]
    pub fn single(&self) -> Option<ElementId> {
        if self.ids.len() == 1 {
            self.ids.iter().next().copied()
        } else {
            None
        }
    }

    /// Iterate selected ids in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_toggle() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut sel = Selection::new();
        sel.replace(a);
        assert!(sel.toggle(b));
        assert_eq!(sel.len(), 2);
        assert!(!sel.toggle(a));
        assert_eq!(sel.single(), Some(b));
        sel.replace(a);
        assert_eq!(sel.single(), Some(a));
    }

    #[test]
    fn test_single_requires_exactly_one() {
        let mut sel = Selection::new();
        assert!(sel.single().is_none());
        sel.replace_all([ElementId::new(), ElementId::new()]);
        assert!(sel.single().is_none());
    }

    #[test]
    fn test_json_is_independent_of_insertion_order() {
        let ids: Vec<ElementId> = (0..8).map(|_| ElementId::new()).collect();
        let mut forward = Selection::new();
        forward.replace_all(ids.iter().copied());
        let mut backward = Selection::new();
        backward.replace_all(ids.iter().rev().copied());

        let json = serde_json::to_string(&forward).expect("serialize");
        assert_eq!(json, serde_json::to_string(&backward).expect("serialize"));

        let mut sorted = ids;
        sorted.sort();
        assert_eq!(forward.iter().collect::<Vec<_>>(), sorted);
        let back: Selection = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, forward);
    }
}
