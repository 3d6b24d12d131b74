//! Undo history: a LIFO stack of deep scene snapshots.
//!
//! Snapshots copy only the defined object fields (primitive + transform),
//! never the derived meshes, so they stay valid after the original
//! geometry has been retired. The stack is unbounded: long sessions of
//! repeated add/delete grow it without eviction. Known limitation.

use serde::{Deserialize, Serialize};
use shared::{Primitive, Transform};

use crate::state::scene::{SceneGraph, SceneObject};
use crate::state::selection::SelectionController;

/// Deep-copy unit for one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub primitive: Primitive,
    pub transform: Transform,
}

impl ObjectRecord {
    pub fn of(object: &SceneObject) -> Self {
        Self {
            primitive: object.primitive().clone(),
            transform: object.transform.clone(),
        }
    }
}

/// Scene contents at one point in time, in insertion order
pub type SceneSnapshot = Vec<ObjectRecord>;

/// Last-in-first-out undo stack. No redo: an undone action is gone.
#[derive(Default)]
pub struct UndoStack {
    stack: Vec<SceneSnapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the graph. Must be called immediately before a
    /// destructive mutation (add, delete) — never after.
    pub fn capture_before(&mut self, graph: &SceneGraph) {
        self.stack.push(graph.iter().map(ObjectRecord::of).collect());
    }

    /// Pop the latest snapshot and restore it into the graph. Restored
    /// objects are fresh copies with new ids, so the selection is
    /// cleared unconditionally — any prior reference is void.
    /// Returns `false` (and changes nothing) when the history is empty.
    pub fn undo(&mut self, graph: &mut SceneGraph, selection: &mut SelectionController) -> bool {
        let Some(snapshot) = self.stack.pop() else {
            return false;
        };

        graph.clear();
        for record in snapshot {
            graph.add(SceneObject::new(record.primitive, record.transform));
        }
        selection.clear();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PrimitiveKind;

    fn object(kind: PrimitiveKind) -> SceneObject {
        SceneObject::new(Primitive::default_for(kind), Transform::spawn_for(kind))
    }

    fn records(graph: &SceneGraph) -> Vec<ObjectRecord> {
        graph.iter().map(ObjectRecord::of).collect()
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut h = UndoStack::new();
        let mut g = SceneGraph::new();
        let mut s = SelectionController::default();
        g.add(object(PrimitiveKind::Cube));
        let before = records(&g);

        assert!(!h.undo(&mut g, &mut s));
        assert_eq!(records(&g), before);
    }

    #[test]
    fn test_undo_restores_previous_contents() {
        let mut h = UndoStack::new();
        let mut g = SceneGraph::new();
        let mut s = SelectionController::default();

        g.add(object(PrimitiveKind::Cube));
        let before = records(&g);

        h.capture_before(&g);
        g.add(object(PrimitiveKind::Sphere));
        assert_eq!(g.len(), 2);

        assert!(h.undo(&mut g, &mut s));
        assert_eq!(records(&g), before);
        assert!(h.is_empty());
    }

    #[test]
    fn test_undo_restores_with_fresh_ids() {
        let mut h = UndoStack::new();
        let mut g = SceneGraph::new();
        let mut s = SelectionController::default();

        let id = g.add(object(PrimitiveKind::Torus));
        h.capture_before(&g);
        g.remove(&id);

        assert!(h.undo(&mut g, &mut s));
        assert_eq!(g.len(), 1);
        let restored = g.iter().next().unwrap();
        assert_ne!(*restored.id(), id);
        assert_eq!(
            *restored.primitive(),
            Primitive::default_for(PrimitiveKind::Torus)
        );
    }

    #[test]
    fn test_undo_clears_selection_unconditionally() {
        let mut h = UndoStack::new();
        let mut g = SceneGraph::new();
        let mut s = SelectionController::default();

        let id = g.add(object(PrimitiveKind::Cube));
        h.capture_before(&g);
        g.add(object(PrimitiveKind::Cone));
        if let Some(obj) = g.get(&id) {
            s.select(obj);
        }

        assert!(h.undo(&mut g, &mut s));
        assert!(s.selected().is_none());
        assert!(s.outline().is_none());
    }

    #[test]
    fn test_lifo_order() {
        let mut h = UndoStack::new();
        let mut g = SceneGraph::new();
        let mut s = SelectionController::default();

        h.capture_before(&g); // empty
        g.add(object(PrimitiveKind::Cube));
        h.capture_before(&g); // [cube]
        g.add(object(PrimitiveKind::Sphere));

        assert!(h.undo(&mut g, &mut s));
        assert_eq!(g.len(), 1);
        assert_eq!(
            g.iter().next().unwrap().primitive().kind(),
            PrimitiveKind::Cube
        );

        assert!(h.undo(&mut g, &mut s));
        assert!(g.is_empty());
    }
}
