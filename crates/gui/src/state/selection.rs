//! Selection state and the outline decoration that mirrors it.
//!
//! At most one object is selected at a time. The outline is derived from
//! the selected object and exists exactly when a selection exists — every
//! transition here re-establishes that pairing.

use shared::{ObjectId, Primitive, ShapeError, ShapeFields, Transform};

use crate::geometry;
use crate::state::scene::SceneObject;
use crate::viewport::mesh::MeshData;

/// Derived highlight shell for the selected object. Never persisted and
/// never part of undo snapshots.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Local-space outline mesh (object geometry inflated by 1.05)
    pub mesh: MeshData,
    /// Mirrors the selected object's transform
    pub transform: Transform,
}

/// Single-object selection state
#[derive(Default)]
pub struct SelectionController {
    selected: Option<ObjectId>,
    outline: Option<Outline>,
    /// Version counter for outline changes (renderer cache invalidation)
    version: u64,
}

impl SelectionController {
    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Outline version (increments on every outline change)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Select an object, replacing any prior selection. The previous
    /// outline is dropped before the new one is built.
    pub fn select(&mut self, object: &SceneObject) {
        self.selected = Some(object.id().clone());
        self.outline = Some(build_outline(object));
        self.version += 1;
        self.assert_consistent();
    }

    /// Drop selection and outline. Idempotent: clearing an empty
    /// selection changes nothing, not even the version.
    pub fn clear(&mut self) {
        if self.selected.is_none() && self.outline.is_none() {
            return;
        }
        self.selected = None;
        self.outline = None;
        self.version += 1;
        self.assert_consistent();
    }

    /// Re-derive the outline from the selected object's current geometry
    /// and transform. Must run after every property or transform edit.
    pub fn sync_to_object(&mut self, object: &SceneObject) {
        debug_assert!(
            self.is_selected(object.id()),
            "outline sync against a non-selected object"
        );
        self.outline = Some(build_outline(object));
        self.version += 1;
        self.assert_consistent();
    }

    /// Rebuild the selected object's geometry from panel fields, keeping
    /// its kind, then sync the outline. On a validation error the object
    /// is left untouched.
    pub fn apply_property_edit(
        &mut self,
        object: &mut SceneObject,
        fields: &ShapeFields,
    ) -> Result<(), ShapeError> {
        debug_assert!(self.is_selected(object.id()));
        let primitive = Primitive::from_fields(object.primitive().kind(), fields)?;
        object.set_primitive(primitive);
        self.sync_to_object(object);
        Ok(())
    }

    fn assert_consistent(&self) {
        debug_assert_eq!(
            self.selected.is_some(),
            self.outline.is_some(),
            "selection and outline must be paired"
        );
    }
}

fn build_outline(object: &SceneObject) -> Outline {
    Outline {
        mesh: geometry::outline_mesh(object.primitive()),
        transform: object.transform.clone(),
    }
}
