//! Editor session: the single owner of scene, selection and history.
//!
//! Every user-visible action goes through a method here, so the ordering
//! rules (snapshot before mutation, outline sync after edits) live in one
//! place instead of being scattered across UI handlers.

use std::str::FromStr;

use shared::{ObjectId, Primitive, PrimitiveKind, ShapeError, ShapeFields, Transform};
use tracing::{debug, info, warn};

use crate::state::history::UndoStack;
use crate::state::scene::{SceneGraph, SceneObject};
use crate::state::selection::SelectionController;
use crate::viewport::picking::{self, Ray};

/// Owns all editor state and enforces operation ordering.
#[derive(Default)]
pub struct EditorSession {
    scene: SceneGraph,
    selection: SelectionController,
    history: UndoStack,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Selected object, if the selection currently points at one
    pub fn selected_object(&self) -> Option<&SceneObject> {
        let id = self.selection.selected()?;
        self.scene.get(id)
    }

    /// Add a primitive with its default dimensions and spawn transform.
    /// The history snapshot is captured before the object exists. The new
    /// object becomes the selection, so the panel opens on its defaults.
    pub fn add_shape(&mut self, kind: PrimitiveKind) -> ObjectId {
        self.history.capture_before(&self.scene);
        let object = SceneObject::new(Primitive::default_for(kind), Transform::spawn_for(kind));
        let id = self.scene.add(object);
        self.select(&id);
        info!(%kind, %id, "added shape");
        id
    }

    /// Add a primitive built from explicit fields. Nothing changes on a
    /// validation error, including the history.
    pub fn add_shape_with_fields(
        &mut self,
        kind: PrimitiveKind,
        fields: &ShapeFields,
    ) -> Result<ObjectId, ShapeError> {
        let primitive = Primitive::from_fields(kind, fields)?;
        self.history.capture_before(&self.scene);
        let id = self
            .scene
            .add(SceneObject::new(primitive, Transform::spawn_for(kind)));
        self.select(&id);
        info!(%kind, %id, "added shape from fields");
        Ok(id)
    }

    /// Add by kind name ("cube", "torus", ...). Unknown names are an error.
    pub fn add_shape_by_name(&mut self, name: &str) -> Result<ObjectId, ShapeError> {
        let kind = PrimitiveKind::from_str(name)?;
        Ok(self.add_shape(kind))
    }

    /// Resolve a viewport click: select the nearest hit object, or clear
    /// the selection when the ray misses everything.
    pub fn handle_click(&mut self, ray: &Ray) {
        match picking::pick(ray, &self.scene) {
            Some(id) => self.select(&id),
            None => {
                debug!("click missed, clearing selection");
                self.selection.clear();
            }
        }
    }

    /// Select an object by id. Selecting an unknown id clears instead.
    pub fn select(&mut self, id: &str) {
        match self.scene.get(id) {
            Some(object) => {
                debug!(%id, "selected");
                self.selection.select(object);
            }
            None => {
                warn!(%id, "select: unknown object id");
                self.selection.clear();
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Rebuild the selected object's geometry from panel fields. Not
    /// undoable: only add and delete capture history. No-op without a
    /// selection.
    pub fn apply_property_edit(&mut self, fields: &ShapeFields) -> Result<(), ShapeError> {
        let Some(id) = self.selection.selected().cloned() else {
            return Ok(());
        };
        let Some(object) = self.scene.get_mut(&id) else {
            return Ok(());
        };
        self.selection.apply_property_edit(object, fields)?;
        self.scene.notify_mutated();
        debug!(%id, "applied property edit");
        Ok(())
    }

    /// Move the selected object. The outline follows in the same call.
    pub fn set_position(&mut self, position: [f64; 3]) {
        let Some(id) = self.selection.selected().cloned() else {
            return;
        };
        let Some(object) = self.scene.get_mut(&id) else {
            return;
        };
        object.transform.position = position;
        self.selection.sync_to_object(object);
        self.scene.notify_mutated();
    }

    /// Rotate the selected object (Euler angles in degrees).
    pub fn set_rotation(&mut self, rotation: [f64; 3]) {
        let Some(id) = self.selection.selected().cloned() else {
            return;
        };
        let Some(object) = self.scene.get_mut(&id) else {
            return;
        };
        object.transform.rotation = rotation;
        self.selection.sync_to_object(object);
        self.scene.notify_mutated();
    }

    /// Delete the selected object and its outline. Returns false when
    /// nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.selected().cloned() else {
            return false;
        };
        self.history.capture_before(&self.scene);
        if self.scene.remove(&id).is_none() {
            warn!(%id, "delete: selected object no longer in scene");
        }
        self.selection.clear();
        info!(%id, "deleted shape");
        true
    }

    /// Revert the latest add or delete. Selection is always cleared,
    /// even when the selected object survives the restore by value.
    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.scene, &mut self.selection);
        if applied {
            info!(remaining = self.history.len(), "undo applied");
        } else {
            debug!("undo: history empty");
        }
        applied
    }
}
