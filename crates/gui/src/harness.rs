//! Headless test harness for programmatic scene manipulation.
//!
//! Wraps [`EditorSession`] with convenience creators and inspection
//! helpers so integration tests can drive the editor without a window.

use glam::Vec3;
use shared::{ObjectId, Primitive, PrimitiveKind, ShapeError, ShapeFields};

use crate::state::history::ObjectRecord;
use crate::state::session::EditorSession;
use crate::viewport::picking::Ray;

/// Headless editor harness
#[derive(Default)]
pub struct EditorHarness {
    pub session: EditorSession,
}

impl EditorHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Object creation ───────────────────────────────────────

    /// Add a shape with default parameters, return its id
    pub fn add(&mut self, kind: PrimitiveKind) -> ObjectId {
        self.session.add_shape(kind)
    }

    pub fn add_cube(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Cube)
    }

    pub fn add_sphere(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Sphere)
    }

    pub fn add_cylinder(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Cylinder)
    }

    pub fn add_plane(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Plane)
    }

    pub fn add_cone(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Cone)
    }

    pub fn add_torus(&mut self) -> ObjectId {
        self.add(PrimitiveKind::Torus)
    }

    /// Add a shape by kind name, as a scripted client would
    pub fn add_by_name(&mut self, name: &str) -> Result<ObjectId, ShapeError> {
        self.session.add_shape_by_name(name)
    }

    // ── Actions ───────────────────────────────────────────────

    pub fn select(&mut self, id: &str) {
        self.session.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// Simulate a click along -Z through the given world XY point
    pub fn click_at(&mut self, x: f32, y: f32) {
        self.session.handle_click(&Ray {
            origin: Vec3::new(x, y, 100.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        });
    }

    pub fn edit_properties(&mut self, fields: &ShapeFields) -> Result<(), ShapeError> {
        self.session.apply_property_edit(fields)
    }

    pub fn move_selected(&mut self, position: [f64; 3]) {
        self.session.set_position(position);
    }

    pub fn rotate_selected(&mut self, rotation: [f64; 3]) {
        self.session.set_rotation(rotation);
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.session.scene().len()
    }

    /// Kind of the selected object, if any
    pub fn selected_kind(&self) -> Option<PrimitiveKind> {
        self.session
            .selected_object()
            .map(|o| o.primitive().kind())
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.session.selection().selected()
    }

    /// True when a selection outline currently exists
    pub fn has_outline(&self) -> bool {
        self.session.selection().outline().is_some()
    }

    pub fn undo_depth(&self) -> usize {
        self.session.undo_depth()
    }

    pub fn primitive_of(&self, id: &str) -> Option<&Primitive> {
        self.session.scene().get(id).map(|o| o.primitive())
    }

    /// Export the scene contents (primitives + transforms) as JSON
    pub fn export_scene_json(&self) -> String {
        let records: Vec<ObjectRecord> =
            self.session.scene().iter().map(ObjectRecord::of).collect();
        serde_json::to_string_pretty(&records).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = EditorHarness::new();
        assert_eq!(h.object_count(), 0);
        assert!(h.selected_id().is_none());
    }

    #[test]
    fn test_add_all_kinds() {
        let mut h = EditorHarness::new();
        h.add_cube();
        h.add_sphere();
        h.add_cylinder();
        h.add_plane();
        h.add_cone();
        h.add_torus();
        assert_eq!(h.object_count(), 6);
    }

    #[test]
    fn test_add_by_name() {
        let mut h = EditorHarness::new();
        assert!(h.add_by_name("torus").is_ok());
        assert!(h.add_by_name("banana").is_err());
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_select_pairs_outline() {
        let mut h = EditorHarness::new();
        let id = h.add_cube();
        h.select(&id);
        assert_eq!(h.selected_kind(), Some(PrimitiveKind::Cube));
        assert!(h.has_outline());

        h.clear_selection();
        assert!(h.selected_id().is_none());
        assert!(!h.has_outline());
    }

    #[test]
    fn test_export_json_contains_kind_tags() {
        let mut h = EditorHarness::new();
        h.add_cube();
        h.add_torus();
        let json = h.export_scene_json();
        assert!(json.contains("\"cube\""));
        assert!(json.contains("\"torus\""));
    }

    #[test]
    fn test_undo_depth_tracks_actions() {
        let mut h = EditorHarness::new();
        assert_eq!(h.undo_depth(), 0);
        let id = h.add_cube();
        assert_eq!(h.undo_depth(), 1);
        h.select(&id);
        h.delete_selected();
        assert_eq!(h.undo_depth(), 2);
        h.undo();
        assert_eq!(h.undo_depth(), 1);
    }
}
