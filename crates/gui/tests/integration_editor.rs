//! End-to-end editor workflows through the headless harness.

use forma_gui_lib::harness::EditorHarness;
use shared::{Primitive, PrimitiveKind, ShapeFields};

#[test]
fn test_add_select_delete_undo_scenario() {
    let mut h = EditorHarness::new();

    h.add_cube();
    let sphere = h.add_sphere();
    assert_eq!(h.object_count(), 2);

    // The latest add is auto-selected
    assert_eq!(h.selected_id(), Some(&sphere));
    assert_eq!(h.selected_kind(), Some(PrimitiveKind::Sphere));
    assert!(h.has_outline());

    assert!(h.delete_selected());
    assert_eq!(h.object_count(), 1);
    assert!(h.selected_id().is_none());
    assert!(!h.has_outline());

    assert!(h.undo());
    assert_eq!(h.object_count(), 2);
    // Undo restores the scene but never the selection
    assert!(h.selected_id().is_none());
    assert!(!h.has_outline());
}

#[test]
fn test_spawn_defaults() {
    let mut h = EditorHarness::new();
    let cube = h.add_cube();
    let plane = h.add_plane();
    let torus = h.add_torus();

    assert_eq!(
        h.primitive_of(&cube),
        Some(&Primitive::Cube {
            width: 1.0,
            height: 1.0,
            depth: 1.0
        })
    );

    // Planes and tori spawn rotated flat
    let plane_rot = h.session.scene().get(&plane).unwrap().transform.rotation;
    let torus_rot = h.session.scene().get(&torus).unwrap().transform.rotation;
    assert_eq!(plane_rot, [90.0, 0.0, 0.0]);
    assert_eq!(torus_rot, [90.0, 0.0, 0.0]);
}

#[test]
fn test_click_selection_cycle() {
    let mut h = EditorHarness::new();
    let cube = h.add_cube();
    h.clear_selection();

    // Default cube sits at the origin: a ray through it selects
    h.click_at(0.0, 0.0);
    assert_eq!(h.selected_id(), Some(&cube));
    assert!(h.has_outline());

    // Click into empty space deselects
    h.click_at(50.0, 50.0);
    assert!(h.selected_id().is_none());
    assert!(!h.has_outline());
}

#[test]
fn test_click_picks_nearest_object() {
    let mut h = EditorHarness::new();
    let behind = h.add_cube();
    h.select(&behind);
    h.move_selected([0.0, 0.0, -3.0]);

    let front = h.add_cube();
    h.select(&front);
    h.move_selected([0.0, 0.0, 3.0]);
    h.clear_selection();

    // Harness rays travel along -Z, so the +Z cube is closer
    h.click_at(0.0, 0.0);
    assert_eq!(h.selected_id(), Some(&front));
}

#[test]
fn test_property_edit_keeps_selection_and_outline() {
    let mut h = EditorHarness::new();
    let id = h.add_cylinder();
    h.select(&id);

    let mut fields = h.primitive_of(&id).unwrap().fields();
    fields.radius = Some(2.5);
    h.edit_properties(&fields).unwrap();

    assert_eq!(h.selected_id(), Some(&id));
    assert!(h.has_outline());
    assert_eq!(
        h.primitive_of(&id),
        Some(&Primitive::Cylinder {
            radius: 2.5,
            height: 1.0,
            segments: 8
        })
    );
}

#[test]
fn test_invalid_property_edit_rejected() {
    let mut h = EditorHarness::new();
    let id = h.add_sphere();
    h.select(&id);
    let before = h.primitive_of(&id).cloned();

    let mut fields = ShapeFields::default();
    fields.radius = Some(f64::NAN);
    fields.segments = Some(8);
    assert!(h.edit_properties(&fields).is_err());
    assert_eq!(h.primitive_of(&id), before.as_ref());
}

#[test]
fn test_undo_stack_walks_back_to_empty() {
    let mut h = EditorHarness::new();
    h.add_cube();
    h.add_cone();
    h.add_torus();
    assert_eq!(h.undo_depth(), 3);

    assert!(h.undo());
    assert!(h.undo());
    assert!(h.undo());
    assert_eq!(h.object_count(), 0);

    // Nothing left to undo
    assert!(!h.undo());
}

#[test]
fn test_undo_after_delete_restores_fresh_copy() {
    let mut h = EditorHarness::new();
    let id = h.add_torus();
    h.select(&id);
    h.move_selected([1.0, 2.0, 3.0]);
    h.delete_selected();

    assert!(h.undo());
    assert_eq!(h.object_count(), 1);
    let restored = h.session.scene().iter().next().unwrap();
    assert_ne!(restored.id(), &id);
    assert_eq!(restored.transform.position, [1.0, 2.0, 3.0]);
    assert_eq!(restored.primitive().kind(), PrimitiveKind::Torus);
}

#[test]
fn test_transform_edits_are_not_undo_steps() {
    let mut h = EditorHarness::new();
    let id = h.add_cube();
    h.select(&id);
    let depth = h.undo_depth();

    h.move_selected([5.0, 0.0, 0.0]);
    h.rotate_selected([0.0, 45.0, 0.0]);
    assert_eq!(h.undo_depth(), depth);

    // Undo reverts the add, not the moves
    assert!(h.undo());
    assert_eq!(h.object_count(), 0);
}

#[test]
fn test_export_round_trips_through_serde() {
    let mut h = EditorHarness::new();
    h.add_cube();
    h.add_by_name("cylinder").unwrap();
    let json = h.export_scene_json();

    let records: Vec<forma_gui_lib::state::ObjectRecord> =
        serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].primitive.kind(), PrimitiveKind::Cube);
    assert_eq!(records[1].primitive.kind(), PrimitiveKind::Cylinder);
}
