//! Properties panel for the selected object.
//!
//! The panel is only shown while a selection exists; the app hides it
//! entirely otherwise. Edits apply immediately on change.

use egui::Ui;
use shared::ShapeFields;

use crate::state::EditorSession;

pub fn show(ui: &mut Ui, session: &mut EditorSession) {
    let Some(object) = session.selected_object() else {
        return;
    };

    let kind = object.primitive().kind();
    let mut fields = object.primitive().fields();
    let mut position = object.transform.position;
    let mut rotation = object.transform.rotation;

    ui.heading("Properties");
    ui.separator();
    ui.horizontal(|ui| {
        ui.strong(kind.label());
        ui.weak(short_id(object.id()));
    });
    ui.add_space(4.0);

    let mut fields_changed = false;

    egui::CollapsingHeader::new("Dimensions")
        .id_salt("shape_dims")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("shape_fields")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    fields_changed |= dim_row(ui, "Width", &mut fields.width);
                    fields_changed |= dim_row(ui, "Height", &mut fields.height);
                    fields_changed |= dim_row(ui, "Depth", &mut fields.depth);
                    fields_changed |= dim_row(ui, "Radius", &mut fields.radius);
                    fields_changed |= dim_row(ui, "Tube radius", &mut fields.tube_radius);
                    fields_changed |= segments_row(ui, &mut fields.segments);
                });
        });

    let mut position_changed = false;
    let mut rotation_changed = false;

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Transform")
        .id_salt("shape_transform")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("transform_fields")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    position_changed = vec3_row(ui, "Position", &mut position, 0.05);
                    rotation_changed = vec3_row(ui, "Rotation", &mut rotation, 1.0);
                });
        });

    if fields_changed {
        if let Err(e) = session.apply_property_edit(&fields) {
            tracing::warn!("property edit rejected: {e}");
        }
    }
    if position_changed {
        session.set_position(position);
    }
    if rotation_changed {
        session.set_rotation(rotation);
    }
}

/// One drag row for an optional dimension; absent fields render nothing
fn dim_row(ui: &mut Ui, label: &str, value: &mut Option<f64>) -> bool {
    let Some(v) = value.as_mut() else {
        return false;
    };
    ui.label(format!("{label}:"));
    let changed = ui
        .add(
            egui::DragValue::new(v)
                .speed(0.05)
                .range(0.01..=1000.0)
                .fixed_decimals(2),
        )
        .changed();
    ui.end_row();
    changed
}

fn segments_row(ui: &mut Ui, value: &mut Option<u32>) -> bool {
    let Some(v) = value.as_mut() else {
        return false;
    };
    ui.label("Segments:");
    let changed = ui
        .add(egui::DragValue::new(v).speed(1).range(3..=128))
        .changed();
    ui.end_row();
    changed
}

fn vec3_row(ui: &mut Ui, label: &str, value: &mut [f64; 3], speed: f64) -> bool {
    ui.label(format!("{label}:"));
    let mut changed = false;
    ui.horizontal(|ui| {
        for v in value.iter_mut() {
            changed |= ui
                .add(egui::DragValue::new(v).speed(speed).fixed_decimals(1))
                .changed();
        }
    });
    ui.end_row();
    changed
}

fn short_id(id: &str) -> &str {
    if id.len() > 8 {
        &id[..8]
    } else {
        id
    }
}
