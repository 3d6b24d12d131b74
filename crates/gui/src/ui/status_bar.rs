use egui::Ui;

use crate::state::EditorSession;

pub fn show(ui: &mut Ui, session: &EditorSession) {
    ui.horizontal(|ui| {
        ui.weak(format!("Objects: {}", session.scene().len()));

        ui.separator();

        match session.selected_object() {
            Some(object) => {
                ui.label(format!("Selected: {}", object.primitive().kind().label()));
            }
            None => {
                ui.weak("Ready");
            }
        }

        if session.can_undo() {
            ui.separator();
            ui.weak(format!("Undo steps: {}", session.undo_depth()));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Forma v0.1");
        });
    });
}
