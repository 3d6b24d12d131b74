//! Top toolbar: shape creation buttons, undo and delete

use egui::Ui;
use shared::PrimitiveKind;

use crate::state::EditorSession;

pub fn show(ui: &mut Ui, session: &mut EditorSession) {
    ui.horizontal(|ui| {
        ui.label("Add:");
        for kind in PrimitiveKind::ALL {
            if ui.button(kind.label()).clicked() {
                session.add_shape(kind);
            }
        }

        ui.separator();

        if ui
            .add_enabled(session.can_undo(), egui::Button::new("Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            session.undo();
        }

        let has_selection = session.selection().selected().is_some();
        if ui
            .add_enabled(has_selection, egui::Button::new("Delete"))
            .on_hover_text("Del")
            .clicked()
        {
            session.delete_selected();
        }
    });
}
