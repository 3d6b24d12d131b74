//! Keyboard shortcut handling

use eframe::egui;

use crate::state::EditorSession;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, session: &mut EditorSession) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Z — undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) {
            session.undo();
        }
        // Escape — deselect
        if i.key_pressed(egui::Key::Escape) {
            session.clear_selection();
        }
        // Delete — remove selected object
        if i.key_pressed(egui::Key::Delete) {
            session.delete_selected();
        }
    });
}
