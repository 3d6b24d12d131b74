mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state` etc. resolve to the
// lib crate types everywhere in the binary.
pub use forma_gui_lib::state;

use app::EditorApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forma_gui=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Forma — 3D Scene Editor")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "forma-gui",
        native_options,
        Box::new(|cc| Ok(Box::new(EditorApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
