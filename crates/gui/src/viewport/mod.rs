//! 3D viewport panel with OpenGL rendering

mod camera;
mod gl_renderer;
pub use forma_gui_lib::viewport::{mesh, picking};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::state::EditorSession;
use camera::ArcBallCamera;
use gl_renderer::GlRenderer;
use mesh::MeshData;

const BG_COLOR: [u8; 3] = [24, 26, 30];

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    /// World-space meshes keyed by object ID, rebuilt when the scene changes
    mesh_cache: HashMap<String, MeshData>,
    cached_scene_version: Option<u64>,
    /// World-space outline shell for the selected object
    outline_cache: Option<MeshData>,
    cached_outline_version: Option<u64>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            gl_renderer: None,
            mesh_cache: HashMap::new(),
            cached_scene_version: None,
            outline_cache: None,
            cached_outline_version: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut EditorSession) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Camera controls ─────────────────────────────────────
        if response.dragged_by(egui::PointerButton::Middle)
            || (response.dragged_by(egui::PointerButton::Primary)
                && ui.input(|i| i.modifiers.alt))
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.01);
        }

        // ── Object selection via click ──────────────────────────
        if response.clicked() && !ui.input(|i| i.modifiers.alt) {
            if let Some(pos) = response.interact_pointer_pos() {
                let ray = self.camera.screen_ray(pos, rect);
                session.handle_click(&ray);
            }
        }

        // ── Refresh mesh caches against state versions ──────────
        self.refresh_caches(session);

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect);
        self.draw_overlays(ui, rect, session);
    }

    /// Rebake world meshes when the scene or selection version moved.
    /// The version check keeps per-frame work at zero for a static scene.
    fn refresh_caches(&mut self, session: &EditorSession) {
        let scene_version = session.scene().version();
        if self.cached_scene_version != Some(scene_version) {
            self.mesh_cache = session
                .scene()
                .iter()
                .map(|o| (o.id().clone(), o.world_mesh()))
                .collect();
            self.cached_scene_version = Some(scene_version);
        }

        let outline_version = session.selection().version();
        if self.cached_outline_version != Some(outline_version) {
            self.outline_cache = session
                .selection()
                .outline()
                .map(|o| mesh::transformed(&o.mesh, &o.transform));
            self.cached_outline_version = Some(outline_version);
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect) {
        let Some(gl_renderer) = &self.gl_renderer else {
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera_yaw = self.camera.yaw;
        let camera_pitch = self.camera.pitch;
        let camera_distance = self.camera.distance;
        let camera_target = self.camera.target;
        let camera_fov = self.camera.fov;

        let meshes = self.mesh_cache.clone();
        let scene_version = self.cached_scene_version.unwrap_or(0);
        let outline = self.outline_cache.clone();
        let outline_version = self.cached_outline_version.unwrap_or(0);

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let camera = ArcBallCamera {
                    yaw: camera_yaw,
                    pitch: camera_pitch,
                    distance: camera_distance,
                    target: camera_target,
                    fov: camera_fov,
                };

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.sync_from_meshes(gl, &meshes, scene_version);
                    r.sync_outline(gl, outline.as_ref(), outline_version);

                    let render_params = gl_renderer::RenderParams {
                        viewport,
                        bg_color: BG_COLOR,
                    };
                    r.paint(gl, &camera, &render_params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, session: &EditorSession) {
        let painter = ui.painter_at(rect);

        // Navigation hint on an empty scene
        if session.scene().is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "MMB / Alt+drag: rotate | RMB: pan | Scroll: zoom | Click: select",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }

        // Camera info overlay
        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
            egui::vec2(136.0, 44.0),
        );
        painter.rect_filled(
            overlay_rect,
            4.0,
            egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
        );
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(160, 160, 170),
        );
    }
}
