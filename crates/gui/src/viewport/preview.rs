//! Aggregate preview: every layer at full opacity, read-only

use egui::{PointerButton, Sense, Ui};
use glam::DVec2;

use crate::i18n::t;
use crate::state::AppState;

use super::camera::{Camera, ViewRect};
use super::renderer::{self, to_dvec2, view_rect, MeshStyle};

pub struct PreviewPanel {
    camera: Camera,
}

impl PreviewPanel {
    pub fn new(initial: ViewRect) -> Self {
        Self {
            camera: Camera::new(initial),
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn show(&mut self, ui: &mut Ui, state: &AppState) {
        ui.heading(t("preview.title"));
        ui.separator();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::drag());
        let margin = state.settings.camera.preview_margin;
        self.camera.set_viewport(view_rect(rect).shrink(margin));

        if response.dragged_by(PointerButton::Primary) || response.dragged_by(PointerButton::Middle) {
            let d = response.drag_delta();
            self.camera.pan(DVec2::new(f64::from(d.x), f64::from(d.y)));
        }
        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let step = state.settings.camera.zoom_step;
                let factor = if scroll > 0.0 { step } else { 1.0 / step };
                self.camera.zoom_at(to_dvec2(hover), factor);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, renderer::BACKGROUND_COLOR);
        renderer::paint_world_border(&painter, &self.camera);

        let layers = &state.layers;
        for layer in 0..layers.len() {
            let Some(mesh) = layers.mesh(layer) else {
                continue;
            };
            let style = MeshStyle {
                layer,
                color: layers.color(layer),
                opacity: 1.0,
                interactive: false,
                vertex_radius: 0.0,
            };
            renderer::paint_mesh(&painter, &self.camera, mesh, &style, None);
        }
    }
}
