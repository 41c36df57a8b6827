//! 2D editor surface: layer meshes, grid, and mouse editing

mod overlays;
mod preview;
mod renderer;
pub use terrain_editor_lib::viewport::{camera, picking};

use egui::{PointerButton, Sense, Ui};
use glam::DVec2;

use crate::state::{AppState, PickOutcome};
use camera::{Camera, ViewRect};
use renderer::{to_dvec2, view_rect, MeshStyle};

pub use preview::PreviewPanel;

/// Main editing surface
pub struct EditorPanel {
    camera: Camera,
}

impl EditorPanel {
    pub fn new(initial: ViewRect) -> Self {
        Self {
            camera: Camera::new(initial),
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.camera.set_viewport(view_rect(rect));

        // ── Cursor tracking ─────────────────────────────
        state.tools.cursor_world = response
            .hover_pos()
            .or_else(|| response.interact_pointer_pos())
            .map(|p| self.camera.screen_to_world(to_dvec2(p)));

        // ── Pan / zoom ──────────────────────────────────
        if response.dragged_by(PointerButton::Middle) || response.dragged_by(PointerButton::Secondary) {
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

        // ── Editing gestures ────────────────────────────
        self.handle_drag(ui, &response, state);
        self.handle_click(ui, &response, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, renderer::BACKGROUND_COLOR);
        if state.settings.grid.visible {
            renderer::paint_grid(&painter, &self.camera, state.settings.grid.step);
        }
        renderer::paint_world_border(&painter, &self.camera);
        self.paint_layers(&painter, state);

        // ── Overlays ─────────────────────────────────────
        overlays::draw_pick_preview(&painter, &self.camera, state);
        overlays::draw_ghost_vertex(&painter, &self.camera, state);
        if let (Some(start), Some(cursor)) = (state.tools.band_start, state.tools.cursor_world) {
            overlays::draw_band(&painter, &self.camera, start, cursor);
        }
        overlays::draw_camera_info(&painter, rect, &self.camera);
        if state.layers.total_vertices() == 0 {
            overlays::draw_nav_hint(&painter, rect);
        }
    }

    /// Pick radius in world units for the configured vertex marker size
    fn pick_radius(&self, state: &AppState) -> f64 {
        f64::from(state.settings.ui.vertex_radius) / self.camera.zoom()
    }

    fn handle_drag(&self, ui: &Ui, response: &egui::Response, state: &mut AppState) {
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let world = self.camera.screen_to_world(to_dvec2(pos));

        if response.drag_started_by(PointerButton::Primary) {
            let radius = self.pick_radius(state);
            let hit = picking::nearest_vertex(state.layers.active_mesh(), world, radius);
            match hit {
                Some(hit) if !state.layers.triangle_mode() => {
                    state.begin_drag(hit.index);
                }
                _ => state.tools.band_start = Some(world),
            }
        }

        if response.dragged_by(PointerButton::Primary) && state.tools.drag.is_some() {
            state.drag_to(world);
        }

        if response.drag_stopped() {
            state.end_drag();
            if let Some(start) = state.tools.band_start.take() {
                let additive = ui.input(|i| i.modifiers.shift || i.modifiers.command);
                let n = state.select_rect(&ViewRect::from_points(start, world), additive);
                tracing::debug!("Rubber-band selected {n} item(s)");
            }
        }
    }

    fn handle_click(&self, ui: &Ui, response: &egui::Response, state: &mut AppState) {
        if !response.clicked_by(PointerButton::Primary) {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let world = self.camera.screen_to_world(to_dvec2(pos));
        let radius = self.pick_radius(state);

        if state.layers.triangle_mode() {
            if let Some(hit) = picking::nearest_vertex(state.layers.active_mesh(), world, radius) {
                if let PickOutcome::Committed { triangle } = state.pick_vertex(hit.index) {
                    tracing::debug!("Triangle {triangle} committed");
                }
            }
            return;
        }

        if state.tools.add_vertex {
            state.place_vertex(world);
            return;
        }

        let additive = ui.input(|i| i.modifiers.shift || i.modifiers.command);
        state.select_at(world, radius, additive);
    }

    fn paint_layers(&self, painter: &egui::Painter, state: &AppState) {
        let layers = &state.layers;
        let active = layers.active_layer();
        // active layer last so it stays on top
        let order = (0..layers.len()).filter(|&l| l != active).chain([active]);
        for layer in order {
            let Some(mesh) = layers.mesh(layer) else {
                continue;
            };
            let style = MeshStyle {
                layer,
                color: layers.color(layer),
                opacity: layers.opacity(layer),
                interactive: layers.is_interactive(layer),
                vertex_radius: state.settings.ui.vertex_radius,
            };
            renderer::paint_mesh(painter, &self.camera, mesh, &style, Some(&state.selection));
        }
    }
}
