//! Headless test harness for programmatic terrain editing.
//!
//! Mirrors what the editor window does with mouse and keyboard, minus
//! rendering: one `AppState` plus the cameras of the editor and preview
//! surfaces.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use shared::{TerrainGeometry, TriangleIndices};

use crate::state::{AppSettings, AppState, Handle, Mesh, PickOutcome};
use crate::validation::{validate_layers, MeshValidator};
use crate::viewport::camera::{Camera, ViewRect};

/// Which view surface a camera operation targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Editor,
    Preview,
}

/// Headless test harness: editing state plus both surface cameras
pub struct TestHarness {
    pub state: AppState,
    pub editor: Camera,
    pub preview: Camera,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let initial = settings.camera.initial_rect;
        Self {
            state: AppState::new(settings),
            editor: Camera::new(initial),
            preview: Camera::new(initial),
        }
    }

    // ── Geometry ──────────────────────────────────────────────

    /// Place a vertex on the active layer (snapped like a click)
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Option<usize> {
        self.state.place_vertex(DVec2::new(x, y))
    }

    /// Append a vertex at an exact position on any layer
    pub fn add_vertex_exact(&mut self, layer: usize, x: f64, y: f64) -> Option<usize> {
        self.state.layers.add_vertex(layer, DVec2::new(x, y))
    }

    /// Move a vertex of the active layer; inactive layers are never movable
    pub fn move_vertex(&mut self, index: usize, x: f64, y: f64) -> bool {
        let layer = self.state.layers.active_layer();
        self.state.layers.move_vertex(layer, index, DVec2::new(x, y))
    }

    /// Add a triangle on the active layer
    pub fn add_triangle(&mut self, i: usize, j: usize, k: usize) -> bool {
        let layer = self.state.layers.active_layer();
        self.state.layers.add_triangle(layer, i, j, k)
    }

    pub fn toggle_triangle_mode(&mut self) -> bool {
        self.state.toggle_triangle_mode()
    }

    pub fn pick_vertex(&mut self, index: usize) -> PickOutcome {
        self.state.pick_vertex(index)
    }

    pub fn delete_last_triangle(&mut self) -> Option<TriangleIndices> {
        self.state.delete_last_triangle()
    }

    pub fn set_active_layer(&mut self, layer: usize) -> bool {
        self.state.set_active_layer(layer)
    }

    /// Empty every layer
    pub fn clear(&mut self) {
        self.state.layers.clear();
        self.state.selection.clear();
        self.state.tools.cancel_gestures();
    }

    // ── Selection ─────────────────────────────────────────────

    /// Replace the selection. Handles outside the active layer are dropped.
    pub fn select(&mut self, handles: impl IntoIterator<Item = Handle>) {
        let active = self.state.layers.active_layer();
        self.state.selection.clear();
        self.state
            .selection
            .extend(handles.into_iter().filter(|h| h.layer() == active));
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Delete the selection; returns the rebuilt layers
    pub fn delete_selection(&mut self) -> Vec<usize> {
        self.state.delete_selection()
    }

    /// Click at a screen position of the editor surface
    pub fn click_select(&mut self, screen: DVec2, additive: bool) -> Option<Handle> {
        let world = self.editor.screen_to_world(screen);
        let radius = f64::from(self.state.settings.ui.vertex_radius) / self.editor.zoom();
        self.state.select_at(world, radius, additive)
    }

    // ── Cameras ───────────────────────────────────────────────

    pub fn camera(&self, surface: Surface) -> &Camera {
        match surface {
            Surface::Editor => &self.editor,
            Surface::Preview => &self.preview,
        }
    }

    pub fn camera_mut(&mut self, surface: Surface) -> &mut Camera {
        match surface {
            Surface::Editor => &mut self.editor,
            Surface::Preview => &mut self.preview,
        }
    }

    /// Lay out a surface. The preview keeps its configured margin.
    pub fn set_viewport(&mut self, surface: Surface, rect: ViewRect) {
        let rect = match surface {
            Surface::Editor => rect,
            Surface::Preview => rect.shrink(self.state.settings.camera.preview_margin),
        };
        self.camera_mut(surface).set_viewport(rect);
    }

    pub fn pan(&mut self, surface: Surface, dx: f64, dy: f64) {
        self.camera_mut(surface).pan(DVec2::new(dx, dy));
    }

    pub fn zoom_at(&mut self, surface: Surface, x: f64, y: f64, factor: f64) {
        self.camera_mut(surface).zoom_at(DVec2::new(x, y), factor);
    }

    /// One wheel notch (positive = zoom in) using the configured step
    pub fn wheel(&mut self, surface: Surface, x: f64, y: f64, notches: i32) {
        let factor = self.state.settings.camera.zoom_step.powi(notches);
        self.zoom_at(surface, x, y, factor);
    }

    pub fn reset_camera(&mut self, surface: Surface) {
        self.camera_mut(surface).reset();
    }

    pub fn reset_cameras(&mut self) {
        self.editor.reset();
        self.preview.reset();
    }

    pub fn screen_to_world(&self, surface: Surface, x: f64, y: f64) -> DVec2 {
        self.camera(surface).screen_to_world(DVec2::new(x, y))
    }

    // ── Files ─────────────────────────────────────────────────

    /// Load a terrain mapping (replaces all layers)
    pub fn load_geometry(&mut self, geometry: &TerrainGeometry) -> Result<(), String> {
        self.state.load_geometry(geometry)
    }

    /// Load a terrain mapping from JSON string
    pub fn load_geometry_json(&mut self, json: &str) -> Result<(), String> {
        let geometry: TerrainGeometry =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_geometry(&geometry)
    }

    /// Export all layers as JSON
    pub fn export_geometry_json(&self) -> String {
        serde_json::to_string_pretty(&self.state.export_geometry()).unwrap_or_default()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn active_layer(&self) -> usize {
        self.state.layers.active_layer()
    }

    pub fn mesh(&self, layer: usize) -> Option<&Mesh> {
        self.state.layers.mesh(layer)
    }

    pub fn active_mesh(&self) -> &Mesh {
        self.state.layers.active_mesh()
    }

    pub fn vertex_count(&self, layer: usize) -> usize {
        self.mesh(layer).map_or(0, Mesh::vertex_count)
    }

    pub fn triangle_count(&self, layer: usize) -> usize {
        self.mesh(layer).map_or(0, Mesh::triangle_count)
    }

    pub fn selection_count(&self) -> usize {
        self.state.selection.count()
    }

    /// Create a validator for a layer's mesh
    pub fn validate_mesh(&self, layer: usize) -> Option<MeshValidator<'_>> {
        self.mesh(layer).map(MeshValidator::new)
    }

    /// Invariant violations across all layers (empty when healthy)
    pub fn errors(&self) -> Vec<String> {
        validate_layers(&self.state.layers)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
