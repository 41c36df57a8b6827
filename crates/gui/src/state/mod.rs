pub mod layers;
pub mod mesh;
pub mod reduce;
pub mod selection;
pub mod settings;
pub mod tools;

use glam::DVec2;
use shared::{TerrainGeometry, TriangleIndices};

pub use layers::{LayerSet, PickOutcome};
pub use mesh::Mesh;
pub use selection::{Handle, SelectionState};
pub use settings::{AppSettings, Language};
pub use tools::{ToolState, VertexDrag};

use crate::snap;
use crate::viewport::camera::ViewRect;
use crate::viewport::picking;

/// Panel visibility flags
pub struct PanelVisibility {
    pub layer_panel: bool,
    pub preview: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            layer_panel: true,
            preview: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub layers: LayerSet,
    pub selection: SelectionState,
    pub tools: ToolState,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Set by toolbar/menu/keyboard, consumed by the view surfaces
    pub view_reset_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        let mut layers = LayerSet::new(settings.layers.clone()).unwrap_or_else(|e| {
            tracing::warn!("Invalid layer config ({e}), using terrain defaults");
            LayerSet::default()
        });
        layers.set_inactive_opacity(settings.ui.inactive_opacity);
        Self {
            layers,
            selection: SelectionState::default(),
            tools: ToolState::default(),
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
            view_reset_requested: false,
        }
    }

    /// Push edited settings into the live state
    pub fn apply_settings(&mut self) {
        self.layers
            .set_inactive_opacity(self.settings.ui.inactive_opacity);
    }

    /// Grid snap (or plain clamp when snapping is off)
    pub fn snap(&self, world: DVec2) -> DVec2 {
        match self.settings.grid.active_cell() {
            Some(cell) => snap::snap_point(world, cell),
            None => snap::clamp_point(world),
        }
    }

    // ── Modes ─────────────────────────────────────────────────

    pub fn set_add_vertex_mode(&mut self, on: bool) {
        self.tools.add_vertex = on;
        if on {
            self.layers.set_triangle_mode(false);
        }
    }

    pub fn set_triangle_mode(&mut self, on: bool) {
        self.layers.set_triangle_mode(on);
        if on {
            self.tools.add_vertex = false;
        }
    }

    pub fn toggle_triangle_mode(&mut self) -> bool {
        let on = !self.layers.triangle_mode();
        self.set_triangle_mode(on);
        on
    }

    /// Switch the editable layer; selection outside it is dropped.
    pub fn set_active_layer(&mut self, layer: usize) -> bool {
        if !self.layers.set_active_layer(layer) {
            return false;
        }
        self.selection.retain_layer(layer);
        self.tools.cancel_gestures();
        true
    }

    // ── Geometry ──────────────────────────────────────────────

    /// Add a vertex on the active layer at the snapped position
    pub fn place_vertex(&mut self, world: DVec2) -> Option<usize> {
        let p = self.snap(world);
        self.layers.add_vertex(self.layers.active_layer(), p)
    }

    /// Feed a vertex click into the triangle-pick buffer of the active layer
    pub fn pick_vertex(&mut self, index: usize) -> PickOutcome {
        self.layers.pick_vertex(self.layers.active_layer(), index)
    }

    pub fn delete_last_triangle(&mut self) -> Option<TriangleIndices> {
        let layer = self.layers.active_layer();
        let removed = self.layers.delete_last_triangle(layer)?;
        // the removed triangle's index is gone; vertex handles stay valid
        let count = self.layers.active_mesh().triangle_count();
        if self.selection.is_triangle_selected(layer, count) {
            self.selection.toggle(Handle::triangle(layer, count));
        }
        Some(removed)
    }

    /// Delete everything selected and drop all index-based state.
    pub fn delete_selection(&mut self) -> Vec<usize> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let handles = self.selection.all().to_vec();
        let affected = self.layers.delete_selection(&handles);
        self.selection.clear();
        self.tools.cancel_gestures();
        tracing::info!(
            "Deleted selection ({} handles), {} layer(s) rebuilt",
            handles.len(),
            affected.len()
        );
        affected
    }

    // ── Drag ──────────────────────────────────────────────────

    /// Start dragging a vertex of the active layer
    pub fn begin_drag(&mut self, index: usize) -> bool {
        let layer = self.layers.active_layer();
        let mesh = self.layers.active_mesh();
        if index >= mesh.vertex_count() {
            return false;
        }
        self.tools.drag = Some(VertexDrag {
            layer,
            index,
            version: mesh.version(),
        });
        true
    }

    /// Move the dragged vertex to a snapped world position.
    ///
    /// The drag is cancelled if its layer changed by any other route.
    pub fn drag_to(&mut self, world: DVec2) -> bool {
        let Some(drag) = self.tools.drag else {
            return false;
        };
        let current = self.layers.mesh(drag.layer).map(Mesh::version);
        if current != Some(drag.version) {
            tracing::debug!("Drag cancelled: layer {} changed underneath", drag.layer);
            self.tools.drag = None;
            return false;
        }
        let p = self.snap(world);
        if !self.layers.move_vertex(drag.layer, drag.index, p) {
            self.tools.drag = None;
            return false;
        }
        self.tools.drag = self.layers.mesh(drag.layer).map(|m| VertexDrag {
            version: m.version(),
            ..drag
        });
        true
    }

    pub fn end_drag(&mut self) {
        self.tools.drag = None;
    }

    // ── Selection ─────────────────────────────────────────────

    /// Geometry of the active layer under `world`: vertices win over triangles
    pub fn hit_test(&self, world: DVec2, vertex_radius: f64) -> Option<Handle> {
        let layer = self.layers.active_layer();
        let mesh = self.layers.active_mesh();
        if let Some(hit) = picking::nearest_vertex(mesh, world, vertex_radius) {
            return Some(Handle::vertex(layer, hit.index));
        }
        picking::triangle_at(mesh, world).map(|t| Handle::triangle(layer, t))
    }

    /// Click selection. `additive` toggles instead of replacing.
    pub fn select_at(&mut self, world: DVec2, vertex_radius: f64, additive: bool) -> Option<Handle> {
        let hit = self.hit_test(world, vertex_radius);
        match (hit, additive) {
            (Some(h), true) => self.selection.toggle(h),
            (Some(h), false) => self.selection.select(h),
            (None, false) => self.selection.clear(),
            (None, true) => {}
        }
        hit
    }

    /// Rubber-band selection on the active layer
    pub fn select_rect(&mut self, rect: &ViewRect, additive: bool) -> usize {
        let layer = self.layers.active_layer();
        let mesh = self.layers.active_mesh();
        let handles: Vec<Handle> = picking::vertices_in_rect(mesh, rect)
            .into_iter()
            .map(|i| Handle::vertex(layer, i))
            .chain(
                picking::triangles_in_rect(mesh, rect)
                    .into_iter()
                    .map(|t| Handle::triangle(layer, t)),
            )
            .collect();
        if !additive {
            self.selection.clear();
        }
        let count = handles.len();
        self.selection.extend(handles);
        count
    }

    // ── Files ─────────────────────────────────────────────────

    pub fn load_geometry(&mut self, geometry: &TerrainGeometry) -> Result<(), String> {
        self.layers
            .load_geometry(geometry)
            .map_err(|e| format!("Invalid terrain geometry: {e}"))?;
        self.selection.clear();
        self.tools.cancel_gestures();
        Ok(())
    }

    pub fn export_geometry(&self) -> TerrainGeometry {
        self.layers.export_geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::default()
    }

    #[test]
    fn test_place_vertex_snaps() {
        let mut s = state();
        let i = s.place_vertex(DVec2::new(15.7, -15.6)).unwrap();
        assert_eq!(s.layers.active_mesh().point(i), Some(DVec2::new(15.0, -15.0)));

        s.settings.grid.snap_enabled = false;
        let j = s.place_vertex(DVec2::new(15.7, 900.0)).unwrap();
        assert_eq!(s.layers.active_mesh().point(j), Some(DVec2::new(15.7, 500.0)));
    }

    #[test]
    fn test_modes_are_exclusive() {
        let mut s = state();
        s.set_add_vertex_mode(true);
        assert!(s.toggle_triangle_mode());
        assert!(!s.tools.add_vertex);
        s.set_add_vertex_mode(true);
        assert!(!s.layers.triangle_mode());
    }

    #[test]
    fn test_switch_layer_drops_foreign_selection() {
        let mut s = state();
        s.selection.extend([Handle::vertex(0, 0), Handle::vertex(1, 0)]);
        assert!(s.set_active_layer(1));
        assert_eq!(s.selection.all(), &[Handle::vertex(1, 0)]);
        assert!(!s.set_active_layer(99));
        assert_eq!(s.layers.active_layer(), 1);
    }

    #[test]
    fn test_delete_selection_clears_index_state() {
        let mut s = state();
        for p in [DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)] {
            s.place_vertex(p);
        }
        s.begin_drag(2);
        s.selection.select(Handle::vertex(0, 0));
        assert_eq!(s.delete_selection(), vec![0]);
        assert!(s.selection.is_empty());
        assert!(s.tools.drag.is_none());
        assert_eq!(s.layers.active_mesh().vertex_count(), 2);
        assert!(s.delete_selection().is_empty());
    }

    #[test]
    fn test_drag_moves_snapped_and_detects_stale_index() {
        let mut s = state();
        s.place_vertex(DVec2::ZERO);
        s.place_vertex(DVec2::new(50.0, 50.0));
        assert!(s.begin_drag(1));
        assert!(s.drag_to(DVec2::new(61.0, 39.0)));
        assert_eq!(s.layers.active_mesh().point(1), Some(DVec2::new(60.0, 40.0)));
        assert!(s.drag_to(DVec2::new(70.0, 70.0)));

        // another mutation renumbers nothing here, but the drag must still bail
        s.place_vertex(DVec2::new(5.0, 5.0));
        assert!(!s.drag_to(DVec2::new(80.0, 80.0)));
        assert!(s.tools.drag.is_none());
        assert_eq!(s.layers.active_mesh().point(1), Some(DVec2::new(70.0, 70.0)));
    }

    #[test]
    fn test_select_at_prefers_vertex() {
        let mut s = state();
        for p in [DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)] {
            s.place_vertex(p);
        }
        s.layers.add_triangle(0, 0, 1, 2);

        assert_eq!(s.select_at(DVec2::new(2.0, 1.0), 5.0, false), Some(Handle::vertex(0, 0)));
        assert_eq!(s.select_at(DVec2::new(20.0, 20.0), 5.0, true), Some(Handle::triangle(0, 0)));
        assert_eq!(s.selection.count(), 2);
        assert_eq!(s.select_at(DVec2::new(300.0, 300.0), 5.0, false), None);
        assert!(s.selection.is_empty());
    }

    #[test]
    fn test_select_rect() {
        let mut s = state();
        for p in [DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)] {
            s.place_vertex(p);
        }
        s.layers.add_triangle(0, 0, 1, 2);
        let n = s.select_rect(&ViewRect::new(-10.0, -10.0, 20.0, 20.0), false);
        assert_eq!(n, 2);
        assert!(s.selection.is_vertex_selected(0, 0));
        assert!(s.selection.is_triangle_selected(0, 0));
    }

    #[test]
    fn test_delete_last_triangle_deselects_it() {
        let mut s = state();
        for p in [DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)] {
            s.place_vertex(p);
        }
        s.layers.add_triangle(0, 0, 1, 2);
        s.selection.extend([Handle::triangle(0, 0), Handle::vertex(0, 1)]);
        assert_eq!(s.delete_last_triangle(), Some([0, 1, 2]));
        assert_eq!(s.selection.all(), &[Handle::vertex(0, 1)]);
        assert_eq!(s.delete_last_triangle(), None);
    }
}
