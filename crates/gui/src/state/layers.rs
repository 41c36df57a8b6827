//! Fixed stack of terrain layers with a single active (editable) layer.

use glam::DVec2;
use shared::{GeometryError, LayerConfig, TerrainGeometry, TriangleIndices};

use super::mesh::Mesh;
use super::reduce;
use super::selection::Handle;
use crate::validation::MeshValidator;

/// Opacity used for layers that are not active
pub const DEFAULT_INACTIVE_OPACITY: f32 = 0.1;

/// What a click on a vertex did to the triangle-pick buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not in triangle mode, wrong layer, or no such vertex
    Ignored,
    /// Vertex appended to the buffer
    Added,
    /// Vertex was already buffered and got removed (click-to-deselect)
    Removed,
    /// Third vertex picked; the triangle was appended at this index
    Committed { triangle: usize },
}

/// N independent meshes plus the active-layer selector
#[derive(Debug, Clone)]
pub struct LayerSet {
    config: LayerConfig,
    meshes: Vec<Mesh>,
    active: usize,
    triangle_mode: bool,
    /// Vertex indices within the active layer, at most three
    pick_buffer: Vec<usize>,
    inactive_opacity: f32,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::from_valid_config(LayerConfig::default())
    }
}

impl LayerSet {
    /// Create one empty mesh per configured layer.
    pub fn new(config: LayerConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: LayerConfig) -> Self {
        let meshes = vec![Mesh::new(); config.layer_count()];
        Self {
            config,
            meshes,
            active: 0,
            triangle_mode: false,
            pick_buffer: Vec::with_capacity(3),
            inactive_opacity: DEFAULT_INACTIVE_OPACITY,
        }
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Number of layers (fixed at construction)
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn name(&self, layer: usize) -> Option<&str> {
        self.config.names.get(layer).map(String::as_str)
    }

    pub fn color(&self, layer: usize) -> [u8; 3] {
        self.config.color(layer)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, layer: usize) -> Option<&Mesh> {
        self.meshes.get(layer)
    }

    pub fn mesh_mut(&mut self, layer: usize) -> Option<&mut Mesh> {
        self.meshes.get_mut(layer)
    }

    /// Sum of all mesh versions; moves whenever any layer changes
    pub fn version(&self) -> u64 {
        self.meshes.iter().map(Mesh::version).sum()
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    // ── Active layer ──────────────────────────────────────────

    pub fn active_layer(&self) -> usize {
        self.active
    }

    pub fn active_mesh(&self) -> &Mesh {
        &self.meshes[self.active]
    }

    /// Switch the editable layer. Clears any half-built triangle first.
    pub fn set_active_layer(&mut self, layer: usize) -> bool {
        if layer >= self.meshes.len() {
            tracing::warn!("set_active_layer: no layer {layer} (have {})", self.meshes.len());
            return false;
        }
        if layer == self.active {
            return true;
        }
        self.pick_buffer.clear();
        self.active = layer;
        tracing::info!("Active layer: {}", self.name(layer).unwrap_or("?"));
        true
    }

    /// Only the active layer accepts picking, selection and dragging
    pub fn is_interactive(&self, layer: usize) -> bool {
        layer == self.active
    }

    /// Render opacity for a layer
    pub fn opacity(&self, layer: usize) -> f32 {
        if self.is_interactive(layer) {
            1.0
        } else {
            self.inactive_opacity
        }
    }

    pub fn set_inactive_opacity(&mut self, opacity: f32) {
        self.inactive_opacity = opacity.clamp(0.0, 1.0);
    }

    // ── Geometry ──────────────────────────────────────────────

    pub fn add_vertex(&mut self, layer: usize, p: DVec2) -> Option<usize> {
        let mesh = self.meshes.get_mut(layer)?;
        let index = mesh.add_point(p);
        tracing::debug!("Layer {layer}: added vertex {index} at ({:.1}, {:.1})", p.x, p.y);
        Some(index)
    }

    pub fn move_vertex(&mut self, layer: usize, index: usize, p: DVec2) -> bool {
        self.meshes
            .get_mut(layer)
            .is_some_and(|mesh| mesh.set_point(index, p))
    }

    pub fn add_triangle(&mut self, layer: usize, i: usize, j: usize, k: usize) -> bool {
        self.meshes
            .get_mut(layer)
            .is_some_and(|mesh| mesh.add_triangle(i, j, k))
    }

    pub fn delete_last_triangle(&mut self, layer: usize) -> Option<TriangleIndices> {
        self.meshes.get_mut(layer)?.delete_last_triangle()
    }

    /// Delete selected vertices/triangles (any layers) and compact indices.
    ///
    /// Returns the layers whose contents changed. Every index previously
    /// taken from those layers is stale afterwards.
    pub fn delete_selection(&mut self, handles: &[Handle]) -> Vec<usize> {
        let affected = reduce::delete_selection(&mut self.meshes, handles);
        debug_assert!(
            affected
                .iter()
                .all(|&l| MeshValidator::new(&self.meshes[l]).validate_all().is_empty()),
            "reindexing left a broken mesh"
        );
        if affected.contains(&self.active) {
            self.pick_buffer.clear();
        }
        affected
    }

    /// Empty every layer
    pub fn clear(&mut self) {
        for mesh in &mut self.meshes {
            mesh.clear();
        }
        self.pick_buffer.clear();
    }

    /// Replace all layers with ingested geometry.
    ///
    /// Everything is validated before any mesh is touched; layers missing
    /// from `geometry` end up empty.
    pub fn load_geometry(&mut self, geometry: &TerrainGeometry) -> Result<(), GeometryError> {
        geometry.validate(&self.config)?;
        for (layer, mesh) in self.meshes.iter_mut().enumerate() {
            match geometry.layer(&self.config.names[layer]) {
                Some(data) => mesh.load(data),
                None => mesh.clear(),
            }
        }
        self.pick_buffer.clear();
        tracing::info!(
            "Loaded {} vertices / {} triangles across {} layers",
            geometry.total_vertices(),
            geometry.total_triangles(),
            geometry.layers.len()
        );
        Ok(())
    }

    /// Snapshot of every layer as serializable geometry
    pub fn export_geometry(&self) -> TerrainGeometry {
        self.config
            .names
            .iter()
            .zip(&self.meshes)
            .fold(TerrainGeometry::new(), |geo, (name, mesh)| {
                geo.with_layer(name.clone(), mesh.to_geometry())
            })
    }

    // ── Triangle picking ──────────────────────────────────────

    pub fn triangle_mode(&self) -> bool {
        self.triangle_mode
    }

    /// Enter or leave triangle-pick mode; leaving drops the buffer.
    pub fn set_triangle_mode(&mut self, on: bool) {
        self.triangle_mode = on;
        if !on {
            self.pick_buffer.clear();
        }
    }

    /// Buffered vertex indices of the active layer, in pick order
    pub fn pick_buffer(&self) -> &[usize] {
        &self.pick_buffer
    }

    /// Feed a vertex click into the triangle-pick buffer.
    pub fn pick_vertex(&mut self, layer: usize, index: usize) -> PickOutcome {
        if !self.triangle_mode || layer != self.active {
            return PickOutcome::Ignored;
        }
        if index >= self.meshes[self.active].vertex_count() {
            return PickOutcome::Ignored;
        }

        if let Some(pos) = self.pick_buffer.iter().position(|&v| v == index) {
            self.pick_buffer.remove(pos);
            return PickOutcome::Removed;
        }

        self.pick_buffer.push(index);
        if self.pick_buffer.len() < 3 {
            return PickOutcome::Added;
        }

        let (i, j, k) = (self.pick_buffer[0], self.pick_buffer[1], self.pick_buffer[2]);
        self.pick_buffer.clear();
        let mesh = &mut self.meshes[self.active];
        if mesh.add_triangle(i, j, k) {
            PickOutcome::Committed {
                triangle: mesh.triangle_count() - 1,
            }
        } else {
            PickOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{LayerGeometry, Point2D};

    fn layers_with_points(n: usize) -> LayerSet {
        let mut layers = LayerSet::default();
        for i in 0..n {
            layers.add_vertex(0, DVec2::new(i as f64 * 10.0, (i % 2) as f64 * 10.0));
        }
        layers
    }

    #[test]
    fn test_default_layers() {
        let layers = LayerSet::default();
        assert_eq!(layers.len(), 11);
        assert_eq!(layers.active_layer(), 0);
        assert_eq!(layers.name(10), Some("Rock"));
        assert!(layers.meshes().iter().all(Mesh::is_empty));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = LayerConfig {
            names: vec!["A".into()],
            colors: vec![],
        };
        assert!(LayerSet::new(config).is_err());
    }

    #[test]
    fn test_set_active_layer_validates() {
        let mut layers = LayerSet::default();
        assert!(layers.set_active_layer(4));
        assert_eq!(layers.active_layer(), 4);
        assert!(!layers.set_active_layer(11));
        assert_eq!(layers.active_layer(), 4);
    }

    #[test]
    fn test_interactivity_and_opacity() {
        let mut layers = LayerSet::default();
        layers.set_active_layer(2);
        assert!(layers.is_interactive(2));
        assert!(!layers.is_interactive(0));
        assert_eq!(layers.opacity(2), 1.0);
        assert_eq!(layers.opacity(3), DEFAULT_INACTIVE_OPACITY);
        assert_eq!((0..layers.len()).filter(|&l| layers.is_interactive(l)).count(), 1);
    }

    #[test]
    fn test_pick_three_commits_triangle() {
        let mut layers = layers_with_points(3);
        layers.set_triangle_mode(true);
        assert_eq!(layers.pick_vertex(0, 0), PickOutcome::Added);
        assert_eq!(layers.pick_vertex(0, 1), PickOutcome::Added);
        assert_eq!(layers.pick_vertex(0, 2), PickOutcome::Committed { triangle: 0 });
        assert!(layers.pick_buffer().is_empty());
        assert_eq!(layers.active_mesh().triangles(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_pick_toggle_is_idempotent() {
        let mut layers = layers_with_points(3);
        layers.set_triangle_mode(true);
        let v = layers.version();
        assert_eq!(layers.pick_vertex(0, 1), PickOutcome::Added);
        assert_eq!(layers.pick_vertex(0, 1), PickOutcome::Removed);
        assert!(layers.pick_buffer().is_empty());
        assert_eq!(layers.version(), v, "toggling must not touch the mesh");
    }

    #[test]
    fn test_pick_order_is_kept() {
        let mut layers = layers_with_points(4);
        layers.set_triangle_mode(true);
        layers.pick_vertex(0, 3);
        layers.pick_vertex(0, 0);
        assert_eq!(layers.pick_vertex(0, 0), PickOutcome::Removed);
        layers.pick_vertex(0, 1);
        assert_eq!(layers.pick_buffer(), &[3, 1]);
        assert_eq!(
            layers.pick_vertex(0, 2),
            PickOutcome::Committed { triangle: 0 }
        );
        assert_eq!(layers.active_mesh().triangles(), &[[3, 1, 2]]);
        assert!(layers.pick_buffer().is_empty());
    }

    #[test]
    fn test_pick_ignored_outside_mode_or_layer() {
        let mut layers = layers_with_points(3);
        assert_eq!(layers.pick_vertex(0, 0), PickOutcome::Ignored);
        layers.set_triangle_mode(true);
        assert_eq!(layers.pick_vertex(1, 0), PickOutcome::Ignored);
        assert_eq!(layers.pick_vertex(0, 42), PickOutcome::Ignored);
        assert!(layers.pick_buffer().is_empty());
    }

    #[test]
    fn test_switching_layer_clears_buffer() {
        let mut layers = layers_with_points(3);
        layers.set_triangle_mode(true);
        layers.pick_vertex(0, 0);
        layers.pick_vertex(0, 1);
        let v = layers.version();
        layers.set_active_layer(1);
        assert!(layers.pick_buffer().is_empty());
        assert_eq!(layers.version(), v);
        assert!(layers.triangle_mode());
    }

    #[test]
    fn test_leaving_triangle_mode_clears_buffer() {
        let mut layers = layers_with_points(3);
        layers.set_triangle_mode(true);
        layers.pick_vertex(0, 2);
        layers.set_triangle_mode(false);
        assert!(layers.pick_buffer().is_empty());
        assert!(layers.active_mesh().triangles().is_empty());
    }

    #[test]
    fn test_delete_selection_clears_buffer_on_active_layer() {
        let mut layers = layers_with_points(4);
        layers.set_triangle_mode(true);
        layers.pick_vertex(0, 3);
        let affected = layers.delete_selection(&[Handle::vertex(0, 0)]);
        assert_eq!(affected, vec![0]);
        assert!(layers.pick_buffer().is_empty());
        assert_eq!(layers.active_mesh().vertex_count(), 3);
    }

    #[test]
    fn test_load_and_export_geometry() {
        let geometry = TerrainGeometry::new().with_layer(
            "Grass",
            LayerGeometry {
                vertices: vec![Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0), Point2D::new(0.0, 5.0)],
                triangles: vec![[0, 1, 2]],
            },
        );
        let mut layers = layers_with_points(2);
        layers.load_geometry(&geometry).unwrap();

        assert!(layers.mesh(0).unwrap().is_empty(), "unnamed layers are cleared");
        assert_eq!(layers.mesh(5).unwrap().triangles(), &[[0, 1, 2]]);

        let exported = layers.export_geometry();
        assert_eq!(exported.layers.len(), 11);
        assert_eq!(exported.layer("Grass"), geometry.layer("Grass"));
    }

    #[test]
    fn test_load_geometry_is_all_or_nothing() {
        let mut layers = layers_with_points(3);
        let bad = TerrainGeometry::new()
            .with_layer(
                "Sand",
                LayerGeometry {
                    vertices: vec![Point2D::new(1.0, 1.0)],
                    triangles: vec![],
                },
            )
            .with_layer(
                "Snow",
                LayerGeometry {
                    vertices: vec![Point2D::new(1.0, 1.0)],
                    triangles: vec![[0, 1, 2]],
                },
            );
        let v = layers.version();
        assert!(layers.load_geometry(&bad).is_err());
        assert_eq!(layers.version(), v);
        assert_eq!(layers.active_mesh().vertex_count(), 3);
    }
}
