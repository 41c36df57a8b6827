//! Indexed triangle mesh for a single terrain layer.
//!
//! A vertex has no identity beyond its position in [`Mesh::points`], and a
//! triangle none beyond its position in [`Mesh::triangles`]. Deleting anything
//! compacts both sequences (see [`super::reduce`]), so **every index into a
//! mesh is invalidated by any deletion on that mesh**. Callers that cache an
//! index must compare [`Mesh::version`] against the value they saw when the
//! index was taken and re-derive it when the version moved.

use glam::DVec2;
use shared::{LayerGeometry, Point2D, TriangleIndices};

/// Vertex list + triangle index list of one layer
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    points: Vec<DVec2>,
    triangles: Vec<TriangleIndices>,
    /// Bumped after every completed mutation
    version: u64,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from ingested layer data.
    ///
    /// Triangles that would break the index invariant are dropped.
    pub fn from_geometry(geometry: &LayerGeometry) -> Self {
        let mut mesh = Self::new();
        mesh.load(geometry);
        mesh.version = 0;
        mesh
    }

    /// Export as serializable layer data
    pub fn to_geometry(&self) -> LayerGeometry {
        LayerGeometry {
            vertices: self.points.iter().map(|p| Point2D::new(p.x, p.y)).collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Current mesh version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    pub fn point(&self, index: usize) -> Option<DVec2> {
        self.points.get(index).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.triangles.is_empty()
    }

    /// Corner positions of a triangle
    pub fn triangle_points(&self, triangle: usize) -> Option<[DVec2; 3]> {
        let [i, j, k] = *self.triangles.get(triangle)?;
        Some([self.point(i)?, self.point(j)?, self.point(k)?])
    }

    /// Three pairwise distinct, in-range indices
    pub fn is_valid_triangle(&self, [i, j, k]: TriangleIndices) -> bool {
        let n = self.points.len();
        i != j && j != k && i != k && i < n && j < n && k < n
    }

    // ── Mutation ──────────────────────────────────────────────

    /// Append a vertex and return its index. Coincident points are allowed.
    pub fn add_point(&mut self, p: DVec2) -> usize {
        self.points.push(p);
        self.notify_mutated();
        self.points.len() - 1
    }

    /// Move a vertex in place. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, p: DVec2) -> bool {
        let Some(slot) = self.points.get_mut(index) else {
            tracing::debug!("set_point: index {index} out of range ({})", self.points.len());
            return false;
        };
        *slot = p;
        self.notify_mutated();
        true
    }

    /// Append a triangle. Repeated or out-of-range indices are a silent no-op.
    pub fn add_triangle(&mut self, i: usize, j: usize, k: usize) -> bool {
        if !self.is_valid_triangle([i, j, k]) {
            tracing::debug!(
                "add_triangle: rejected ({i}, {j}, {k}) with {} vertices",
                self.points.len()
            );
            return false;
        }
        self.triangles.push([i, j, k]);
        self.notify_mutated();
        true
    }

    /// Remove the most recently added triangle, if any
    pub fn delete_last_triangle(&mut self) -> Option<TriangleIndices> {
        let removed = self.triangles.pop()?;
        self.notify_mutated();
        Some(removed)
    }

    /// Empty both sequences
    pub fn clear(&mut self) {
        self.points.clear();
        self.triangles.clear();
        self.notify_mutated();
    }

    /// Replace contents with ingested layer data (one version bump).
    pub fn load(&mut self, geometry: &LayerGeometry) {
        self.points = geometry.vertices.iter().map(|p| DVec2::new(p.x, p.y)).collect();
        self.triangles.clear();
        for &tri in &geometry.triangles {
            if self.is_valid_triangle(tri) {
                self.triangles.push(tri);
            } else {
                tracing::warn!("Dropping invalid ingested triangle {tri:?}");
            }
        }
        self.notify_mutated();
    }

    /// Swap in already-compacted sequences in one step.
    pub(crate) fn replace(&mut self, points: Vec<DVec2>, triangles: Vec<TriangleIndices>) {
        self.points = points;
        self.triangles = triangles;
        debug_assert!(
            self.triangles.iter().all(|&t| self.is_valid_triangle(t)),
            "replace() must receive a consistent mesh"
        );
        self.notify_mutated();
    }

    fn notify_mutated(&mut self) {
        self.version += 1;
    }
}
