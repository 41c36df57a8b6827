//! Mesh validation utilities.
//!
//! `MeshValidator` checks the invariants every layer mesh must hold:
//! in-range indices, no repeated index within a triangle, finite positions.

use crate::state::layers::LayerSet;
use crate::state::mesh::Mesh;

/// Validator for `Mesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a Mesh,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let n = self.vertex_count();
        self.mesh.triangles().iter().flatten().all(|&i| i < n)
    }

    /// Triangles that repeat an index
    pub fn degenerate_triangles(&self) -> Vec<usize> {
        self.mesh
            .triangles()
            .iter()
            .enumerate()
            .filter(|(_, [i, j, k])| i == j || j == k || i == k)
            .map(|(t, _)| t)
            .collect()
    }

    pub fn has_degenerate_triangles(&self) -> bool {
        !self.degenerate_triangles().is_empty()
    }

    /// Check that every vertex position is finite.
    pub fn are_points_finite(&self) -> bool {
        self.mesh.points().iter().all(|p| p.is_finite())
    }

    /// Check that the mesh spans exactly `expected` (width, height).
    pub fn assert_extent_approx(&self, expected: [f64; 2], tolerance: f64) -> bool {
        let points = self.mesh.points();
        let Some(first) = points.first() else {
            return false;
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let size = max - min;
        (size.x - expected[0]).abs() < tolerance && (size.y - expected[1]).abs() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_indices_in_range() {
            let n = self.vertex_count();
            let out_of_range: Vec<_> = self
                .mesh
                .triangles()
                .iter()
                .flatten()
                .filter(|&&i| i >= n)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                n, out_of_range
            ));
        }

        let degenerate = self.degenerate_triangles();
        if !degenerate.is_empty() {
            errors.push(format!("Degenerate triangles: {:?}", degenerate));
        }

        if !self.are_points_finite() {
            errors.push("Some vertex positions are not finite".to_string());
        }

        errors
    }
}

/// Validate every layer; messages are prefixed with the layer name.
pub fn validate_layers(layers: &LayerSet) -> Vec<String> {
    layers
        .meshes()
        .iter()
        .enumerate()
        .flat_map(|(i, mesh)| {
            let name = layers.name(i).unwrap_or("?").to_string();
            MeshValidator::new(mesh)
                .validate_all()
                .into_iter()
                .map(move |e| format!("{name}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn simple_triangle() -> Mesh {
        let mut m = Mesh::new();
        m.add_point(DVec2::new(0.0, 0.0));
        m.add_point(DVec2::new(10.0, 0.0));
        m.add_point(DVec2::new(0.0, 20.0));
        m.add_triangle(0, 1, 2);
        m
    }

    #[test]
    fn test_counts() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.are_indices_in_range());
        assert!(!v.has_degenerate_triangles());
        assert!(v.are_points_finite());
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_extent() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.assert_extent_approx([10.0, 20.0], 1e-9));
        assert!(!v.assert_extent_approx([20.0, 10.0], 1e-9));
        assert!(!MeshValidator::new(&Mesh::new()).assert_extent_approx([0.0, 0.0], 1.0));
    }

    #[test]
    fn test_non_finite_point() {
        let mut mesh = simple_triangle();
        mesh.set_point(1, DVec2::new(f64::NAN, 0.0));
        let errors = MeshValidator::new(&mesh).validate_all();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not finite"));
    }

    #[test]
    fn test_validate_layers() {
        let mut layers = LayerSet::default();
        for p in [DVec2::ZERO, DVec2::X, DVec2::Y] {
            layers.add_vertex(6, p);
        }
        layers.add_triangle(6, 0, 1, 2);
        assert!(validate_layers(&layers).is_empty());

        layers.move_vertex(6, 0, DVec2::new(f64::INFINITY, 0.0));
        let errors = validate_layers(&layers);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Sand: "));
    }
}
