//! Factory functions for creating test data.
//!
//! Provides helpers to construct `LayerGeometry` and `TerrainGeometry`
//! values used in tests and by the JSON command interface.

use shared::{LayerGeometry, Point2D, TerrainGeometry};

// ── Layer factories ─────────────────────────────────────────────

/// The three-vertex scenario triangle: (0,0), (200,0), (120,150).
pub fn triangle_layer() -> LayerGeometry {
    LayerGeometry {
        vertices: vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(200.0, 0.0),
            Point2D::new(120.0, 150.0),
        ],
        triangles: vec![[0, 1, 2]],
    }
}

/// Axis-aligned square centered at `center`, split along its diagonal.
pub fn square_layer(center: [f64; 2], size: f64) -> LayerGeometry {
    let h = size / 2.0;
    let [cx, cy] = center;
    LayerGeometry {
        vertices: vec![
            Point2D::new(cx - h, cy - h),
            Point2D::new(cx + h, cy - h),
            Point2D::new(cx + h, cy + h),
            Point2D::new(cx - h, cy + h),
        ],
        triangles: vec![[0, 1, 2], [0, 2, 3]],
    }
}

/// Fan of `n` triangles around a hub vertex at index 0.
pub fn fan_layer(n: usize, radius: f64) -> LayerGeometry {
    let n = n.max(1);
    let mut vertices = vec![Point2D::new(0.0, 0.0)];
    for i in 0..=n {
        let a = std::f64::consts::PI * i as f64 / n as f64;
        vertices.push(Point2D::new(radius * a.cos(), radius * a.sin()));
    }
    let triangles = (1..=n).map(|i| [0, i, i + 1]).collect();
    LayerGeometry {
        vertices,
        triangles,
    }
}

// ── Terrain factories ──────────────────────────────────────────

/// Small island: sea fan, land square and a rock triangle.
pub fn terrain_fixture() -> TerrainGeometry {
    TerrainGeometry::new()
        .with_layer("Sea-0", fan_layer(6, 400.0))
        .with_layer("Land", square_layer([0.0, 0.0], 300.0))
        .with_layer("Rock", triangle_layer())
}

/// Terrain mapping with a single named layer.
pub fn single_layer(name: &str, layer: LayerGeometry) -> TerrainGeometry {
    TerrainGeometry::new().with_layer(name, layer)
}
