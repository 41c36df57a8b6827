use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{GeometryError, LayerConfig};

/// Three vertex indices into the owning layer's vertex list.
pub type TriangleIndices = [usize; 3];

/// 2D world-space point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

/// Vertices and triangles of a single terrain layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerGeometry {
    #[serde(default)]
    pub vertices: Vec<Point2D>,
    #[serde(default)]
    pub triangles: Vec<TriangleIndices>,
}

impl LayerGeometry {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Check that every triangle is well-formed and every vertex is finite.
    pub fn validate(&self, layer: &str) -> Result<(), GeometryError> {
        if let Some(vertex) = self.vertices.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteVertex {
                layer: layer.to_string(),
                vertex,
            });
        }

        let count = self.vertices.len();
        for (triangle, &[i, j, k]) in self.triangles.iter().enumerate() {
            if let Some(&vertex) = [i, j, k].iter().find(|&&v| v >= count) {
                return Err(GeometryError::InvalidVertexIndex {
                    layer: layer.to_string(),
                    triangle,
                    vertex,
                });
            }
            if i == j || j == k || i == k {
                return Err(GeometryError::DegenerateTriangle {
                    layer: layer.to_string(),
                    triangle,
                });
            }
        }
        Ok(())
    }
}

/// Pre-parsed terrain geometry: layer name -> layer contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainGeometry {
    #[serde(default)]
    pub layers: BTreeMap<String, LayerGeometry>,
}

impl TerrainGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures and tests.
    pub fn with_layer(mut self, name: impl Into<String>, layer: LayerGeometry) -> Self {
        self.layers.insert(name.into(), layer);
        self
    }

    pub fn layer(&self, name: &str) -> Option<&LayerGeometry> {
        self.layers.get(name)
    }

    /// Validate every layer against the given configuration.
    pub fn validate(&self, config: &LayerConfig) -> Result<(), GeometryError> {
        for (name, layer) in &self.layers {
            if config.index_of(name).is_none() {
                return Err(GeometryError::UnknownLayer { name: name.clone() });
            }
            layer.validate(name)?;
        }
        Ok(())
    }

    pub fn total_vertices(&self) -> usize {
        self.layers.values().map(|l| l.vertices.len()).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.layers.values().map(|l| l.triangles.len()).sum()
    }
}
