//! Data exchanged between the terrain editor core and its collaborators.
//!
//! Geometry arrives here already parsed (the binary terrain asset reader
//! lives outside this workspace) and is validated before the editor takes
//! ownership of it.

mod error;
mod geometry;
mod layers;

pub use error::GeometryError;
pub use geometry::{LayerGeometry, Point2D, TerrainGeometry, TriangleIndices};
pub use layers::{LayerConfig, TERRAIN_LAYER_COLORS, TERRAIN_LAYER_NAMES};
