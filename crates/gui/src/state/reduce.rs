//! Deletion by selection and the index compaction that follows it.
//!
//! This is the only place vertex and triangle indices are renumbered. The
//! whole plan is computed from immutable meshes first and only then swapped
//! in, one [`Mesh::replace`] per affected layer, so no caller can observe a
//! mesh whose vertices are gone but whose triangles still point at them.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;
use shared::TriangleIndices;

use super::mesh::Mesh;
use super::selection::Handle;

/// Compacted replacement contents for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRebuild {
    pub layer: usize,
    pub points: Vec<DVec2>,
    pub triangles: Vec<TriangleIndices>,
}

#[derive(Debug, Default)]
struct Removal {
    vertices: BTreeSet<usize>,
    triangles: BTreeSet<usize>,
}

/// Triangles of `mesh` that reference any of `vertices`
pub fn incident_triangles(mesh: &Mesh, vertices: &BTreeSet<usize>) -> BTreeSet<usize> {
    if vertices.is_empty() {
        return BTreeSet::new();
    }
    mesh.triangles()
        .iter()
        .enumerate()
        .filter(|(_, tri)| tri.iter().any(|v| vertices.contains(v)))
        .map(|(t, _)| t)
        .collect()
}

/// Drop `vertices` and `triangles` from `mesh`, renumbering survivors.
///
/// Surviving vertices keep their relative order. A surviving triangle that
/// still references a dropped vertex is discarded rather than left dangling.
pub fn compact(
    mesh: &Mesh,
    vertices: &BTreeSet<usize>,
    triangles: &BTreeSet<usize>,
) -> (Vec<DVec2>, Vec<TriangleIndices>) {
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(mesh.vertex_count());
    let mut points = Vec::with_capacity(mesh.vertex_count().saturating_sub(vertices.len()));
    for (old, p) in mesh.points().iter().enumerate() {
        if vertices.contains(&old) {
            remap.push(None);
        } else {
            remap.push(Some(points.len()));
            points.push(*p);
        }
    }

    let lookup = |v: usize| remap.get(v).copied().flatten();
    let new_triangles = mesh
        .triangles()
        .iter()
        .enumerate()
        .filter(|(t, _)| !triangles.contains(t))
        .filter_map(|(_, &[i, j, k])| Some([lookup(i)?, lookup(j)?, lookup(k)?]))
        .collect();

    (points, new_triangles)
}

/// Compute the replacement contents of every layer touched by `handles`.
///
/// Selected vertices always take their incident triangles with them. Layers
/// whose contents would not change (empty or stale selection) are omitted.
pub fn plan_deletion(meshes: &[Mesh], handles: &[Handle]) -> Vec<LayerRebuild> {
    let mut removals: BTreeMap<usize, Removal> = BTreeMap::new();
    for handle in handles {
        match *handle {
            Handle::Vertex { layer, index } => {
                removals.entry(layer).or_default().vertices.insert(index);
            }
            Handle::Triangle { layer, index } => {
                removals.entry(layer).or_default().triangles.insert(index);
            }
        }
    }

    removals
        .into_iter()
        .filter_map(|(layer, mut removal)| {
            let Some(mesh) = meshes.get(layer) else {
                tracing::debug!("plan_deletion: ignoring handles for unknown layer {layer}");
                return None;
            };
            removal
                .triangles
                .extend(incident_triangles(mesh, &removal.vertices));

            let (points, triangles) = compact(mesh, &removal.vertices, &removal.triangles);
            if points.len() == mesh.vertex_count() && triangles.len() == mesh.triangle_count() {
                return None;
            }
            Some(LayerRebuild {
                layer,
                points,
                triangles,
            })
        })
        .collect()
}

/// Swap planned contents into the meshes; returns the layers that changed.
pub fn apply_rebuilds(meshes: &mut [Mesh], rebuilds: Vec<LayerRebuild>) -> Vec<usize> {
    let mut affected = Vec::with_capacity(rebuilds.len());
    for rebuild in rebuilds {
        if let Some(mesh) = meshes.get_mut(rebuild.layer) {
            tracing::debug!(
                "Layer {}: {} -> {} vertices, {} -> {} triangles",
                rebuild.layer,
                mesh.vertex_count(),
                rebuild.points.len(),
                mesh.triangle_count(),
                rebuild.triangles.len()
            );
            mesh.replace(rebuild.points, rebuild.triangles);
            affected.push(rebuild.layer);
        }
    }
    affected
}

/// Delete the selected geometry from `meshes` in one transaction per layer.
pub fn delete_selection(meshes: &mut [Mesh], handles: &[Handle]) -> Vec<usize> {
    if handles.is_empty() {
        return Vec::new();
    }
    let rebuilds = plan_deletion(meshes, handles);
    apply_rebuilds(meshes, rebuilds)
}
