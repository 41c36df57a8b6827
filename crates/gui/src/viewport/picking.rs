use glam::DVec2;

use super::camera::ViewRect;
use crate::state::mesh::Mesh;

/// Result of picking a vertex
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexHit {
    pub index: usize,
    /// Distance from the query point (world units)
    pub distance: f64,
}

/// Nearest vertex within `radius` (world units) of `p`.
/// Ties go to the later vertex, which is drawn on top.
pub fn nearest_vertex(mesh: &Mesh, p: DVec2, radius: f64) -> Option<VertexHit> {
    let mut best: Option<VertexHit> = None;

    for (index, v) in mesh.points().iter().enumerate() {
        let distance = v.distance(p);
        if distance > radius {
            continue;
        }
        if best.is_none_or(|b| distance <= b.distance) {
            best = Some(VertexHit { index, distance });
        }
    }

    best
}

/// Twice the signed area of (a, b, c); positive when counter-clockwise
fn cross(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Point-in-triangle test, edges inclusive. Zero-area triangles contain nothing.
pub fn point_in_triangle(p: DVec2, [a, b, c]: [DVec2; 3]) -> bool {
    let area = cross(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return false;
    }
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    if area > 0.0 {
        d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
    } else {
        d1 <= 0.0 && d2 <= 0.0 && d3 <= 0.0
    }
}

/// Topmost (last drawn) triangle containing `p`
pub fn triangle_at(mesh: &Mesh, p: DVec2) -> Option<usize> {
    (0..mesh.triangle_count())
        .rev()
        .find(|&t| mesh.triangle_points(t).is_some_and(|tri| point_in_triangle(p, tri)))
}

/// Vertices inside `rect` (rubber-band selection)
pub fn vertices_in_rect(mesh: &Mesh, rect: &ViewRect) -> Vec<usize> {
    mesh.points()
        .iter()
        .enumerate()
        .filter(|(_, v)| rect.contains(**v))
        .map(|(i, _)| i)
        .collect()
}

fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    ((d1 > 0.0) != (d2 > 0.0) && d1 != 0.0 && d2 != 0.0)
        && ((d3 > 0.0) != (d4 > 0.0) && d3 != 0.0 && d4 != 0.0)
}

/// Whether a triangle overlaps `rect` at all
pub fn triangle_intersects_rect(tri: [DVec2; 3], rect: &ViewRect) -> bool {
    if tri.iter().any(|v| rect.contains(*v)) {
        return true;
    }
    let min = rect.min;
    let max = rect.max();
    let corners = [min, DVec2::new(max.x, min.y), max, DVec2::new(min.x, max.y)];
    if corners.iter().any(|c| point_in_triangle(*c, tri)) {
        return true;
    }
    (0..3).any(|i| {
        let (a, b) = (tri[i], tri[(i + 1) % 3]);
        (0..4).any(|j| segments_intersect(a, b, corners[j], corners[(j + 1) % 4]))
    })
}

/// Triangles overlapping `rect`
pub fn triangles_in_rect(mesh: &Mesh, rect: &ViewRect) -> Vec<usize> {
    (0..mesh.triangle_count())
        .filter(|&t| {
            mesh.triangle_points(t)
                .is_some_and(|tri| triangle_intersects_rect(tri, rect))
        })
        .collect()
}
