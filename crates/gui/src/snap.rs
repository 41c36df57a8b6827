//! Grid snapping for placed vertices.

use glam::DVec2;

/// Editable world area is the square [-500, 500] on both axes
pub const WORLD_HALF_EXTENT: f64 = 500.0;

/// Default snap cell size in world units
pub const DEFAULT_SNAP_CELL: f64 = 5.0;

/// Largest multiple of `cell` that still lies inside the world square.
fn grid_limit(cell: f64) -> f64 {
    (WORLD_HALF_EXTENT / cell).floor() * cell
}

/// Round `value` to the nearest multiple of `cell` (ties toward +inf),
/// then clamp into the world square.
///
/// The clamp bound is the largest multiple of `cell` inside the world
/// square (`floor(500 / cell) * cell`, e.g. 497 for a cell of 7) rather
/// than 500 itself, so snapping an already snapped value returns it
/// unchanged. Cells that divide 500 clamp to exactly ±500. A non-positive
/// or non-finite `cell` only clamps, to ±500. NaN maps to 0.
pub fn snap_axis(value: f64, cell: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if !(cell.is_finite() && cell > 0.0) {
        return value.clamp(-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT);
    }
    let limit = grid_limit(cell);
    let snapped = cell * ((value + cell / 2.0) / cell).floor();
    snapped.clamp(-limit, limit)
}

/// Snap both coordinates of a world point.
pub fn snap_point(p: DVec2, cell: f64) -> DVec2 {
    DVec2::new(snap_axis(p.x, cell), snap_axis(p.y, cell))
}

/// Clamp without rounding (used when snapping is switched off).
pub fn clamp_point(p: DVec2) -> DVec2 {
    DVec2::new(snap_axis(p.x, 0.0), snap_axis(p.y, 0.0))
}
