//! egui painting of layer meshes, grid and world border

use egui::{Color32, Painter, Pos2, Shape, Stroke};
use glam::DVec2;

use crate::snap::WORLD_HALF_EXTENT;
use crate::state::{Mesh, SelectionState};

use super::camera::{Camera, ViewRect};

pub const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 220, 255);
pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(28, 30, 34);
const GRID_COLOR: Color32 = Color32::from_rgb(48, 50, 56);
const AXIS_COLOR: Color32 = Color32::from_rgb(70, 74, 84);
const BORDER_COLOR: Color32 = Color32::from_rgb(200, 90, 70);

pub fn to_pos2(p: DVec2) -> Pos2 {
    egui::pos2(p.x as f32, p.y as f32)
}

pub fn to_dvec2(p: Pos2) -> DVec2 {
    DVec2::new(f64::from(p.x), f64::from(p.y))
}

pub fn view_rect(rect: egui::Rect) -> ViewRect {
    ViewRect::new(
        f64::from(rect.min.x),
        f64::from(rect.min.y),
        f64::from(rect.width()),
        f64::from(rect.height()),
    )
}

pub fn egui_rect(rect: &ViewRect) -> egui::Rect {
    egui::Rect::from_min_max(to_pos2(rect.min), to_pos2(rect.max()))
}

/// Layer color with an opacity multiplier
pub fn layer_color(rgb: [u8; 3], opacity: f32) -> Color32 {
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], a)
}

/// Background grid lines every `step` world units inside the visible area
pub fn paint_grid(painter: &Painter, camera: &Camera, step: f64) {
    // too dense to be useful below a few pixels per line
    if camera.scale_length(step) < 4.0 {
        return;
    }
    let visible = camera.visible_world_rect();
    let min = visible.min.max(DVec2::splat(-WORLD_HALF_EXTENT));
    let max = visible.max().min(DVec2::splat(WORLD_HALF_EXTENT));
    if min.x > max.x || min.y > max.y {
        return;
    }

    let line = |a: DVec2, b: DVec2, on_axis: bool| {
        let color = if on_axis { AXIS_COLOR } else { GRID_COLOR };
        painter.line_segment(
            [to_pos2(camera.map_to_screen(a)), to_pos2(camera.map_to_screen(b))],
            Stroke::new(1.0, color),
        );
    };

    let mut x = (min.x / step).ceil() * step;
    while x <= max.x {
        line(DVec2::new(x, min.y), DVec2::new(x, max.y), x == 0.0);
        x += step;
    }
    let mut y = (min.y / step).ceil() * step;
    while y <= max.y {
        line(DVec2::new(min.x, y), DVec2::new(max.x, y), y == 0.0);
        y += step;
    }
}

/// Dashed rectangle around the editable world square
pub fn paint_world_border(painter: &Painter, camera: &Camera) {
    let h = WORLD_HALF_EXTENT;
    let corners = [
        DVec2::new(-h, -h),
        DVec2::new(h, -h),
        DVec2::new(h, h),
        DVec2::new(-h, h),
        DVec2::new(-h, -h),
    ]
    .map(|p| to_pos2(camera.map_to_screen(p)));
    painter.extend(Shape::dashed_line(
        &corners,
        Stroke::new(1.5, BORDER_COLOR),
        8.0,
        5.0,
    ));
}

/// Display options for one layer mesh
pub struct MeshStyle {
    pub layer: usize,
    pub color: [u8; 3],
    pub opacity: f32,
    /// Draw vertex markers and selection highlights
    pub interactive: bool,
    pub vertex_radius: f32,
}

/// Fill and outline every triangle, then vertices when interactive
pub fn paint_mesh(
    painter: &Painter,
    camera: &Camera,
    mesh: &Mesh,
    style: &MeshStyle,
    selection: Option<&SelectionState>,
) {
    let fill = layer_color(style.color, style.opacity * 0.75);
    let edge = Stroke::new(1.0, layer_color(style.color, style.opacity));
    let screen: Vec<Pos2> = mesh
        .points()
        .iter()
        .map(|p| to_pos2(camera.map_to_screen(*p)))
        .collect();

    for (t, &[i, j, k]) in mesh.triangles().iter().enumerate() {
        let (Some(a), Some(b), Some(c)) = (screen.get(i), screen.get(j), screen.get(k)) else {
            continue;
        };
        let selected = style.interactive
            && selection.is_some_and(|s| s.is_triangle_selected(style.layer, t));
        let (fill, stroke) = if selected {
            (
                SELECTION_COLOR.gamma_multiply(0.35),
                Stroke::new(2.0, SELECTION_COLOR),
            )
        } else {
            (fill, edge)
        };
        painter.add(Shape::convex_polygon(vec![*a, *b, *c], fill, stroke));
    }

    if !style.interactive {
        return;
    }
    let vertex_color = layer_color(style.color, 1.0);
    for (i, p) in screen.iter().enumerate() {
        let selected = selection.is_some_and(|s| s.is_vertex_selected(style.layer, i));
        if selected {
            painter.circle_filled(*p, style.vertex_radius, SELECTION_COLOR);
        } else {
            painter.circle(
                *p,
                style.vertex_radius,
                vertex_color,
                Stroke::new(1.0, Color32::BLACK),
            );
        }
    }
}
