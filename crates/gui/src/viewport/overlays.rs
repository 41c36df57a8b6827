//! Viewport overlay drawing (ghost vertex, triangle pick preview, rubber band)

use egui::{Color32, Painter, Shape, Stroke};
use glam::DVec2;

use crate::i18n::t;
use crate::state::AppState;

use super::camera::{Camera, ViewRect};
use super::renderer::{egui_rect, to_pos2, SELECTION_COLOR};

const PREVIEW_COLOR: Color32 = Color32::from_rgb(255, 200, 50);

/// Snapped position where a click would place the next vertex
pub fn draw_ghost_vertex(painter: &Painter, camera: &Camera, state: &AppState) {
    if !state.tools.add_vertex || state.tools.drag.is_some() {
        return;
    }
    let Some(cursor) = state.tools.cursor_world else {
        return;
    };
    let p = to_pos2(camera.map_to_screen(state.snap(cursor)));
    let radius = state.settings.ui.vertex_radius;
    painter.circle_stroke(p, radius, Stroke::new(1.5, PREVIEW_COLOR.gamma_multiply(0.8)));
    painter.circle_filled(p, 1.5, PREVIEW_COLOR);
}

/// Buffered triangle vertices plus rubber lines to the cursor
pub fn draw_pick_preview(painter: &Painter, camera: &Camera, state: &AppState) {
    let layers = &state.layers;
    if !layers.triangle_mode() {
        return;
    }
    let mesh = layers.active_mesh();
    let mut pts: Vec<DVec2> = layers
        .pick_buffer()
        .iter()
        .filter_map(|&i| mesh.point(i))
        .collect();
    if pts.is_empty() {
        return;
    }

    let marker = state.settings.ui.vertex_radius + 3.0;
    for p in &pts {
        painter.circle_stroke(
            to_pos2(camera.map_to_screen(*p)),
            marker,
            Stroke::new(2.0, PREVIEW_COLOR),
        );
    }

    if let Some(cursor) = state.tools.cursor_world {
        pts.push(cursor);
    }
    let screen: Vec<_> = pts.iter().map(|p| to_pos2(camera.map_to_screen(*p))).collect();
    let stroke = Stroke::new(1.5, PREVIEW_COLOR.gamma_multiply(0.8));
    if screen.len() == 3 {
        painter.add(Shape::convex_polygon(
            screen.clone(),
            PREVIEW_COLOR.gamma_multiply(0.15),
            Stroke::NONE,
        ));
        painter.line_segment([screen[2], screen[0]], stroke);
    }
    for pair in screen.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke);
    }
}

/// Rubber-band selection rectangle
pub fn draw_band(painter: &Painter, camera: &Camera, start: DVec2, current: DVec2) {
    let world = ViewRect::from_points(start, current);
    let screen = ViewRect::from_points(
        camera.map_to_screen(world.min),
        camera.map_to_screen(world.max()),
    );
    let rect = egui_rect(&screen);
    painter.rect_filled(rect, 0.0, SELECTION_COLOR.gamma_multiply(0.1));
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, SELECTION_COLOR),
        egui::StrokeKind::Inside,
    );
}

/// Zoom and center readout in the top-right corner
pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &Camera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 150.0, rect.top() + 4.0),
        egui::vec2(146.0, 32.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Zoom: {:.3}\nCenter: {:.0}, {:.0}",
            camera.zoom(), camera.center.x, camera.center.y,
        ),
        egui::FontId::monospace(10.0),
        Color32::from_rgb(160, 160, 170),
    );
}

/// Navigation hint shown while every layer is empty
pub fn draw_nav_hint(painter: &Painter, rect: egui::Rect) {
    painter.text(
        egui::pos2(rect.center().x, rect.bottom() - 20.0),
        egui::Align2::CENTER_BOTTOM,
        t("hint.nav"),
        egui::FontId::proportional(11.0),
        Color32::from_rgb(100, 100, 110),
    );
}
