//! Layer panel - the terrain layer stack with per-layer counts

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("layers.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("({})", state.layers.len()));
        });
    });
    ui.separator();

    let active = state.layers.active_layer();
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .id_salt("layer_panel_scroll")
        .show(ui, |ui| {
            // topmost layer first, like the render stack seen from above
            for layer in (0..state.layers.len()).rev() {
                let Some(mesh) = state.layers.mesh(layer) else {
                    continue;
                };
                let name = state.layers.name(layer).unwrap_or("?");
                let counts = if mesh.is_empty() {
                    t("layers.empty").to_string()
                } else {
                    format!(
                        "{} {} · {} {}",
                        mesh.vertex_count(),
                        t("layers.vertices"),
                        mesh.triangle_count(),
                        t("layers.triangles")
                    )
                };

                ui.horizontal(|ui| {
                    swatch(ui, state.layers.color(layer), state.layers.opacity(layer));
                    if ui.selectable_label(layer == active, name).clicked() {
                        clicked = Some(layer);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(counts);
                    });
                });
            }
        });

    if let Some(layer) = clicked {
        state.set_active_layer(layer);
    }
}

/// Small filled square in the layer's display color
fn swatch(ui: &mut Ui, rgb: [u8; 3], opacity: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let fill = egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha.max(60));
    ui.painter().rect_filled(rect, 2.0, fill);
    ui.painter().rect_stroke(
        rect,
        2.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])),
        egui::StrokeKind::Inside,
    );
}
