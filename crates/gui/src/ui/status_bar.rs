use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let layers = &state.layers;
        let active = layers.active_layer();
        let mesh = layers.active_mesh();
        ui.weak(format!(
            "{}: {}",
            t("status.layer"),
            layers.name(active).unwrap_or("?")
        ));
        ui.separator();
        ui.weak(format!("{}: {}", t("status.vertices"), mesh.vertex_count()));
        ui.weak(format!("{}: {}", t("status.triangles"), mesh.triangle_count()));

        ui.separator();

        if layers.triangle_mode() {
            let picked = layers.pick_buffer().len();
            ui.colored_label(
                egui::Color32::YELLOW,
                format!("{} ({picked}/3)", t("hint.pick")),
            );
            ui.separator();
            ui.weak(t("hint.esc"));
        } else if state.tools.add_vertex {
            ui.colored_label(egui::Color32::YELLOW, t("hint.add_vertex"));
            ui.separator();
            ui.weak(t("hint.esc"));
        } else {
            let sel = state.selection.count();
            if sel > 0 {
                ui.label(format!("{}: {sel}", t("status.selected")));
            } else {
                ui.weak(t("status.ready"));
            }
        }

        // Right-aligned cursor position
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(p) = state.tools.cursor_world {
                ui.monospace(format!("{:>7.1} {:>7.1}", p.x, p.y));
            }
        });
    });
}
