//! Toolbar actions and UI

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

// ── Public actions (callable from menus and keyboard too) ────

pub fn action_toggle_add_vertex(state: &mut AppState) {
    let on = !state.tools.add_vertex;
    state.set_add_vertex_mode(on);
}

pub fn action_toggle_triangle(state: &mut AppState) {
    let on = state.toggle_triangle_mode();
    tracing::debug!("Triangle mode: {on}");
}

pub fn action_delete_last_triangle(state: &mut AppState) {
    match state.delete_last_triangle() {
        Some(tri) => tracing::info!("Removed triangle {tri:?}"),
        None => tracing::debug!("Active layer has no triangles"),
    }
}

pub fn action_delete_selection(state: &mut AppState) {
    state.delete_selection();
}

pub fn action_reset_view(state: &mut AppState) {
    state.view_reset_requested = true;
}

/// Step the active layer up or down the stack
pub fn action_cycle_layer(state: &mut AppState, forward: bool) {
    let n = state.layers.len();
    let current = state.layers.active_layer();
    let next = if forward {
        (current + 1) % n
    } else {
        (current + n - 1) % n
    };
    state.set_active_layer(next);
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // ── Active layer ──
        ui.label(t("tb.layer"));
        let active = state.layers.active_layer();
        let mut chosen = active;
        egui::ComboBox::from_id_salt("active_layer_combo")
            .selected_text(state.layers.name(active).unwrap_or("?"))
            .show_ui(ui, |ui| {
                for layer in 0..state.layers.len() {
                    let name = state.layers.name(layer).unwrap_or("?");
                    ui.selectable_value(&mut chosen, layer, name);
                }
            });
        if chosen != active {
            state.set_active_layer(chosen);
        }

        ui.separator();

        // ── Modes ──
        if ui
            .selectable_label(state.tools.add_vertex, t("tb.add_vertex"))
            .on_hover_text(t("tip.add_vertex"))
            .clicked()
        {
            action_toggle_add_vertex(state);
        }
        if ui
            .selectable_label(state.layers.triangle_mode(), t("tb.triangle"))
            .on_hover_text(t("tip.triangle"))
            .clicked()
        {
            action_toggle_triangle(state);
        }

        ui.separator();

        // ── Deletion ──
        let has_triangles = state.layers.active_mesh().triangle_count() > 0;
        if ui
            .add_enabled(has_triangles, egui::Button::new(t("tb.delete_last")))
            .on_hover_text(t("tip.delete_last"))
            .clicked()
        {
            action_delete_last_triangle(state);
        }
        if ui
            .add_enabled(!state.selection.is_empty(), egui::Button::new(t("tb.delete_sel")))
            .on_hover_text(t("tip.delete_sel"))
            .clicked()
        {
            action_delete_selection(state);
        }

        ui.separator();

        if ui
            .button(t("tb.reset_view"))
            .on_hover_text(t("tip.reset_view"))
            .clicked()
        {
            action_reset_view(state);
        }
    });
}
