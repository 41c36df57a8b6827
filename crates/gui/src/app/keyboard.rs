//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::ui::toolbar;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Backspace: drop the newest triangle of the active layer
        if i.modifiers.command && i.key_pressed(egui::Key::Backspace) {
            toolbar::action_delete_last_triangle(state);
        } else if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
            toolbar::action_delete_selection(state);
        }
        if i.key_pressed(egui::Key::Escape) {
            handle_escape(state);
        }
        if i.key_pressed(egui::Key::T) && !i.modifiers.command {
            toolbar::action_toggle_triangle(state);
        }
        if i.key_pressed(egui::Key::V) && !i.modifiers.command {
            toolbar::action_toggle_add_vertex(state);
        }
        if i.key_pressed(egui::Key::Home) {
            toolbar::action_reset_view(state);
        }
        if i.key_pressed(egui::Key::PageUp) {
            toolbar::action_cycle_layer(state, true);
        }
        if i.key_pressed(egui::Key::PageDown) {
            toolbar::action_cycle_layer(state, false);
        }
    });
}

/// Escape unwinds one level at a time: gesture, mode, selection
fn handle_escape(state: &mut AppState) {
    if state.tools.drag.is_some() || state.tools.band_start.is_some() {
        state.tools.cancel_gestures();
    } else if state.layers.triangle_mode() {
        state.set_triangle_mode(false);
    } else if state.tools.add_vertex {
        state.set_add_vertex_mode(false);
    } else {
        state.selection.clear();
    }
}
