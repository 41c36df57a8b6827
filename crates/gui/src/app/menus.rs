//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{set_lang, t};
use crate::state::{AppSettings, AppState, Language};
use crate::ui::toolbar;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match serde_json::from_str::<shared::TerrainGeometry>(&json) {
                        Ok(geometry) => match state.load_geometry(&geometry) {
                            Ok(()) => {
                                state.view_reset_requested = true;
                                tracing::info!("Loaded layers from {}", path.display());
                            }
                            Err(e) => tracing::error!("Rejected layer file: {e}"),
                        },
                        Err(e) => tracing::error!("Failed to parse layers: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read file: {e}"),
                }
            }
        }
        if ui.button(t("menu.save")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("layers.json")
                .save_file()
            {
                match serde_json::to_string_pretty(&state.export_geometry()) {
                    Ok(json) => {
                        if let Err(e) = std::fs::write(&path, json) {
                            tracing::error!("Failed to write layers: {e}");
                        } else {
                            tracing::info!("Saved layers to {}", path.display());
                        }
                    }
                    Err(e) => tracing::error!("Failed to serialize layers: {e}"),
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.clear")).clicked() {
            state.tools.cancel_gestures();
            state.selection.clear();
            state.layers.clear();
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(!state.selection.is_empty(), egui::Button::new(t("menu.delete")))
            .clicked()
        {
            toolbar::action_delete_selection(state);
            ui.close_menu();
        }
        let has_triangles = state.layers.active_mesh().triangle_count() > 0;
        if ui
            .add_enabled(has_triangles, egui::Button::new(t("menu.delete_last")))
            .clicked()
        {
            toolbar::action_delete_last_triangle(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.deselect_all")).clicked() {
            state.selection.clear();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.layer_panel, t("menu.layer_panel"));
        ui.checkbox(&mut state.panels.preview, t("menu.preview"));
        ui.checkbox(&mut state.settings.grid.visible, t("menu.grid"));
        ui.separator();
        if ui.button(t("menu.reset_view")).clicked() {
            toolbar::action_reset_view(state);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for &language in Language::all() {
                let current = state.settings.ui.language == language;
                if ui.selectable_label(current, language.display_name()).clicked() {
                    state.settings.ui.language = language;
                    set_lang(language.into());
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_grid_settings(ui, state);
                show_camera_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open && state.show_settings_window;
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let grid = &mut state.settings.grid;
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_step"));
        ui.add(
            egui::DragValue::new(&mut grid.step)
                .speed(1.0)
                .range(1.0..=500.0),
        );
    });

    ui.checkbox(&mut grid.snap_enabled, t("settings.snap_enabled"));
    ui.add_enabled_ui(grid.snap_enabled, |ui| {
        ui.horizontal(|ui| {
            ui.label(t("settings.snap_cell"));
            ui.add(
                egui::DragValue::new(&mut grid.snap_cell)
                    .speed(0.5)
                    .range(0.5..=250.0),
            );
        });
    });
    ui.add_space(10.0);
}

fn show_camera_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let camera = &mut state.settings.camera;
    ui.heading(t("settings.camera"));

    ui.horizontal(|ui| {
        ui.label(t("settings.zoom_step"));
        ui.add(
            egui::DragValue::new(&mut camera.zoom_step)
                .speed(0.01)
                .range(1.01..=3.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.preview_margin"));
        ui.add(
            egui::DragValue::new(&mut camera.preview_margin)
                .speed(1.0)
                .range(0.0..=100.0)
                .suffix(" px"),
        );
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    let settings = &mut state.settings.ui;
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.inactive_opacity"));
        ui.add(egui::Slider::new(&mut settings.inactive_opacity, 0.0..=1.0));
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.vertex_radius"));
        ui.add(
            egui::DragValue::new(&mut settings.vertex_radius)
                .speed(0.5)
                .range(2.0..=20.0)
                .suffix(" px"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings = std::mem::take(&mut state.settings).sanitized();
            state.apply_settings();
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            let language = state.settings.ui.language;
            state.settings = AppSettings::default();
            state.settings.ui.language = language;
            state.apply_settings();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
