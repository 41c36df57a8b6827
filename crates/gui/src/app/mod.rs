//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::i18n::set_lang;
use crate::state::{AppSettings, AppState};
use crate::ui::{layer_panel, status_bar, toolbar};
use crate::viewport::{EditorPanel, PreviewPanel};

/// Main application
pub struct EditorApp {
    state: AppState,
    editor: EditorPanel,
    preview: PreviewPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl EditorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_geometry: Option<shared::TerrainGeometry>,
    ) -> Self {
        let settings = AppSettings::load();
        set_lang(settings.ui.language.into());

        let mut state = AppState::new(settings);
        if let Some(geometry) = initial_geometry {
            if let Err(e) = state.load_geometry(&geometry) {
                tracing::error!("Initial geometry rejected: {e}");
            }
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let initial = state.settings.camera.initial_rect;
        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            editor: EditorPanel::new(initial),
            preview: PreviewPanel::new(initial),
            last_font_size,
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        if std::mem::take(&mut self.state.view_reset_requested) {
            self.editor.reset_camera();
            self.preview.reset_camera();
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: layer stack ──────────────────────────
        if self.state.panels.layer_panel {
            egui::SidePanel::left("layer_panel")
                .default_width(230.0)
                .width_range(160.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    layer_panel::show(ui, &mut self.state);
                });
        }

        // ── Right panel: aggregate preview ───────────────────
        if self.state.panels.preview {
            egui::SidePanel::right("preview_panel")
                .default_width(320.0)
                .width_range(200.0..=600.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    self.preview.show(ui, &self.state);
                });
        }

        // ── Central panel: editor ────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.editor.show(ui, &mut self.state);
            });
    }
}
