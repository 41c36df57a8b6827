//! Application settings

use serde::{Deserialize, Serialize};
use shared::LayerConfig;

use crate::snap::DEFAULT_SNAP_CELL;
use crate::viewport::camera::ViewRect;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Ru]
    }
}

/// Grid display and snapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show background grid
    pub visible: bool,
    /// Distance between grid lines in world units
    pub step: f64,
    /// Snap placed and dragged vertices to the grid
    pub snap_enabled: bool,
    /// Snap cell size in world units
    pub snap_cell: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            step: 50.0,
            snap_enabled: true,
            snap_cell: DEFAULT_SNAP_CELL,
        }
    }
}

impl GridSettings {
    /// Snap cell in effect, or `None` when snapping is off
    pub fn active_cell(&self) -> Option<f64> {
        self.snap_enabled.then_some(self.snap_cell)
    }
}

/// Camera behavior shared by the editor and preview surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Zoom multiplier per wheel notch
    pub zoom_step: f64,
    /// World rectangle fitted on first layout and on reset
    pub initial_rect: ViewRect,
    /// Inset of the preview surface in pixels
    pub preview_margin: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom_step: 1.15,
            initial_rect: ViewRect::new(-500.0, -500.0, 1000.0, 1000.0),
            preview_margin: 20.0,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Opacity of layers other than the active one (0.0 - 1.0)
    pub inactive_opacity: f32,
    /// Vertex marker radius in pixels
    pub vertex_radius: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            inactive_opacity: 0.1,
            vertex_radius: 6.0,
            language: Language::default(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub grid: GridSettings,
    pub camera: CameraSettings,
    /// Layer names and colors
    #[serde(default)]
    pub layers: LayerConfig,
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "terrain-editor", "terrain-editor")
        {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str::<AppSettings>(&json) {
                    Ok(settings) => return settings.sanitized(),
                    Err(e) => tracing::warn!("Ignoring {}: {e}", config_path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "terrain-editor", "terrain-editor")
        {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::error!("Failed to save settings: {e}");
                    }
                }
            }
        }
    }

    /// Replace values a hand-edited file could have broken
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.layers.validate() {
            tracing::warn!("Layer config rejected ({e}), using terrain defaults");
            self.layers = LayerConfig::default();
        }
        if !(self.camera.zoom_step.is_finite() && self.camera.zoom_step > 1.0) {
            self.camera.zoom_step = CameraSettings::default().zoom_step;
        }
        if !(self.grid.step.is_finite() && self.grid.step > 0.0) {
            self.grid.step = GridSettings::default().step;
        }
        self.ui.inactive_opacity = self.ui.inactive_opacity.clamp(0.0, 1.0);
        self
    }
}
