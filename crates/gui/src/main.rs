mod app;
pub mod i18n;
mod ui;
mod viewport;

// Library modules re-exported so `crate::state` and `crate::snap`
// resolve to the lib crate types everywhere in the binary.
pub use terrain_editor_lib::snap;
pub use terrain_editor_lib::state;

use app::EditorApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terrain_editor=info,terrain_editor_lib=info".into()),
        )
        .init();

    // Parse --layers <path> argument
    let initial_geometry = parse_layers_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Terrain Editor")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "terrain-editor",
        native_options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, initial_geometry)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_layers_arg() -> Option<shared::TerrainGeometry> {
    let args: Vec<String> = std::env::args().collect();
    let pos = args.iter().position(|a| a == "--layers")?;
    let Some(path) = args.get(pos + 1) else {
        tracing::error!("--layers expects a file path");
        return None;
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<shared::TerrainGeometry>(&json) {
            Ok(geometry) => {
                tracing::info!(
                    "Loaded {} layer(s) from {path} ({} vertices)",
                    geometry.layers.len(),
                    geometry.total_vertices()
                );
                Some(geometry)
            }
            Err(e) => {
                tracing::error!("Failed to parse layers JSON from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read layers file {path}: {e}");
            None
        }
    }
}
