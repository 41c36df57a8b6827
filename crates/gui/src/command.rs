//! JSON command protocol for scripted editing.
//!
//! Every user-facing editor action has a command here, so a session can be
//! replayed or driven without a window.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::harness::{Surface, TestHarness};
use crate::state::{Handle, PickOutcome};
use crate::viewport::camera::ViewRect;

/// Layer addressed by index or by configured name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerRef {
    Index(i64),
    Name(String),
}

/// Selection entry as sent over the wire (indices may be negative here)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandleRef {
    Vertex { layer: LayerRef, index: i64 },
    Triangle { layer: LayerRef, index: i64 },
}

/// A command the agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Place a vertex on the active layer (grid-snapped like a click)
    AddVertex {
        x: f64,
        y: f64,
    },
    /// Move a vertex of the active layer (`layer`, if given, must name it)
    MoveVertex {
        #[serde(default)]
        layer: Option<LayerRef>,
        index: i64,
        x: f64,
        y: f64,
    },
    /// Append a triangle on the active layer
    AddTriangle {
        indices: [i64; 3],
    },
    /// Toggle triangle-pick mode
    ToggleTriangleMode,
    /// Click a vertex of the active layer while in triangle-pick mode
    PickVertex {
        index: i64,
    },
    /// Remove the last triangle of the active layer
    DeleteLastTriangle,
    /// Replace the selection
    Select {
        handles: Vec<HandleRef>,
    },
    /// Clear selection.
    ClearSelection,
    /// Delete selected vertices/triangles (with incident triangles).
    DeleteSelection,
    /// Switch the active layer
    SetActiveLayer {
        layer: LayerRef,
    },
    /// Refit a camera to the initial world rectangle
    ResetCamera {
        #[serde(default)]
        surface: Surface,
    },
    /// Pan by a screen-pixel delta
    Pan {
        #[serde(default)]
        surface: Surface,
        dx: f64,
        dy: f64,
    },
    /// Zoom by `factor` around a screen point
    ZoomAt {
        #[serde(default)]
        surface: Surface,
        x: f64,
        y: f64,
        factor: f64,
    },
    /// Lay out a surface (device pixels)
    SetViewport {
        #[serde(default)]
        surface: Surface,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Inspect layers, selection and cameras.
    Inspect,
    /// Export all layers as JSON.
    ExportLayers,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn to_index(value: i64, what: &str) -> Result<usize, String> {
    usize::try_from(value).map_err(|_| format!("{what} must be non-negative, got {value}"))
}

fn resolve_layer(harness: &TestHarness, layer: &LayerRef) -> Result<usize, String> {
    let layers = &harness.state.layers;
    let index = match layer {
        LayerRef::Index(i) => to_index(*i, "layer")?,
        LayerRef::Name(name) => layers
            .config()
            .index_of(name)
            .ok_or_else(|| format!("Unknown layer \"{name}\""))?,
    };
    if index >= layers.len() {
        return Err(format!("Layer {index} out of range (have {})", layers.len()));
    }
    Ok(index)
}

/// Only the active layer is selectable or movable
fn require_active(harness: &TestHarness, layer: usize) -> Result<usize, String> {
    let active = harness.active_layer();
    if layer != active {
        return Err(format!(
            "Layer {layer} is not the active layer ({active}); switch layers first"
        ));
    }
    Ok(layer)
}

fn resolve_handle(harness: &TestHarness, handle: &HandleRef) -> Result<Handle, String> {
    Ok(match handle {
        HandleRef::Vertex { layer, index } => {
            Handle::vertex(resolve_layer(harness, layer)?, to_index(*index, "index")?)
        }
        HandleRef::Triangle { layer, index } => {
            Handle::triangle(resolve_layer(harness, layer)?, to_index(*index, "index")?)
        }
    })
}

fn camera_json(harness: &TestHarness, surface: Surface) -> serde_json::Value {
    let cam = harness.camera(surface);
    let visible = cam.visible_world_rect();
    serde_json::json!({
        "center": [cam.center.x, cam.center.y],
        "zoom": cam.zoom(),
        "visible": [visible.min.x, visible.min.y, visible.width(), visible.height()],
    })
}

fn try_execute(harness: &mut TestHarness, cmd: AgentCommand) -> Result<CommandResponse, String> {
    Ok(match cmd {
        AgentCommand::AddVertex { x, y } => match harness.add_vertex(x, y) {
            Some(index) => {
                let p = harness.active_mesh().point(index).unwrap_or(DVec2::ZERO);
                CommandResponse::ok_with_data(serde_json::json!({
                    "layer": harness.active_layer(),
                    "index": index,
                    "position": [p.x, p.y],
                }))
            }
            None => CommandResponse::err("No active layer"),
        },

        AgentCommand::MoveVertex { layer, index, x, y } => {
            if let Some(l) = layer {
                require_active(harness, resolve_layer(harness, &l)?)?;
            }
            let index = to_index(index, "index")?;
            let moved = harness.move_vertex(index, x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "moved": moved }))
        }

        AgentCommand::AddTriangle { indices } => {
            let [i, j, k] = [
                to_index(indices[0], "index")?,
                to_index(indices[1], "index")?,
                to_index(indices[2], "index")?,
            ];
            let added = harness.add_triangle(i, j, k);
            CommandResponse::ok_with_data(serde_json::json!({
                "added": added,
                "triangle_count": harness.active_mesh().triangle_count(),
            }))
        }

        AgentCommand::ToggleTriangleMode => {
            let on = harness.toggle_triangle_mode();
            CommandResponse::ok_with_data(serde_json::json!({ "triangle_mode": on }))
        }

        AgentCommand::PickVertex { index } => {
            let outcome = harness.pick_vertex(to_index(index, "index")?);
            let (name, triangle) = match outcome {
                PickOutcome::Ignored => ("ignored", None),
                PickOutcome::Added => ("added", None),
                PickOutcome::Removed => ("removed", None),
                PickOutcome::Committed { triangle } => ("committed", Some(triangle)),
            };
            CommandResponse::ok_with_data(serde_json::json!({
                "outcome": name,
                "triangle": triangle,
                "buffer": harness.state.layers.pick_buffer(),
            }))
        }

        AgentCommand::DeleteLastTriangle => {
            let removed = harness.delete_last_triangle();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Select { handles } => {
            let resolved = handles
                .iter()
                .map(|h| {
                    let handle = resolve_handle(harness, h)?;
                    require_active(harness, handle.layer())?;
                    Ok(handle)
                })
                .collect::<Result<Vec<_>, String>>()?;
            harness.select(resolved);
            CommandResponse::ok_with_data(serde_json::json!({
                "selected": harness.state.selection.all(),
            }))
        }

        AgentCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::DeleteSelection => {
            let affected = harness.delete_selection();
            CommandResponse::ok_with_data(serde_json::json!({ "affected_layers": affected }))
        }

        AgentCommand::SetActiveLayer { layer } => {
            let layer = resolve_layer(harness, &layer)?;
            harness.set_active_layer(layer);
            CommandResponse::ok_with_data(serde_json::json!({ "active_layer": layer }))
        }

        AgentCommand::ResetCamera { surface } => {
            harness.reset_camera(surface);
            CommandResponse::ok_with_data(camera_json(harness, surface))
        }

        AgentCommand::Pan { surface, dx, dy } => {
            harness.pan(surface, dx, dy);
            CommandResponse::ok_with_data(camera_json(harness, surface))
        }

        AgentCommand::ZoomAt {
            surface,
            x,
            y,
            factor,
        } => {
            harness.zoom_at(surface, x, y, factor);
            CommandResponse::ok_with_data(camera_json(harness, surface))
        }

        AgentCommand::SetViewport {
            surface,
            x,
            y,
            width,
            height,
        } => {
            harness.set_viewport(surface, ViewRect::new(x, y, width, height));
            CommandResponse::ok_with_data(camera_json(harness, surface))
        }

        AgentCommand::Inspect => {
            let layers = &harness.state.layers;
            let summary: Vec<serde_json::Value> = (0..layers.len())
                .map(|i| {
                    let mesh = &layers.meshes()[i];
                    serde_json::json!({
                        "index": i,
                        "name": layers.name(i),
                        "vertex_count": mesh.vertex_count(),
                        "triangle_count": mesh.triangle_count(),
                        "version": mesh.version(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "active_layer": layers.active_layer(),
                "triangle_mode": layers.triangle_mode(),
                "pick_buffer": layers.pick_buffer(),
                "selection_count": harness.selection_count(),
                "layers": summary,
                "editor_camera": camera_json(harness, Surface::Editor),
                "preview_camera": camera_json(harness, Surface::Preview),
            }))
        }

        AgentCommand::ExportLayers => {
            let json = harness.export_geometry_json();
            CommandResponse::ok_with_data(serde_json::json!({ "layers_json": json }))
        }
    })
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    try_execute(harness, cmd).unwrap_or_else(|e| {
        tracing::warn!("Command rejected: {e}");
        CommandResponse::err(e)
    })
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
