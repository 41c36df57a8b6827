//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use terrain_editor_lib::command::{execute_json, execute_json_batch};
use terrain_editor_lib::fixtures;
use terrain_editor_lib::harness::TestHarness;

#[test]
fn test_command_add_vertex_reports_snapped_position() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "add_vertex", "x": 12.4, "y": 3.0}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["layer"], 0);
    assert_eq!(data["index"], 0);
    assert_eq!(data["position"][0], 10.0);
    assert_eq!(data["position"][1], 5.0);
    assert_eq!(h.vertex_count(0), 1);
}

#[test]
fn test_command_triangle_workflow_via_json_batch() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "set_active_layer", "layer": "Grass"},
        {"command": "add_vertex", "x": 0, "y": 0},
        {"command": "add_vertex", "x": 200, "y": 0},
        {"command": "add_vertex", "x": 120, "y": 150},
        {"command": "toggle_triangle_mode"},
        {"command": "pick_vertex", "index": 0},
        {"command": "pick_vertex", "index": 1},
        {"command": "pick_vertex", "index": 2},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 9);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }

    let committed = responses[7].data.as_ref().unwrap();
    assert_eq!(committed["outcome"], "committed");
    assert_eq!(committed["triangle"], 0);

    let inspect = responses[8].data.as_ref().unwrap();
    assert_eq!(inspect["active_layer"], 5);
    assert_eq!(inspect["triangle_mode"], true);
    assert_eq!(inspect["layers"][5]["name"], "Grass");
    assert_eq!(inspect["layers"][5]["vertex_count"], 3);
    assert_eq!(inspect["layers"][5]["triangle_count"], 1);
    assert_eq!(inspect["layers"][0]["vertex_count"], 0);
}

#[test]
fn test_command_pick_same_vertex_twice_is_removed() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();

    let json = r#"[
        {"command": "toggle_triangle_mode"},
        {"command": "pick_vertex", "index": 2},
        {"command": "pick_vertex", "index": 2}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    let last = responses[2].data.as_ref().unwrap();
    assert_eq!(last["outcome"], "removed");
    assert_eq!(last["buffer"].as_array().unwrap().len(), 0);
    assert_eq!(h.triangle_count(0), 1);
}

#[test]
fn test_command_select_and_delete() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();

    let resp = execute_json(
        &mut h,
        r#"{"command": "select", "handles": [{"kind": "vertex", "layer": "Sea-0", "index": 0}]}"#,
    )
    .unwrap();
    assert!(resp.success, "{:?}", resp.error);
    assert_eq!(resp.data.unwrap()["selected"].as_array().unwrap().len(), 1);

    let resp = execute_json(&mut h, r#"{"command": "delete_selection"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["affected_layers"], serde_json::json!([0]));
    assert_eq!(h.vertex_count(0), 2);
    assert_eq!(h.triangle_count(0), 0);
}

#[test]
fn test_command_rejects_negative_and_unknown_references() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "pick_vertex", "index": -1}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("non-negative"));

    let resp = execute_json(&mut h, r#"{"command": "set_active_layer", "layer": "Lava"}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("Lava"));

    let resp = execute_json(&mut h, r#"{"command": "set_active_layer", "layer": 11}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(h.active_layer(), 0);
}

#[test]
fn test_command_invalid_triangle_is_not_an_error() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();

    let resp = execute_json(&mut h, r#"{"command": "add_triangle", "indices": [1, 1, 2]}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["added"], false);
    assert_eq!(data["triangle_count"], 1);
}

#[test]
fn test_command_camera_zoom_around_center() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "set_viewport", "x": 0, "y": 0, "width": 800, "height": 600},
        {"command": "zoom_at", "x": 400, "y": 300, "factor": 2.0}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    let fitted = responses[0].data.as_ref().unwrap();
    let zoomed = responses[1].data.as_ref().unwrap();

    let z0 = fitted["zoom"].as_f64().unwrap();
    let z1 = zoomed["zoom"].as_f64().unwrap();
    assert!((z1 - 2.0 * z0).abs() < 1e-12);
    assert!(zoomed["center"][0].as_f64().unwrap().abs() < 1e-9);
    assert!(zoomed["center"][1].as_f64().unwrap().abs() < 1e-9);
}

#[test]
fn test_command_preview_surface_is_separate() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "set_viewport", "surface": "preview", "x": 0, "y": 0, "width": 440, "height": 440},
        {"command": "set_viewport", "x": 0, "y": 0, "width": 800, "height": 600},
        {"command": "pan", "dx": 60, "dy": 0},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["preview_camera"]["center"][0], 0.0);
    assert!(inspect["editor_camera"]["center"][0].as_f64().unwrap() < 0.0);
}

#[test]
fn test_command_export_layers() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::terrain_fixture()).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "export_layers"}"#).unwrap();
    assert!(resp.success);
    let json = resp.data.unwrap()["layers_json"].as_str().unwrap().to_string();
    let geometry: shared::TerrainGeometry = serde_json::from_str(&json).unwrap();
    assert_eq!(geometry.layer("Rock"), Some(&fixtures::triangle_layer()));
    assert_eq!(geometry.layers.len(), 11);
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    assert!(execute_json_batch(&mut h, "not json").is_err());
}

#[test]
fn test_command_inactive_layer_is_not_editable() {
    let mut h = TestHarness::new();
    h.add_vertex(10.0, 10.0);

    let json = r#"[
        {"command": "set_active_layer", "layer": 3},
        {"command": "move_vertex", "layer": 0, "index": 0, "x": 77, "y": 88},
        {"command": "select", "handles": [{"kind": "vertex", "layer": 0, "index": 0}]},
        {"command": "delete_selection"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    assert!(responses[0].success);
    assert!(!responses[1].success);
    assert!(responses[1].error.as_ref().unwrap().contains("not the active layer"));
    assert!(!responses[2].success);
    assert_eq!(
        responses[3].data.as_ref().unwrap()["affected_layers"],
        serde_json::json!([])
    );

    let mesh = h.mesh(0).unwrap();
    assert_eq!(mesh.vertex_count(), 1);
    assert_eq!(mesh.point(0), Some(glam::DVec2::new(10.0, 10.0)));
}

#[test]
fn test_command_move_vertex_on_active_layer() {
    let mut h = TestHarness::new();
    h.add_vertex(10.0, 10.0);

    let resp = execute_json(
        &mut h,
        r#"{"command": "move_vertex", "layer": "Sea-0", "index": 0, "x": 77, "y": 88}"#,
    )
    .unwrap();
    assert!(resp.success, "{:?}", resp.error);
    assert_eq!(resp.data.unwrap()["moved"], true);
    assert_eq!(h.active_mesh().point(0), Some(glam::DVec2::new(77.0, 88.0)));
}
