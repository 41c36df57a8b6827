//! Integration tests for TestHarness.
//!
//! Drives the headless editor the way the window does: layer edits,
//! selection deletion and both surface cameras.

use glam::DVec2;
use terrain_editor_lib::fixtures;
use terrain_editor_lib::harness::{Surface, TestHarness};
use terrain_editor_lib::state::{Handle, PickOutcome};
use terrain_editor_lib::viewport::camera::ViewRect;

fn approx(a: DVec2, b: DVec2) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn test_triangle_then_delete_first_vertex() {
    let mut h = TestHarness::new();
    assert_eq!(h.add_vertex(0.0, 0.0), Some(0));
    assert_eq!(h.add_vertex(200.0, 0.0), Some(1));
    assert_eq!(h.add_vertex(120.0, 150.0), Some(2));
    assert!(h.add_triangle(0, 1, 2));
    assert_eq!(h.active_mesh().triangles(), &[[0, 1, 2]]);

    h.select([Handle::vertex(0, 0)]);
    assert_eq!(h.delete_selection(), vec![0]);

    let mesh = h.active_mesh();
    assert_eq!(
        mesh.points(),
        &[DVec2::new(200.0, 0.0), DVec2::new(120.0, 150.0)]
    );
    assert!(mesh.triangles().is_empty());
    assert!(h.errors().is_empty());
    assert_eq!(h.selection_count(), 0);
}

#[test]
fn test_duplicate_index_triangle_is_silent_noop() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();
    let version = h.active_mesh().version();

    assert!(!h.add_triangle(1, 1, 2));
    assert!(!h.add_triangle(0, 1, 9));
    assert_eq!(h.triangle_count(0), 1);
    assert_eq!(h.active_mesh().version(), version);
}

#[test]
fn test_pick_buffer_toggle_and_commit() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::square_layer([0.0, 0.0], 100.0)))
        .unwrap();
    assert!(h.toggle_triangle_mode());

    // same vertex twice leaves the buffer empty and the mesh untouched
    assert_eq!(h.pick_vertex(1), PickOutcome::Added);
    assert_eq!(h.pick_vertex(1), PickOutcome::Removed);
    assert!(h.state.layers.pick_buffer().is_empty());
    assert_eq!(h.triangle_count(0), 2);

    assert_eq!(h.pick_vertex(1), PickOutcome::Added);
    assert_eq!(h.pick_vertex(2), PickOutcome::Added);
    assert_eq!(h.pick_vertex(3), PickOutcome::Committed { triangle: 2 });
    assert_eq!(h.active_mesh().triangles()[2], [1, 2, 3]);
    assert!(h.state.layers.pick_buffer().is_empty());
}

#[test]
fn test_pick_buffer_dropped_on_layer_switch() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();
    h.toggle_triangle_mode();
    h.pick_vertex(0);
    h.pick_vertex(1);

    assert!(h.set_active_layer(4));
    assert!(h.state.layers.pick_buffer().is_empty());
    assert_eq!(h.pick_vertex(0), PickOutcome::Ignored);
}

#[test]
fn test_delete_selection_across_fan_preserves_order() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::fan_layer(4, 100.0)))
        .unwrap();
    let before = h.active_mesh().points().to_vec();

    // dropping the hub removes every fan triangle
    h.select([Handle::vertex(0, 0), Handle::vertex(0, 3)]);
    h.delete_selection();

    let mesh = h.active_mesh();
    assert_eq!(mesh.vertex_count(), before.len() - 2);
    assert_eq!(mesh.triangle_count(), 0);
    let expected: Vec<DVec2> = before
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 0 && *i != 3)
        .map(|(_, p)| *p)
        .collect();
    assert_eq!(mesh.points(), expected.as_slice());
}

#[test]
fn test_delete_triangle_keeps_vertices_and_remaps_rest() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::square_layer([0.0, 0.0], 100.0)))
        .unwrap();

    h.select([Handle::triangle(0, 0)]);
    h.delete_selection();

    let mesh = h.active_mesh();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangles(), &[[0, 2, 3]]);
    assert!(h.validate_mesh(0).unwrap().validate_all().is_empty());
}

#[test]
fn test_delete_selection_untouched_layers_keep_version() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::terrain_fixture()).unwrap();
    let land = h.state.layers.config().index_of("Land").unwrap();
    let rock = h.state.layers.config().index_of("Rock").unwrap();
    let rock_version = h.mesh(rock).unwrap().version();

    h.set_active_layer(land);
    // vertex 1 only belongs to the first half of the square
    h.select([Handle::vertex(land, 1)]);
    assert_eq!(h.delete_selection(), vec![land]);

    assert_eq!(h.vertex_count(land), 3);
    assert_eq!(h.mesh(land).unwrap().triangles(), &[[0, 1, 2]]);
    assert_eq!(h.mesh(rock).unwrap().version(), rock_version);
    assert!(h.errors().is_empty());
}

#[test]
fn test_snapped_vertex_stays_in_world() {
    let mut h = TestHarness::new();
    let i = h.add_vertex(12.4, -7.6).unwrap();
    assert_eq!(h.active_mesh().point(i), Some(DVec2::new(10.0, -10.0)));

    let j = h.add_vertex(9_999.0, -9_999.0).unwrap();
    assert_eq!(h.active_mesh().point(j), Some(DVec2::new(500.0, -500.0)));
}

#[test]
fn test_zoom_at_viewport_center_keeps_center() {
    let mut h = TestHarness::new();
    h.set_viewport(Surface::Editor, ViewRect::new(0.0, 0.0, 800.0, 600.0));
    let cam = h.camera_mut(Surface::Editor);
    cam.center = DVec2::ZERO;
    cam.set_zoom(1.0);

    h.zoom_at(Surface::Editor, 400.0, 300.0, 2.0);
    let cam = h.camera(Surface::Editor);
    assert_eq!(cam.zoom(), 2.0);
    assert!(approx(cam.center, DVec2::ZERO));
}

#[test]
fn test_wheel_zoom_keeps_anchor_fixed() {
    let mut h = TestHarness::new();
    h.set_viewport(Surface::Editor, ViewRect::new(0.0, 0.0, 800.0, 600.0));
    let anchor = (130.0, 470.0);
    let before = h.screen_to_world(Surface::Editor, anchor.0, anchor.1);

    for notches in [3, -1, 5, -7] {
        h.wheel(Surface::Editor, anchor.0, anchor.1, notches);
        let after = h.screen_to_world(Surface::Editor, anchor.0, anchor.1);
        assert!((after - before).length() < 1e-6, "{notches}: {after:?}");
    }
}

#[test]
fn test_pan_roundtrip_and_reset() {
    let mut h = TestHarness::new();
    h.set_viewport(Surface::Editor, ViewRect::new(0.0, 0.0, 800.0, 600.0));
    let fitted = h.camera(Surface::Editor).clone();

    h.pan(Surface::Editor, 37.0, -12.5);
    h.pan(Surface::Editor, -37.0, 12.5);
    assert!(approx(h.camera(Surface::Editor).center, fitted.center));

    h.zoom_at(Surface::Editor, 10.0, 10.0, 4.0);
    h.pan(Surface::Editor, 100.0, 100.0);
    h.reset_camera(Surface::Editor);
    let cam = h.camera(Surface::Editor);
    assert!(approx(cam.center, fitted.center));
    assert_eq!(cam.zoom(), fitted.zoom());
}

#[test]
fn test_preview_camera_is_independent() {
    let mut h = TestHarness::new();
    h.set_viewport(Surface::Editor, ViewRect::new(0.0, 0.0, 800.0, 600.0));
    h.set_viewport(Surface::Preview, ViewRect::new(0.0, 0.0, 440.0, 440.0));

    // margin of 20 leaves a 400px square for 1000 world units
    assert!((h.camera(Surface::Preview).zoom() - 0.4).abs() < 1e-12);

    h.pan(Surface::Editor, 50.0, 0.0);
    assert!(approx(h.camera(Surface::Preview).center, DVec2::ZERO));
}

#[test]
fn test_click_select_vertex_through_camera() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::single_layer("Sea-0", fixtures::triangle_layer()))
        .unwrap();
    h.set_viewport(Surface::Editor, ViewRect::new(0.0, 0.0, 800.0, 600.0));

    // zoom 0.6: world (200, 0) lands at screen (520, 300)
    let hit = h.click_select(DVec2::new(521.0, 301.0), false);
    assert_eq!(hit, Some(Handle::vertex(0, 1)));
    assert_eq!(h.selection_count(), 1);

    // inside the triangle but away from corners
    let hit = h.click_select(DVec2::new(400.0 + 100.0 * 0.6, 300.0 + 50.0 * 0.6), true);
    assert_eq!(hit, Some(Handle::triangle(0, 0)));
    assert_eq!(h.selection_count(), 2);
}

#[test]
fn test_load_rejects_bad_geometry_without_changes() {
    let mut h = TestHarness::new();
    h.add_vertex(10.0, 10.0);

    let err = h
        .load_geometry_json(r#"{"layers": {"Volcano": {"vertices": [], "triangles": []}}}"#)
        .unwrap_err();
    assert!(err.contains("Volcano"), "{err}");

    let err = h
        .load_geometry_json(
            r#"{"layers": {"Land": {"vertices": [{"x": 0, "y": 0}], "triangles": [[0, 0, 1]]}}}"#,
        )
        .unwrap_err();
    assert!(!err.is_empty());
    assert_eq!(h.vertex_count(0), 1);
}

#[test]
fn test_export_then_load_reproduces_layers() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::terrain_fixture()).unwrap();
    let json = h.export_geometry_json();

    let mut other = TestHarness::new();
    other.load_geometry_json(&json).unwrap();
    for layer in 0..11 {
        assert_eq!(
            other.mesh(layer).unwrap().points(),
            h.mesh(layer).unwrap().points()
        );
        assert_eq!(
            other.mesh(layer).unwrap().triangles(),
            h.mesh(layer).unwrap().triangles()
        );
    }
}

#[test]
fn test_clear_empties_every_layer() {
    let mut h = TestHarness::new();
    h.load_geometry(&fixtures::terrain_fixture()).unwrap();
    h.select([Handle::vertex(0, 0)]);
    h.clear();
    assert!((0..11).all(|l| h.vertex_count(l) == 0 && h.triangle_count(l) == 0));
    assert_eq!(h.selection_count(), 0);
}
