use glam::Vec2;
use pose_core::{Scene, SceneError, DEFAULT_BODY_NAME};

#[test]
fn fresh_scene_holds_one_default_body() {
    let scene = Scene::new(512, 512);
    assert_eq!(scene.body_names(), vec![DEFAULT_BODY_NAME.to_string()]);
    assert!(scene.selected().is_none());
    assert!(scene.hovered().is_none());
}

#[test]
fn spawned_bodies_get_unique_auto_names() {
    let mut scene = Scene::new(512, 512);
    let a = scene.spawn_body();
    let b = scene.spawn_body();
    assert_eq!(a, "body_1");
    assert_eq!(b, "body_2");
    let names = scene.body_names();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], DEFAULT_BODY_NAME);
}

#[test]
fn spawn_places_next_to_reference_body() {
    let mut scene = Scene::new(512, 512);
    let first_anchor = scene.bodies()[0].joint_world(0);
    let name = scene.spawn_body();
    let spawned_anchor = scene.body(&name).unwrap().joint_world(0);
    assert!((spawned_anchor.x - (first_anchor.x + 32.0)).abs() < 1e-3);
    assert!((spawned_anchor.y - first_anchor.y).abs() < 1e-3);
}

#[test]
fn add_body_replaces_same_name() {
    let mut scene = Scene::new(512, 512);
    scene.add_body("twin", glam::Vec3::new(10.0, 0.0, 0.0));
    scene.add_body("twin", glam::Vec3::new(-10.0, 0.0, 0.0));
    assert_eq!(scene.body_names().len(), 2);
    assert!((scene.body("twin").unwrap().origin.x + 10.0).abs() < 1e-6);
}

#[test]
fn remove_selected_requires_selection() {
    let mut scene = Scene::new(512, 512);
    scene.spawn_body();
    assert_eq!(scene.remove_selected(), Err(SceneError::NoBodySelected));
    assert_eq!(scene.body_names().len(), 2);
}

#[test]
fn remove_selected_refuses_last_body() {
    let mut scene = Scene::new(512, 512);
    scene.set_selected(Some(DEFAULT_BODY_NAME.to_string()));
    assert_eq!(scene.remove_selected(), Err(SceneError::LastBody));
    assert_eq!(scene.body_names().len(), 1);
}

#[test]
fn remove_selected_shrinks_collection_and_clears_selection() {
    let mut scene = Scene::new(512, 512);
    let name = scene.spawn_body();
    scene.set_selected(Some(name.clone()));
    assert!(scene.remove_selected().is_ok());
    assert_eq!(scene.body_names().len(), 1);
    assert!(scene.selected().is_none());
    assert!(scene.body(&name).is_none());
}

#[test]
fn removing_hovered_body_clears_hover() {
    let mut scene = Scene::new(512, 512);
    let name = scene.spawn_body();
    scene.set_hovered(Some(name.clone()));
    scene.remove_body(&name);
    assert!(scene.hovered().is_none());
}

#[test]
fn resize_rejects_degenerate_dimensions() {
    let mut scene = Scene::new(512, 512);
    assert!(!scene.resize(63, 200));
    assert!(!scene.resize(200, 10));
    assert_eq!(scene.width(), 512);
    assert_eq!(scene.height(), 512);
}

#[test]
fn resize_to_minimum_refits_frustum() {
    let mut scene = Scene::new(512, 512);
    assert!(scene.resize(64, 64));
    assert_eq!(scene.camera.half_extents(), Vec2::new(32.0, 32.0));
    assert_eq!(scene.controls.screen(), Vec2::new(64.0, 64.0));
}

#[test]
fn reset_camera_is_idempotent() {
    let mut scene = Scene::new(512, 512);
    scene.camera.position = glam::Vec3::new(40.0, -20.0, 700.0);
    scene.camera.rotation = glam::Vec3::new(0.1, 0.4, 0.0);
    scene.camera.zoom = 3.0;
    scene.reset_camera();
    let first = scene.camera.clone();
    scene.reset_camera();
    assert_eq!(scene.camera, first);
}

#[test]
fn all_reset_keeps_only_first_body_at_origin() {
    let mut scene = Scene::new(512, 512);
    scene.spawn_body();
    scene.spawn_body();
    scene.set_selected(Some("body_1".to_string()));
    scene.camera.zoom = 2.5;
    scene.all_reset();
    assert_eq!(scene.body_names(), vec![DEFAULT_BODY_NAME.to_string()]);
    assert!(scene.selected().is_none());
    assert_eq!(scene.camera.zoom, 1.0);
    // joints back at the rest layout around the world origin
    let neck = scene.bodies()[0].joint_world(1);
    assert!((neck.x).abs() < 1e-4);
    assert!((neck.y - 0.25 * 512.0).abs() < 1e-3);
}

#[test]
fn reset_pose_targets_selection_when_present() {
    let mut scene = Scene::new(512, 512);
    let other = scene.spawn_body();
    let moved = glam::Vec3::new(999.0, 999.0, 0.0);
    scene.body_mut(DEFAULT_BODY_NAME).unwrap().joints[0]
        .transform
        .position = moved;
    scene.body_mut(&other).unwrap().joints[0].transform.position = moved;
    scene.set_selected(Some(other.clone()));
    scene.reset_pose();
    // only the selected body snapped back
    assert!(
        (scene.body(&other).unwrap().joints[0].transform.position - moved).length() > 1.0
    );
    assert_eq!(
        scene.body(DEFAULT_BODY_NAME).unwrap().joints[0]
            .transform
            .position,
        moved
    );
}

#[test]
fn pick_finds_joint_under_pointer() {
    let scene = Scene::new(512, 512);
    // the neck rests at world (0, 128, 0) which projects to pixel (256, 128)
    let hit = scene.pick(256.0, 128.0).expect("neck should be under pointer");
    assert_eq!(hit.body, DEFAULT_BODY_NAME);
    assert_eq!(hit.joint, 1);
    assert_eq!(hit.joint_name(), "neck");
}

#[test]
fn pick_misses_empty_space() {
    let scene = Scene::new(512, 512);
    assert!(scene.pick(10.0, 10.0).is_none());
}

#[test]
fn indicator_rect_bounds_projected_joints_with_margin() {
    let mut scene = Scene::new(512, 512);
    scene.set_selected(Some(DEFAULT_BODY_NAME.to_string()));
    let rect = scene.selection_rect().expect("selection rect");
    // wrist joints span ±0.312 * 512 px around the canvas center
    let expected_min_x = 256.0 - 0.312 * 512.0 - 5.0;
    let expected_max_x = 256.0 + 0.312 * 512.0 + 5.0;
    assert!((rect.min.x - expected_min_x).abs() < 1.0);
    assert!((rect.max.x - expected_max_x).abs() < 1.0);
    assert!(rect.min.y < rect.max.y);
}
