use pose_core::{Interaction, PointerButton, Scene, DEFAULT_BODY_NAME};

const NECK: usize = 1;
// The default body's neck projects to this pixel on a 512x512 canvas.
const NECK_PX: (f32, f32) = (256.0, 128.0);

#[test]
fn hover_tracks_joint_under_pointer() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    let info = interaction
        .pointer_move(&mut scene, NECK_PX.0, NECK_PX.1)
        .expect("hover info");
    assert_eq!(info.body, DEFAULT_BODY_NAME);
    assert_eq!(info.joint_name, "neck");
    assert_eq!(scene.hovered(), Some(DEFAULT_BODY_NAME));

    assert!(interaction.pointer_move(&mut scene, 5.0, 5.0).is_none());
    assert!(scene.hovered().is_none());
}

#[test]
fn pointer_down_on_joint_selects_and_disables_orbit() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    let started = interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary);
    assert!(started);
    assert!(interaction.is_dragging());
    assert_eq!(scene.selected(), Some(DEFAULT_BODY_NAME));
    assert!(!scene.controls.enabled);

    interaction.pointer_up(&mut scene);
    assert!(!interaction.is_dragging());
    assert!(scene.controls.enabled);
}

#[test]
fn pointer_down_on_empty_space_clears_selection() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    scene.set_selected(Some(DEFAULT_BODY_NAME.to_string()));
    let started = interaction.pointer_down(&mut scene, 5.0, 5.0, PointerButton::Primary);
    assert!(!started);
    assert!(scene.selected().is_none());
    assert!(scene.controls.enabled);
}

#[test]
fn joint_drag_dirties_only_that_joint_and_its_body() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    // settle the initial construction dirt
    scene.update();
    assert!(!scene.bodies()[0].dirty);

    interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary);
    interaction.pointer_move(&mut scene, NECK_PX.0 + 40.0, NECK_PX.1 - 20.0);

    let body = scene.body(DEFAULT_BODY_NAME).unwrap();
    assert!(body.dirty);
    for joint in body.joints.iter() {
        assert_eq!(joint.dirty, joint.index == NECK, "joint {}", joint.index);
    }
    // the joint followed the pointer: +40 px right, 20 px up in world space
    let neck = body.joint_world(NECK);
    assert!((neck.x - 40.0).abs() < 1e-2);
    assert!((neck.y - 148.0).abs() < 1e-2);
}

#[test]
fn body_drag_moves_group_and_dirties_every_joint() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    scene.update();

    interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Secondary);
    interaction.pointer_move(&mut scene, NECK_PX.0 + 100.0, NECK_PX.1);

    let body = scene.body(DEFAULT_BODY_NAME).unwrap();
    assert!(body.dirty);
    assert!(body.joints.iter().all(|j| j.dirty));
    assert!((body.group.position.x - 100.0).abs() < 1e-2);
    // joints keep their local layout; world positions shift with the group
    let neck = body.joint_world(NECK);
    assert!((neck.x - 100.0).abs() < 1e-2);
}

#[test]
fn ribbon_endpoints_follow_dragged_joint_after_update() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    scene.update();

    interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary);
    interaction.pointer_move(&mut scene, NECK_PX.0 + 60.0, NECK_PX.1 + 30.0);
    interaction.pointer_up(&mut scene);
    scene.update();

    let body = scene.body(DEFAULT_BODY_NAME).unwrap();
    for limb in body.limbs.iter() {
        let ribbon = &limb.ribbon;
        assert!(!ribbon.is_empty());
        let first = ribbon.points[0];
        let last = *ribbon.points.last().unwrap();
        assert!((first - body.joint_world(limb.from)).length() < 1e-3);
        assert!((last - body.joint_world(limb.to)).length() < 1e-3);
    }
}

#[test]
fn elliptic_toggle_dirties_every_body_and_joint() {
    let mut scene = Scene::new(512, 512);
    scene.spawn_body();
    scene.update();
    assert!(scene.bodies().iter().all(|b| !b.dirty));

    scene.set_elliptic_limbs(false);
    for body in scene.bodies() {
        assert!(body.dirty);
        assert!(body.joints.iter().all(|j| j.dirty));
    }
}

#[test]
fn limb_width_change_forces_recompute_only_when_value_differs() {
    let mut scene = Scene::new(512, 512);
    scene.update();
    scene.set_limb_width(4.0); // default slider value, no change
    assert!(!scene.bodies()[0].dirty);
    scene.set_limb_width(8.0);
    assert!(scene.bodies()[0].dirty);
}

#[test]
fn zoom_change_recomputes_ribbons_without_dirty_flags() {
    let mut scene = Scene::new(512, 512);
    scene.update();
    let before = scene.bodies()[0].limbs[0].ribbon.half_widths[32];
    scene.camera.zoom = 2.0;
    assert!(scene.update());
    let after = scene.bodies()[0].limbs[0].ribbon.half_widths[32];
    assert!((after - before / 2.0).abs() < 1e-4);
}

#[test]
fn update_skips_work_when_nothing_changed() {
    let mut scene = Scene::new(512, 512);
    assert!(scene.update());
    let epoch = scene.geometry_epoch();
    assert!(!scene.update());
    assert_eq!(scene.geometry_epoch(), epoch);
}

#[test]
fn disarmed_input_ignores_pointer_events() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    interaction.set_enabled(&mut scene, false);
    assert!(!interaction.is_enabled());

    let started = interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary);
    assert!(!started);
    assert!(!interaction.is_dragging());
    assert!(scene.selected().is_none());
    assert!(interaction
        .pointer_move(&mut scene, NECK_PX.0, NECK_PX.1)
        .is_none());
    assert!(scene.hovered().is_none());
    // orbit controls stay off too, so wheel and rotate gestures are inert
    assert!(!scene.controls.enabled);

    interaction.set_enabled(&mut scene, true);
    assert!(interaction.is_enabled());
    assert!(scene.controls.enabled);
    assert!(interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary));
}

#[test]
fn disarming_cancels_an_active_drag() {
    let mut scene = Scene::new(512, 512);
    let mut interaction = Interaction::new();
    interaction.pointer_down(&mut scene, NECK_PX.0, NECK_PX.1, PointerButton::Primary);
    assert!(interaction.is_dragging());

    interaction.set_enabled(&mut scene, false);
    assert!(!interaction.is_dragging());
    assert!(!scene.controls.enabled);

    // a stray pointer-up while disarmed must not re-arm the controls
    interaction.pointer_up(&mut scene);
    assert!(!scene.controls.enabled);
}
