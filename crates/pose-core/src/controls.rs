use crate::camera::OrthoCamera;
use glam::{Quat, Vec2, Vec3};

const ROTATE_SPEED: f32 = std::f32::consts::PI;
const ZOOM_PER_WHEEL_UNIT: f32 = 0.001;
const ZOOM_MIN: f32 = 0.05;
const ZOOM_MAX: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Rotate { last: Vec2 },
    Pan { last: Vec2 },
}

/// Trackball-style orbit controls: rotate and pan the camera around a target
/// point, zoom via the wheel. Disabled for the duration of any object drag so
/// the camera and the dragged object never respond to the same pointer
/// motion.
#[derive(Clone, Debug)]
pub struct TrackballControls {
    pub enabled: bool,
    pub target: Vec3,
    screen: Vec2,
    gesture: Gesture,
}

impl TrackballControls {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            screen: Vec2::new(width as f32, height as f32),
            gesture: Gesture::Idle,
        }
    }

    /// Refresh the cached screen size after the canvas was resized.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen = Vec2::new(width as f32, height as f32);
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    #[inline]
    pub fn is_gesturing(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn begin_rotate(&mut self, x: f32, y: f32) {
        if self.enabled {
            self.gesture = Gesture::Rotate {
                last: Vec2::new(x, y),
            };
        }
    }

    pub fn begin_pan(&mut self, x: f32, y: f32) {
        if self.enabled {
            self.gesture = Gesture::Pan {
                last: Vec2::new(x, y),
            };
        }
    }

    pub fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Advance the active gesture with a new pointer position.
    pub fn pointer_move(&mut self, camera: &mut OrthoCamera, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        let pos = Vec2::new(x, y);
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Rotate { last } => {
                let w = self.screen.x.max(1.0);
                let h = self.screen.y.max(1.0);
                self.rotate_camera(camera, (pos.x - last.x) / w, (pos.y - last.y) / h);
                self.gesture = Gesture::Rotate { last: pos };
            }
            Gesture::Pan { last } => {
                self.pan_camera(camera, pos.x - last.x, pos.y - last.y);
                self.gesture = Gesture::Pan { last: pos };
            }
        }
    }

    pub fn wheel(&mut self, camera: &mut OrthoCamera, delta_y: f32) {
        if !self.enabled {
            return;
        }
        camera.zoom = (camera.zoom * (1.0 - delta_y * ZOOM_PER_WHEEL_UNIT)).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn reset(&mut self, camera: &mut OrthoCamera, width: u32, height: u32) {
        camera.reset(width, height);
        self.target = Vec3::ZERO;
        self.gesture = Gesture::Idle;
    }

    fn rotate_camera(&mut self, camera: &mut OrthoCamera, dx: f32, dy: f32) {
        let offset = camera.position - self.target;
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        let yaw = Quat::from_axis_angle(camera.up, -dx * ROTATE_SPEED);
        let pitch = Quat::from_axis_angle(right, -dy * ROTATE_SPEED);
        let q = yaw * pitch;
        camera.position = self.target + q * offset;
        camera.up = (q * camera.up).normalize();
        camera.look_at(self.target);
    }

    fn pan_camera(&mut self, camera: &mut OrthoCamera, dx_px: f32, dy_px: f32) {
        // One screen pixel corresponds to 1/zoom world units because the
        // frustum is sized to the canvas.
        let world_per_px = 1.0 / camera.zoom.max(1e-6);
        let rot = camera.quat();
        let right = rot * Vec3::X;
        let up = rot * Vec3::Y;
        let delta = right * (-dx_px * world_per_px) + up * (dy_px * world_per_px);
        self.target += delta;
        camera.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TrackballControls, OrthoCamera) {
        (TrackballControls::new(512, 512), OrthoCamera::new(512, 512))
    }

    #[test]
    fn rotate_preserves_distance_to_target() {
        let (mut controls, mut cam) = setup();
        let d0 = (cam.position - controls.target).length();
        controls.begin_rotate(100.0, 100.0);
        controls.pointer_move(&mut cam, 150.0, 130.0);
        controls.pointer_move(&mut cam, 210.0, 80.0);
        let d1 = (cam.position - controls.target).length();
        assert!((d0 - d1).abs() < 1e-2);
        assert!(cam.rotation != glam::Vec3::ZERO);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let (mut controls, mut cam) = setup();
        let rel = cam.position - controls.target;
        controls.begin_pan(0.0, 0.0);
        controls.pointer_move(&mut cam, 40.0, -25.0);
        assert!(controls.target != Vec3::ZERO);
        assert!(((cam.position - controls.target) - rel).length() < 1e-4);
    }

    #[test]
    fn wheel_zooms_and_clamps() {
        let (mut controls, mut cam) = setup();
        controls.wheel(&mut cam, -100.0);
        assert!(cam.zoom > 1.0);
        for _ in 0..10_000 {
            controls.wheel(&mut cam, 100.0);
        }
        assert!(cam.zoom >= 0.05);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut controls, mut cam) = setup();
        controls.enabled = false;
        controls.begin_rotate(0.0, 0.0);
        assert!(!controls.is_gesturing());
        controls.wheel(&mut cam, -100.0);
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn reset_restores_initial_camera() {
        let (mut controls, mut cam) = setup();
        controls.begin_rotate(0.0, 0.0);
        controls.pointer_move(&mut cam, 90.0, 40.0);
        controls.wheel(&mut cam, -300.0);
        controls.reset(&mut cam, 512, 512);
        let fresh = OrthoCamera::new(512, 512);
        assert_eq!(cam.position, fresh.position);
        assert_eq!(cam.rotation, fresh.rotation);
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(controls.target, Vec3::ZERO);
    }
}
