use crate::scene::Scene;
use glam::Vec3;

/// Mouse-button mapping for the two drag tools. Primary drags a single
/// joint, secondary drags the whole body group; the tools share the
/// pointer-down event but are mutually exclusive per gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl PointerButton {
    pub fn from_code(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// Hover result handed to the floating label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverInfo {
    pub body: String,
    pub joint_name: &'static str,
}

#[derive(Clone, Debug)]
enum DragKind {
    Joint { body: String, joint: usize },
    Body { body: String },
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    kind: DragKind,
    /// Point defining the camera-facing drag plane.
    plane_point: Vec3,
    /// Offset between the grabbed object and the initial plane hit, so the
    /// object does not jump to the pointer on the first move.
    grab_offset: Vec3,
}

/// Pointer state machine: picking, hover bookkeeping, and the two drag
/// tools. Dragging moves the grabbed object along the plane through its
/// grab point facing the camera, which under an orthographic camera keeps
/// the object under the pointer.
pub struct Interaction {
    drag: Option<ActiveDrag>,
    enabled: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            drag: None,
            enabled: true,
        }
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Arm or disarm all pointer handling. Disarming cancels any in-flight
    /// drag and keeps the orbit controls off, so a halted widget cannot
    /// capture stray input; re-arming hands the controls back.
    pub fn set_enabled(&mut self, scene: &mut Scene, enabled: bool) {
        self.enabled = enabled;
        self.drag = None;
        scene.controls.end_gesture();
        scene.controls.enabled = enabled;
    }

    /// Handle pointer-down: select the hit body (or clear selection) and arm
    /// the drag tool for the pressed button. Returns true when a drag
    /// started, in which case orbit controls were disabled for the gesture.
    pub fn pointer_down(
        &mut self,
        scene: &mut Scene,
        sx: f32,
        sy: f32,
        button: PointerButton,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(hit) = scene.pick(sx, sy) else {
            scene.set_selected(None);
            return false;
        };
        scene.set_selected(Some(hit.body.clone()));
        let Some(body) = scene.body(&hit.body) else {
            return false;
        };
        let joint_world = body.joint_world(hit.joint);
        let group_position = body.group.position;
        let (origin, dir) = scene.camera.screen_ray(sx, sy, scene.width(), scene.height());
        let normal = scene.camera.forward();
        let Some(plane_hit) = ray_plane(origin, dir, joint_world, normal) else {
            return false;
        };
        let kind = match button {
            PointerButton::Primary => DragKind::Joint {
                body: hit.body.clone(),
                joint: hit.joint,
            },
            PointerButton::Secondary => DragKind::Body {
                body: hit.body.clone(),
            },
            PointerButton::Other => return false,
        };
        let grab_offset = match &kind {
            DragKind::Joint { .. } => joint_world - plane_hit,
            DragKind::Body { .. } => group_position - plane_hit,
        };
        self.drag = Some(ActiveDrag {
            kind,
            plane_point: joint_world,
            grab_offset,
        });
        scene.controls.enabled = false;
        log::debug!("[pointer] begin drag on {:?}", hit.body);
        true
    }

    /// Handle pointer-move: advance the active drag, or recompute hover when
    /// no drag is running. Returns the hover info for the floating label.
    pub fn pointer_move(&mut self, scene: &mut Scene, sx: f32, sy: f32) -> Option<HoverInfo> {
        if !self.enabled {
            return None;
        }
        if let Some(drag) = self.drag.clone() {
            self.apply_drag(scene, &drag, sx, sy);
            return None;
        }
        match scene.pick(sx, sy) {
            Some(hit) => {
                let info = HoverInfo {
                    body: hit.body.clone(),
                    joint_name: hit.joint_name(),
                };
                scene.set_hovered(Some(hit.body));
                Some(info)
            }
            None => {
                scene.set_hovered(None);
                None
            }
        }
    }

    /// End any drag and hand pointer motion back to the orbit controls.
    pub fn pointer_up(&mut self, scene: &mut Scene) {
        self.drag = None;
        scene.controls.enabled = self.enabled;
        scene.controls.end_gesture();
    }

    fn apply_drag(&mut self, scene: &mut Scene, drag: &ActiveDrag, sx: f32, sy: f32) {
        let (origin, dir) = scene.camera.screen_ray(sx, sy, scene.width(), scene.height());
        let normal = scene.camera.forward();
        let Some(hit) = ray_plane(origin, dir, drag.plane_point, normal) else {
            return;
        };
        let target = hit + drag.grab_offset;
        match &drag.kind {
            DragKind::Joint { body, joint } => {
                if let Some(body) = scene.body_mut(body) {
                    let local = body.group.inverse_transform_point(target);
                    body.joints[*joint].transform.position = local;
                    body.joints[*joint].dirty = true;
                    body.dirty = true;
                }
            }
            DragKind::Body { body } => {
                if let Some(body) = scene.body_mut(body) {
                    body.group.position = target;
                    body.mark_all_dirty();
                }
            }
        }
    }
}

/// Ray/sphere intersection returning the nearest non-negative hit distance.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Ray/plane intersection; the plane passes through `point` with `normal`.
#[inline]
pub fn ray_plane(ray_origin: Vec3, ray_dir: Vec3, point: Vec3, normal: Vec3) -> Option<Vec3> {
    let denom = normal.dot(ray_dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = normal.dot(point - ray_origin) / denom;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_sphere_hits_ahead() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert!(t.is_some());
        assert!((t.unwrap() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn ray_sphere_misses_offset_sphere() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn ray_sphere_ignores_spheres_behind() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn ray_plane_intersects_facing_plane() {
        let hit = ray_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, Vec3::Z);
        assert!(hit.is_some());
        assert!(hit.unwrap().length() < 1e-5);
    }

    #[test]
    fn ray_plane_rejects_parallel_ray() {
        assert!(ray_plane(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), Vec3::Z).is_none());
    }
}
