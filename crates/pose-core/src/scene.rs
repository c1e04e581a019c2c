use crate::body::{Body, LimbStyle};
use crate::camera::OrthoCamera;
use crate::constants::{
    ADD_BODY_OFFSET_PX, DEFAULT_BODY_NAME, INDICATOR_MARGIN_PX, JOINT_RADIUS, LIMB_SIZE,
    MIN_CANVAS_SIZE,
};
use crate::controls::TrackballControls;
use crate::error::SceneError;
use crate::interaction::ray_sphere;
use crate::skeleton;
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

/// Identity of one hit-testable joint handle. Stable for the lifetime of its
/// owning body; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

/// Registry entry mapping a hit target back to its owning body. A non-owning
/// relation: entries are dropped when the body is disposed.
#[derive(Clone, Debug)]
pub struct JointRef {
    pub body: String,
    pub joint: usize,
}

#[derive(Clone, Debug)]
pub struct PickHit {
    pub target: TargetId,
    pub body: String,
    pub joint: usize,
    pub distance: f32,
}

impl PickHit {
    #[inline]
    pub fn joint_name(&self) -> &'static str {
        skeleton::joint_name(self.joint)
    }
}

/// Axis-aligned bounds of a body in canvas pixels, margin included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

/// The scene: the body collection, camera and orbit controls, hover/selection
/// state and the lazy limb-refresh pass. Single instance per widget; all
/// mutation happens on the frame thread.
pub struct Scene {
    pub camera: OrthoCamera,
    pub controls: TrackballControls,
    pub style: LimbStyle,
    pub low_fps: bool,
    pub(crate) bodies: Vec<Body>,
    pub(crate) targets: FnvHashMap<TargetId, JointRef>,
    pub(crate) hovered: Option<String>,
    pub(crate) selected: Option<String>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) body_counter: u32,
    next_target: u64,
    last_zoom: f32,
    geometry_epoch: u64,
}

impl Scene {
    /// Build a scene with one body at the origin. At least one body exists
    /// at all times from here on.
    pub fn new(width: u32, height: u32) -> Self {
        let mut scene = Self {
            camera: OrthoCamera::new(width, height),
            controls: TrackballControls::new(width, height),
            style: LimbStyle::default(),
            low_fps: false,
            bodies: Vec::new(),
            targets: FnvHashMap::default(),
            hovered: None,
            selected: None,
            width,
            height,
            body_counter: 1,
            next_target: 0,
            last_zoom: 1.0,
            geometry_epoch: 0,
        };
        scene.add_body(DEFAULT_BODY_NAME, Vec3::ZERO);
        scene
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unit length used to scale the normalized rest pose.
    #[inline]
    pub fn unit(&self) -> f32 {
        self.width.min(self.height) as f32
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn body_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }

    pub fn body_names(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.name.clone()).collect()
    }

    #[inline]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    #[inline]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn set_hovered(&mut self, name: Option<String>) {
        self.hovered = name.filter(|n| self.bodies.iter().any(|b| &b.name == n));
    }

    pub fn set_selected(&mut self, name: Option<String>) {
        self.selected = name.filter(|n| self.bodies.iter().any(|b| &b.name == n));
    }

    /// Monotonic counter bumped whenever renderable geometry changed (body
    /// set or ribbon contents); renderers compare it to skip re-uploads.
    #[inline]
    pub fn geometry_epoch(&self) -> u64 {
        self.geometry_epoch
    }

    /// Insert a body. If the name already exists the old body is removed
    /// first, so names stay unique.
    pub fn add_body(&mut self, name: &str, origin: Vec3) -> &Body {
        self.remove_body(name);
        let body = Body::new(name, self.unit(), origin);
        for joint in 0..body.joints.len() {
            let id = TargetId(self.next_target);
            self.next_target += 1;
            self.targets.insert(
                id,
                JointRef {
                    body: name.to_string(),
                    joint,
                },
            );
        }
        log::info!("[scene] add body {name:?} at {origin}");
        self.bodies.push(body);
        self.bodies.last().expect("just pushed")
    }

    /// Remove a body by name; no-op when absent. Drops its hit targets and
    /// clears hover/selection references that pointed at it.
    pub fn remove_body(&mut self, name: &str) {
        let Some(index) = self.bodies.iter().position(|b| b.name == name) else {
            return;
        };
        self.bodies.remove(index);
        self.targets.retain(|_, joint_ref| joint_ref.body != name);
        if self.hovered.as_deref() == Some(name) {
            self.hovered = None;
        }
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        self.geometry_epoch += 1;
        log::info!("[scene] removed body {name:?}");
    }

    /// The explicit remove command: refuses when nothing is selected or when
    /// only one body remains.
    pub fn remove_selected(&mut self) -> Result<(), SceneError> {
        let name = self
            .selected
            .clone()
            .ok_or(SceneError::NoBodySelected)?;
        if self.bodies.len() <= 1 {
            return Err(SceneError::LastBody);
        }
        self.remove_body(&name);
        self.hovered = None;
        self.selected = None;
        Ok(())
    }

    /// Add a new auto-named body placed a fixed pixel offset to the right of
    /// the selected (or most recently added) body's first joint.
    pub fn spawn_body(&mut self) -> String {
        let base = self
            .selected
            .as_deref()
            .and_then(|name| self.body(name))
            .or_else(|| self.bodies.last())
            .expect("scene always holds at least one body");
        let anchor = base.joint_world(0);
        let rest = skeleton::rest_position(0);
        let unit = self.unit();
        let origin = Vec3::new(
            anchor.x - rest.x * unit + ADD_BODY_OFFSET_PX,
            anchor.y - rest.y * unit,
            anchor.z - rest.z,
        );
        let name = format!("body_{}", self.body_counter);
        self.body_counter += 1;
        self.add_body(&name, origin);
        name
    }

    /// Reset everything: camera, selection, and the body collection down to
    /// the first created body at its rest layout around the origin.
    pub fn all_reset(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.controls.reset(&mut self.camera, self.width, self.height);
        let extra: Vec<String> = self
            .bodies
            .iter()
            .skip(1)
            .map(|b| b.name.clone())
            .collect();
        for name in extra {
            self.remove_body(&name);
        }
        let unit = self.unit();
        for body in &mut self.bodies {
            body.reset(unit, Some(Vec3::ZERO));
        }
        self.geometry_epoch += 1;
        log::info!("[scene] all reset");
    }

    pub fn reset_camera(&mut self) {
        self.controls.reset(&mut self.camera, self.width, self.height);
    }

    /// Reset the selected body's joints, or every body when nothing is
    /// selected.
    pub fn reset_pose(&mut self) {
        let unit = self.unit();
        match self.selected.clone() {
            Some(name) => {
                if let Some(body) = self.body_mut(&name) {
                    body.reset(unit, None);
                }
            }
            None => {
                for body in &mut self.bodies {
                    body.reset(unit, None);
                }
            }
        }
    }

    /// Resize the canvas. Dimensions below the minimum are rejected as a
    /// guard against degenerate canvases; returns whether the resize applied.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width < MIN_CANVAS_SIZE || height < MIN_CANVAS_SIZE {
            return false;
        }
        self.width = width;
        self.height = height;
        self.camera.set_viewport(width, height);
        self.controls.handle_resize(width, height);
        true
    }

    /// Set the limb width from the slider's pixel value; marks everything
    /// dirty on change so ribbons are rebuilt next frame.
    pub fn set_limb_width(&mut self, width_px: f32) {
        let scale = width_px / LIMB_SIZE;
        if (scale - self.style.width_scale).abs() > f32::EPSILON {
            self.style.width_scale = scale;
            self.mark_all_dirty();
        }
    }

    pub fn set_elliptic_limbs(&mut self, elliptic: bool) {
        if self.style.elliptic != elliptic {
            self.style.elliptic = elliptic;
            self.mark_all_dirty();
        }
    }

    pub fn set_fixed_roll(&mut self, fixed: bool) {
        self.camera.fixed_roll = fixed;
    }

    pub fn set_low_fps(&mut self, low: bool) {
        self.low_fps = low;
    }

    pub fn mark_all_dirty(&mut self) {
        for body in &mut self.bodies {
            body.mark_all_dirty();
        }
    }

    /// Cast a ray through the pointer position against every joint handle
    /// and return the nearest hit.
    pub fn pick(&self, sx: f32, sy: f32) -> Option<PickHit> {
        let (origin, dir) = self.camera.screen_ray(sx, sy, self.width, self.height);
        let radius = JOINT_RADIUS / self.camera.zoom.max(1e-6);
        let mut best: Option<PickHit> = None;
        for (&target, joint_ref) in &self.targets {
            let Some(body) = self.body(&joint_ref.body) else {
                continue;
            };
            let center = body.joint_world(joint_ref.joint);
            if let Some(t) = ray_sphere(origin, dir, center, radius) {
                if best.as_ref().map_or(true, |b| t < b.distance) {
                    best = Some(PickHit {
                        target,
                        body: joint_ref.body.clone(),
                        joint: joint_ref.joint,
                        distance: t,
                    });
                }
            }
        }
        best
    }

    /// Per-frame update: apply the fixed-roll constraint, keep joint handles
    /// at constant screen size, and lazily rebuild ribbons for dirty bodies
    /// or after a zoom change. Returns whether any geometry changed.
    pub fn update(&mut self) -> bool {
        if self.camera.fixed_roll {
            self.camera.up = Vec3::Y;
        }
        let zoom = self.camera.zoom;
        let zoom_changed = self.last_zoom != zoom;
        let handle_scale = Vec3::splat(1.0 / zoom.max(1e-6));
        let mut changed = false;
        for body in &mut self.bodies {
            for joint in body.joints.iter_mut() {
                joint.transform.scale = handle_scale;
            }
            changed |= body.refresh_limbs(zoom, &self.style, zoom_changed);
        }
        self.last_zoom = zoom;
        if changed {
            self.geometry_epoch += 1;
        }
        changed
    }

    /// Screen-space bounds of a body's joints with the indicator margin.
    pub fn body_screen_rect(&self, name: &str) -> Option<ScreenRect> {
        let body = self.body(name)?;
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for joint in body.joints.iter() {
            let world = body.group.transform_point(joint.transform.position);
            let px = self.camera.project_to_screen(world, self.width, self.height);
            min = min.min(px);
            max = max.max(px);
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        Some(ScreenRect {
            min: min - INDICATOR_MARGIN_PX,
            max: max + INDICATOR_MARGIN_PX,
        })
    }

    pub fn hover_rect(&self) -> Option<ScreenRect> {
        self.hovered
            .as_deref()
            .and_then(|name| self.body_screen_rect(name))
    }

    pub fn selection_rect(&self) -> Option<ScreenRect> {
        self.selected
            .as_deref()
            .and_then(|name| self.body_screen_rect(name))
    }
}
