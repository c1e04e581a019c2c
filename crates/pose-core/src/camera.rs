use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Orthographic camera sized to the canvas. The frustum spans the canvas in
/// pixels so world units are screen pixels at zoom 1; `zoom` scales the
/// projection, not the camera position.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    pub position: Vec3,
    /// XYZ Euler radians, kept in sync by look-at so it can be serialized.
    pub rotation: Vec3,
    pub up: Vec3,
    pub zoom: f32,
    /// When set, the up vector is forced to world-up every frame so orbit
    /// input cannot roll the view.
    pub fixed_roll: bool,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
}

impl OrthoCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            up: Vec3::Y,
            zoom: 1.0,
            fixed_roll: false,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: 1.0,
            far: 1.0,
        };
        cam.set_viewport(width, height);
        cam
    }

    /// Refit the frustum to a canvas size. Also pulls the camera back far
    /// enough that rotated bodies stay inside the near/far range.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let w = width as f32;
        let h = height as f32;
        self.left = -w / 2.0;
        self.right = w / 2.0;
        self.top = h / 2.0;
        self.bottom = -h / 2.0;
        self.near = 1.0;
        self.far = w * 4.0;
        self.position.z = w.max(h) * 2.0;
    }

    pub fn reset(&mut self, width: u32, height: u32) {
        self.position = Vec3::new(0.0, 0.0, (width.max(height) as f32) * 2.0);
        self.rotation = Vec3::ZERO;
        self.up = Vec3::Y;
        self.zoom = 1.0;
    }

    /// Frustum half extents (right, top) before zoom is applied.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.right, self.top)
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// World-space view direction (-Z of the camera frame).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.quat() * Vec3::NEG_Z
    }

    /// Orient the camera toward `target` using the current up vector,
    /// storing the result back into the Euler rotation.
    pub fn look_at(&mut self, target: Vec3) {
        let view = Mat4::look_at_rh(self.position, target, self.up);
        let (_, rot, _) = view.inverse().to_scale_rotation_translation();
        let (x, y, z) = rot.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quat(), self.position).inverse()
    }

    #[inline]
    pub fn proj_matrix(&self) -> Mat4 {
        let zoom = self.zoom.max(1e-6);
        Mat4::orthographic_rh(
            self.left / zoom,
            self.right / zoom,
            self.bottom / zoom,
            self.top / zoom,
            self.near,
            self.far,
        )
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.proj_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates
    /// (x/y in [-1,1], depth in [0,1]).
    #[inline]
    pub fn project_ndc(&self, world: Vec3) -> Vec3 {
        self.view_proj().project_point3(world)
    }

    /// Project a world point to canvas pixels (origin top-left).
    pub fn project_to_screen(&self, world: Vec3, width: u32, height: u32) -> Vec2 {
        let ndc = self.project_ndc(world);
        let w = width as f32;
        let h = height as f32;
        Vec2::new((ndc.x + 1.0) * w / 2.0, h - (ndc.y + 1.0) * h / 2.0)
    }

    /// Compute a world-space picking ray from canvas pixel coordinates.
    /// Orthographic, so rays are parallel to the view direction.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: u32, height: u32) -> (Vec3, Vec3) {
        let w = (width as f32).max(1.0);
        let h = (height as f32).max(1.0);
        let ndc_x = (2.0 * sx / w) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / h);
        let inv = self.view_proj().inverse();
        let p_near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let p_far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let dir = (p_far - p_near).normalize_or_zero();
        (p_near, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frustum_half_extents_match_canvas() {
        let cam = OrthoCamera::new(64, 64);
        assert_eq!(cam.left, -32.0);
        assert_eq!(cam.right, 32.0);
        assert_eq!(cam.top, 32.0);
        assert_eq!(cam.bottom, -32.0);
        assert_eq!(cam.far, 256.0);
        assert_eq!(cam.position.z, 128.0);
    }

    #[test]
    fn default_view_looks_down_negative_z() {
        let cam = OrthoCamera::new(512, 512);
        let fwd = cam.forward();
        assert!((fwd - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn center_pixel_ray_passes_through_origin() {
        let cam = OrthoCamera::new(512, 512);
        let (origin, dir) = cam.screen_ray(256.0, 256.0, 512, 512);
        assert!(origin.x.abs() < 1e-3 && origin.y.abs() < 1e-3);
        assert!((dir - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn project_screen_round_trips_world_origin() {
        let cam = OrthoCamera::new(640, 480);
        let px = cam.project_to_screen(Vec3::ZERO, 640, 480);
        assert!((px.x - 320.0).abs() < 1e-3);
        assert!((px.y - 240.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_scales_projected_offsets() {
        let mut cam = OrthoCamera::new(400, 400);
        let p = Vec3::new(50.0, 0.0, 0.0);
        let at_one = cam.project_to_screen(p, 400, 400).x - 200.0;
        cam.zoom = 2.0;
        let at_two = cam.project_to_screen(p, 400, 400).x - 200.0;
        assert!((at_two - at_one * 2.0).abs() < 1e-3);
    }
}
