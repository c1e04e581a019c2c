use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position/rotation/scale of one scene object, plus the up vector that
/// look-at style camera math consumes. Rotation is XYZ Euler in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub up: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            up: Vec3::Y,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
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

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Apply this transform to a local-space point.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }

    /// Map a world-space point back into this transform's local space.
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix().inverse().transform_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_points() {
        let t = Transform::default();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(p), p);
        assert_eq!(t.inverse_transform_point(p), p);
    }

    #[test]
    fn translation_applies_and_inverts() {
        let t = Transform::from_position(Vec3::new(10.0, -5.0, 2.0));
        let p = Vec3::new(1.0, 1.0, 1.0);
        let w = t.transform_point(p);
        assert_eq!(w, Vec3::new(11.0, -4.0, 3.0));
        let back = t.inverse_transform_point(w);
        assert!((back - p).length() < 1e-5);
    }
}
