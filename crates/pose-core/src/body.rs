use crate::constants::{LIMB_SAMPLES, LIMB_SIZE};
use crate::skeleton::{self, JOINT_COUNT, LIMB_COUNT, LIMB_PAIRS};
use crate::transform::Transform;
use glam::Vec3;
use smallvec::SmallVec;

/// One manipulable joint handle. `dirty` is set whenever the transform
/// changes and cleared once dependent limb geometry has been recomputed.
#[derive(Clone, Debug)]
pub struct Joint {
    pub index: usize,
    pub transform: Transform,
    pub dirty: bool,
}

impl Joint {
    #[inline]
    pub fn name(&self) -> &'static str {
        skeleton::joint_name(self.index)
    }

    #[inline]
    pub fn color(&self) -> [u8; 3] {
        skeleton::joint_color(self.index)
    }
}

/// Sampled ribbon geometry for one limb: interpolated points between the two
/// endpoint joints plus a per-sample half-width in world units.
#[derive(Clone, Debug, Default)]
pub struct Ribbon {
    pub points: Vec<Vec3>,
    pub half_widths: Vec<f32>,
}

impl Ribbon {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Limb {
    pub from: usize,
    pub to: usize,
    pub ribbon: Ribbon,
}

impl Limb {
    #[inline]
    pub fn color(index: usize) -> [u8; 3] {
        skeleton::limb_color(index)
    }
}

/// Limb rendering parameters shared by every body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimbStyle {
    /// User multiplier on the base limb width (slider value / base width).
    pub width_scale: f32,
    /// Elliptical profile tapering to zero at both ends; otherwise a
    /// constant-width stick.
    pub elliptic: bool,
}

impl Default for LimbStyle {
    fn default() -> Self {
        Self {
            width_scale: 1.0,
            elliptic: true,
        }
    }
}

impl LimbStyle {
    /// Half-width at normalized position `p` along the limb. Width scales
    /// inversely with zoom so limbs keep a constant on-screen thickness.
    #[inline]
    pub fn half_width(&self, p: f32, zoom: f32) -> f32 {
        let zoom = zoom.max(1e-6);
        if self.elliptic {
            // Ellipse through both endpoints: y^2 = b^2 (1 - (2p-1)^2)
            let b = 2.0 * LIMB_SIZE * self.width_scale / zoom;
            let pp = 2.0 * p - 1.0;
            b * (1.0 - pp * pp).max(0.0).sqrt()
        } else {
            LIMB_SIZE * self.width_scale / zoom
        }
    }
}

/// One skeleton instance: 18 joints and 17 limb ribbons grouped under a
/// shared transform, placed at `origin`.
#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    pub origin: Vec3,
    pub group: Transform,
    pub joints: SmallVec<[Joint; JOINT_COUNT]>,
    pub limbs: SmallVec<[Limb; LIMB_COUNT]>,
    pub dirty: bool,
}

impl Body {
    /// Build a body from the rest pose scaled by `unit` and offset by
    /// `origin`. Ribbons start degenerate and fill in on the first frame.
    pub fn new(name: impl Into<String>, unit: f32, origin: Vec3) -> Self {
        let joints = (0..JOINT_COUNT)
            .map(|i| {
                let rest = skeleton::rest_position(i);
                Joint {
                    index: i,
                    transform: Transform::from_position(rest_world(rest, unit, origin)),
                    dirty: true,
                }
            })
            .collect();
        let limbs = LIMB_PAIRS
            .iter()
            .map(|&(from, to)| Limb {
                from,
                to,
                ribbon: Ribbon::default(),
            })
            .collect();
        Self {
            name: name.into(),
            origin,
            group: Transform::default(),
            joints,
            limbs,
            dirty: true,
        }
    }

    /// Move every joint back to the rest layout. `origin` overrides the
    /// body's own origin when given (the all-reset path recenters at zero).
    /// Only joint positions are touched, matching the interactive tools
    /// which never rotate individual joints.
    pub fn reset(&mut self, unit: f32, origin: Option<Vec3>) {
        let d = origin.unwrap_or(self.origin);
        for joint in self.joints.iter_mut() {
            let rest = skeleton::rest_position(joint.index);
            joint.transform.position = rest_world(rest, unit, d);
            joint.dirty = true;
        }
        self.group.position = Vec3::ZERO;
        self.dirty = true;
    }

    #[inline]
    pub fn joint_world(&self, index: usize) -> Vec3 {
        self.group.transform_point(self.joints[index].transform.position)
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = true;
        for joint in self.joints.iter_mut() {
            joint.dirty = true;
        }
    }

    /// Recompute ribbons for limbs whose endpoints moved, then clear the
    /// dirty flags. Returns true if any ribbon changed. A zoom change
    /// invalidates every ribbon because widths depend on zoom.
    pub fn refresh_limbs(&mut self, zoom: f32, style: &LimbStyle, zoom_changed: bool) -> bool {
        if !self.dirty && !zoom_changed {
            return false;
        }
        let mut changed = false;
        for i in 0..self.limbs.len() {
            let (from, to) = (self.limbs[i].from, self.limbs[i].to);
            if self.joints[from].dirty || self.joints[to].dirty || zoom_changed {
                let a = self.joint_world(from);
                let b = self.joint_world(to);
                sample_ribbon(&mut self.limbs[i].ribbon, a, b, zoom, style);
                changed = true;
            }
        }
        for joint in self.joints.iter_mut() {
            joint.dirty = false;
        }
        self.dirty = false;
        changed
    }
}

#[inline]
fn rest_world(rest: Vec3, unit: f32, origin: Vec3) -> Vec3 {
    // z stays in normalized units; only x/y scale with the canvas.
    Vec3::new(
        rest.x * unit + origin.x,
        rest.y * unit + origin.y,
        rest.z + origin.z,
    )
}

fn sample_ribbon(ribbon: &mut Ribbon, a: Vec3, b: Vec3, zoom: f32, style: &LimbStyle) {
    ribbon.points.resize(LIMB_SAMPLES, Vec3::ZERO);
    ribbon.half_widths.resize(LIMB_SAMPLES, 0.0);
    let n = (LIMB_SAMPLES - 1) as f32;
    for i in 0..LIMB_SAMPLES {
        let p = i as f32 / n;
        ribbon.points[i] = a.lerp(b, p);
        ribbon.half_widths[i] = style.half_width(p, zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::LIMB_SAMPLES;

    #[test]
    fn new_body_places_joints_from_rest_pose() {
        let body = Body::new("b", 100.0, Vec3::new(10.0, 20.0, 0.0));
        // neck rests at (0, 0.25, 0)
        let neck = body.joints[1].transform.position;
        assert!((neck.x - 10.0).abs() < 1e-5);
        assert!((neck.y - 45.0).abs() < 1e-5);
        assert!(body.dirty && body.joints.iter().all(|j| j.dirty));
    }

    #[test]
    fn refresh_skips_clean_bodies() {
        let mut body = Body::new("b", 100.0, Vec3::ZERO);
        assert!(body.refresh_limbs(1.0, &LimbStyle::default(), false));
        assert!(!body.dirty);
        // second pass with nothing dirty and no zoom change does no work
        assert!(!body.refresh_limbs(1.0, &LimbStyle::default(), false));
    }

    #[test]
    fn ribbon_endpoints_track_joint_world_positions() {
        let mut body = Body::new("b", 100.0, Vec3::ZERO);
        body.group.position = Vec3::new(5.0, 0.0, 0.0);
        body.refresh_limbs(1.0, &LimbStyle::default(), false);
        for limb in body.limbs.iter() {
            let first = limb.ribbon.points[0];
            let last = limb.ribbon.points[LIMB_SAMPLES - 1];
            assert!((first - body.joint_world(limb.from)).length() < 1e-4);
            assert!((last - body.joint_world(limb.to)).length() < 1e-4);
        }
    }

    #[test]
    fn elliptic_profile_tapers_to_zero() {
        let style = LimbStyle {
            width_scale: 1.0,
            elliptic: true,
        };
        assert!(style.half_width(0.0, 1.0).abs() < 1e-5);
        assert!(style.half_width(1.0, 1.0).abs() < 1e-5);
        assert!((style.half_width(0.5, 1.0) - 2.0 * LIMB_SIZE).abs() < 1e-5);
    }

    #[test]
    fn stick_profile_is_constant_and_zoom_scaled() {
        let style = LimbStyle {
            width_scale: 1.0,
            elliptic: false,
        };
        assert_eq!(style.half_width(0.1, 1.0), style.half_width(0.9, 1.0));
        assert!((style.half_width(0.5, 2.0) - LIMB_SIZE / 2.0).abs() < 1e-5);
    }

    #[test]
    fn reset_restores_rest_layout_and_clears_group_offset() {
        let mut body = Body::new("b", 100.0, Vec3::new(3.0, 4.0, 0.0));
        body.joints[4].transform.position = Vec3::new(900.0, 900.0, 0.0);
        body.group.position = Vec3::new(50.0, 0.0, 0.0);
        body.refresh_limbs(1.0, &LimbStyle::default(), false);
        body.reset(100.0, None);
        let fresh = Body::new("b", 100.0, Vec3::new(3.0, 4.0, 0.0));
        for (a, b) in body.joints.iter().zip(fresh.joints.iter()) {
            assert!((a.transform.position - b.transform.position).length() < 1e-5);
        }
        assert_eq!(body.group.position, Vec3::ZERO);
        assert!(body.dirty);
    }
}
