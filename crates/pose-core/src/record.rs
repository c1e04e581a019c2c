use crate::scene::Scene;
use crate::transform::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Euler rotation on the wire: three angles plus the rotation order tag.
pub type EulerRotation = (f32, f32, f32, String);

const EULER_ORDER: &str = "XYZ";

/// One object transform in the persisted format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseDict {
    pub position: [f32; 3],
    pub rotation: EulerRotation,
    pub scale: [f32; 3],
    pub up: [f32; 3],
}

impl From<&Transform> for PoseDict {
    fn from(t: &Transform) -> Self {
        Self {
            position: t.position.to_array(),
            rotation: (t.rotation.x, t.rotation.y, t.rotation.z, EULER_ORDER.to_string()),
            scale: t.scale.to_array(),
            up: t.up.to_array(),
        }
    }
}

impl PoseDict {
    pub fn to_transform(&self) -> Transform {
        Transform {
            position: Vec3::from_array(self.position),
            rotation: Vec3::new(self.rotation.0, self.rotation.1, self.rotation.2),
            scale: Vec3::from_array(self.scale),
            up: Vec3::from_array(self.up),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenRecord {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    #[serde(flatten)]
    pub pose: PoseDict,
    pub zoom: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub joints: Vec<PoseDict>,
    pub group: PoseDict,
    pub x0: f32,
    pub y0: f32,
    pub z0: f32,
}

/// The serialized snapshot of full scene state used for save/load.
/// Field names match the persisted wire format; `joints` at the top level
/// is the body list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub screen: ScreenRecord,
    pub camera: CameraRecord,
    pub joints: Vec<BodyRecord>,
}

impl Scene {
    /// Capture the full scene state. `image` is the background-free canvas
    /// snapshot the caller captured beforehand.
    pub fn to_record(&self, name: impl Into<String>, image: Option<String>) -> PoseRecord {
        let camera_pose = Transform {
            position: self.camera.position,
            rotation: self.camera.rotation,
            scale: Vec3::ONE,
            up: self.camera.up,
        };
        PoseRecord {
            name: name.into(),
            image,
            screen: ScreenRecord {
                width: self.width(),
                height: self.height(),
            },
            camera: CameraRecord {
                pose: PoseDict::from(&camera_pose),
                zoom: self.camera.zoom,
            },
            joints: self
                .bodies()
                .iter()
                .map(|body| BodyRecord {
                    name: body.name.clone(),
                    joints: body
                        .joints
                        .iter()
                        .map(|j| PoseDict::from(&j.transform))
                        .collect(),
                    group: PoseDict::from(&body.group),
                    x0: body.origin.x,
                    y0: body.origin.y,
                    z0: body.origin.z,
                })
                .collect(),
        }
    }

    /// Fully replace scene state from a record: drop every body and its hit
    /// targets, restore screen size and camera, then recreate the recorded
    /// bodies. The auto-name counter is resynchronized so later additions
    /// cannot collide with restored names.
    pub fn load_record(&mut self, record: &PoseRecord) {
        self.hovered = None;
        self.selected = None;
        for name in self.body_names() {
            self.remove_body(&name);
        }

        self.resize(record.screen.width, record.screen.height);

        let cam = record.camera.pose.to_transform();
        self.camera.position = cam.position;
        self.camera.rotation = cam.rotation;
        self.camera.up = cam.up;
        self.camera.zoom = record.camera.zoom;

        self.body_counter = record
            .joints
            .iter()
            .filter_map(|b| auto_name_suffix(&b.name))
            .max()
            .map_or(0, |n| n + 1);

        for body_record in &record.joints {
            let origin = Vec3::new(body_record.x0, body_record.y0, body_record.z0);
            self.add_body(&body_record.name, origin);
            let body = self
                .body_mut(&body_record.name)
                .expect("body was just added");
            for (joint, dict) in body.joints.iter_mut().zip(&body_record.joints) {
                joint.transform = dict.to_transform();
                joint.dirty = true;
            }
            body.group = body_record.group.to_transform();
            body.dirty = true;
        }
        log::info!(
            "[pose] loaded record {:?}: {} bodies, {}x{}",
            record.name,
            record.joints.len(),
            record.screen.width,
            record.screen.height
        );
    }
}

/// Numeric suffix of auto-generated `body_<n>` names.
fn auto_name_suffix(name: &str) -> Option<u32> {
    let digits = name.strip_prefix("body_")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_name_suffix_accepts_only_numeric_suffixes() {
        assert_eq!(auto_name_suffix("body_0"), Some(0));
        assert_eq!(auto_name_suffix("body_17"), Some(17));
        assert_eq!(auto_name_suffix("body_"), None);
        assert_eq!(auto_name_suffix("body_x1"), None);
        assert_eq!(auto_name_suffix("default"), None);
    }

    #[test]
    fn pose_dict_round_trips_transform() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            scale: Vec3::new(0.5, 0.5, 0.5),
            up: Vec3::Y,
        };
        let dict = PoseDict::from(&t);
        assert_eq!(dict.rotation.3, "XYZ");
        assert_eq!(dict.to_transform(), t);
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let scene = Scene::new(512, 512);
        let record = scene.to_record("test", None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("screen").is_some());
        assert_eq!(json["screen"]["width"], 512);
        assert!(json["camera"].get("zoom").is_some());
        assert!(json["camera"].get("position").is_some());
        let bodies = json["joints"].as_array().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["name"], "default");
        assert_eq!(bodies[0]["joints"].as_array().unwrap().len(), 18);
        // rotation is a 4-array: three angles plus the order tag
        assert_eq!(bodies[0]["group"]["rotation"].as_array().unwrap().len(), 4);
    }
}
