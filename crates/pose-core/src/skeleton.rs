//! Static skeleton topology: joint names, colors, limb connectivity and the
//! normalized rest pose. Immutable for the process lifetime.

use glam::Vec3;

pub const JOINT_COUNT: usize = 18;
pub const LIMB_COUNT: usize = 17;

pub const JOINT_NAMES: [&str; JOINT_COUNT] = [
    "nose",
    "neck",
    "right shoulder",
    "right elbow",
    "right wrist",
    "left shoulder",
    "left elbow",
    "left wrist",
    "right hip",
    "right knee",
    "right ankle",
    "left hip",
    "left knee",
    "left ankle",
    "right eye",
    "left eye",
    "right ear",
    "left ear",
];

pub const JOINT_COLORS: [[u8; 3]; JOINT_COUNT] = [
    // r    g    b
    [255, 0, 0],     // 0:  nose
    [255, 85, 0],    // 1:  neck
    [255, 170, 0],   // 2:  right shoulder
    [255, 255, 0],   // 3:  right elbow
    [170, 255, 0],   // 4:  right wrist
    [85, 255, 0],    // 5:  left shoulder
    [0, 255, 0],     // 6:  left elbow
    [0, 255, 85],    // 7:  left wrist
    [0, 255, 170],   // 8:  right hip
    [0, 255, 255],   // 9:  right knee
    [0, 170, 255],   // 10: right ankle
    [0, 85, 255],    // 11: left hip
    [0, 0, 255],     // 12: left knee
    [85, 0, 255],    // 13: left ankle
    [170, 0, 255],   // 14: right eye
    [255, 0, 255],   // 15: left eye
    [255, 0, 170],   // 16: right ear
    [255, 0, 85],    // 17: left ear
];

pub const LIMB_PAIRS: [(usize, usize); LIMB_COUNT] = [
    (1, 2),   // 0:  right shoulder
    (1, 5),   // 1:  left shoulder
    (2, 3),   // 2:  right upper arm
    (3, 4),   // 3:  right forearm
    (5, 6),   // 4:  left upper arm
    (6, 7),   // 5:  left forearm
    (1, 8),   // 6:  right hip
    (8, 9),   // 7:  right upper leg
    (9, 10),  // 8:  right lower leg
    (1, 11),  // 9:  left hip
    (11, 12), // 10: left upper leg
    (12, 13), // 11: left lower leg
    (1, 0),   // 12: neck
    (0, 14),  // 13: right eye
    (14, 16), // 14: right ear
    (0, 15),  // 15: left eye
    (15, 17), // 16: left ear
];

// Rest pose, x/y normalized to [-0.5, 0.5] with z flat at 0.
pub const REST_POSE: [[f32; 3]; JOINT_COUNT] = [
    [0.000, 0.320, 0.000],   // 0:  nose
    [0.000, 0.250, 0.000],   // 1:  neck
    [-0.084, 0.250, 0.000],  // 2:  right shoulder
    [-0.195, 0.250, 0.000],  // 3:  right elbow
    [-0.312, 0.250, 0.000],  // 4:  right wrist
    [0.084, 0.250, 0.000],   // 5:  left shoulder
    [0.195, 0.250, 0.000],   // 6:  left elbow
    [0.312, 0.250, 0.000],   // 7:  left wrist
    [-0.053, 0.011, 0.000],  // 8:  right hip
    [-0.047, -0.205, 0.000], // 9:  right knee
    [-0.055, -0.391, 0.000], // 10: right ankle
    [0.053, 0.011, 0.000],   // 11: left hip
    [0.047, -0.205, 0.000],  // 12: left knee
    [0.055, -0.391, 0.000],  // 13: left ankle
    [-0.020, 0.348, 0.000],  // 14: right eye
    [0.020, 0.348, 0.000],   // 15: left eye
    [-0.050, 0.334, 0.000],  // 16: right ear
    [0.050, 0.334, 0.000],   // 17: left ear
];

#[inline]
pub fn rest_position(index: usize) -> Vec3 {
    Vec3::from_array(REST_POSE[index])
}

#[inline]
pub fn joint_name(index: usize) -> &'static str {
    JOINT_NAMES[index]
}

#[inline]
pub fn joint_color(index: usize) -> [u8; 3] {
    JOINT_COLORS[index]
}

/// Limb color reuses the joint color table indexed by limb position, not by
/// either endpoint joint. Kept as-is so rendered output matches existing
/// saved poses.
#[inline]
pub fn limb_color(index: usize) -> [u8; 3] {
    JOINT_COLORS[index]
}
