// Shared sizing/interaction constants for the pose scene.

// Joint spheres are authored at this world-space radius and rescaled by
// 1/zoom every frame so they stay the same size on screen.
pub const JOINT_RADIUS: f32 = 4.0;

// Base limb half-width in world units, before the user width multiplier
// and the 1/zoom screen-space correction.
pub const LIMB_SIZE: f32 = 4.0;

// Sample count along one limb ribbon.
pub const LIMB_SAMPLES: usize = 64;

// Limb ribbons render semi-transparent so overlapping limbs stay readable.
pub const LIMB_OPACITY: f32 = 0.6;

// Canvas dimensions below this are rejected by resize.
pub const MIN_CANVAS_SIZE: u32 = 64;

// Pixel margin added around the hover/selection indicator rectangles.
pub const INDICATOR_MARGIN_PX: f32 = 5.0;

// Horizontal pixel offset applied when spawning a body next to the
// reference body.
pub const ADD_BODY_OFFSET_PX: f32 = 32.0;

// Heavy per-frame work is throttled to roughly 30 Hz in low-fps mode.
pub const LOW_FPS_MIN_INTERVAL_MS: f64 = 30.0;

// Name of the body created with a fresh scene.
pub const DEFAULT_BODY_NAME: &str = "default";
