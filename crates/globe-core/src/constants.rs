// Shared scene and interaction tuning constants used by both web and native frontends.

// Markers
pub const MARKER_COUNT: usize = 10;
pub const MARKER_ORBIT_RADIUS: f32 = 3.2; // markers float just above the globe surface
pub const MARKER_SCALE: f32 = 0.5; // side of the square sprite, world units
pub const DEFAULT_MARKER_URI: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/0/04/ChatGPT_logo.svg/512px-ChatGPT_logo.svg.png";

// Globe decoration
pub const GLOBE_RADIUS: f32 = 3.0;
pub const GLOBE_DETAIL: u32 = 3; // icosahedron edge subdivisions minus one

// Rotation
pub const DRAG_SENSITIVITY: f32 = 0.005; // radians per pointer pixel
pub const AUTO_ROTATE_SPEED: f32 = 0.002; // radians per tick while free
pub const VELOCITY_DECAY: f32 = 0.95; // per-tick momentum multiplier

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
