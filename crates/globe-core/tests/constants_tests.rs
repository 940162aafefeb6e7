// Host-side tests for tuning constants and their relationships.

use globe_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MARKER_COUNT > 0);
    assert!(MARKER_SCALE > 0.0);
    assert!(DRAG_SENSITIVITY > 0.0);
    assert!(AUTO_ROTATE_SPEED > 0.0);

    // Momentum must die out, never grow or oscillate
    assert!(VELOCITY_DECAY > 0.0 && VELOCITY_DECAY < 1.0);

    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(CAMERA_FOVY_DEGREES > 0.0 && CAMERA_FOVY_DEGREES < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    // Markers float above the globe, and the camera sits outside both
    assert!(MARKER_ORBIT_RADIUS > GLOBE_RADIUS);
    assert!(CAMERA_Z > MARKER_ORBIT_RADIUS + MARKER_SCALE);

    // Auto-rotation is a gentle drift compared to one pixel of drag
    assert!(AUTO_ROTATE_SPEED < DRAG_SENSITIVITY);
}

#[test]
fn default_marker_uri_is_absolute() {
    assert!(DEFAULT_MARKER_URI.starts_with("https://"));
}
