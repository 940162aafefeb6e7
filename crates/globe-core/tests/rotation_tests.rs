// Host-side tests for drag, momentum decay and auto-rotation.

use globe_core::*;

fn controller(auto_rotate_speed: f32) -> RotationController {
    RotationController::new(RotationParams {
        sensitivity: 0.005,
        auto_rotate_speed,
        decay: 0.95,
    })
}

#[test]
fn drag_applies_pixel_delta_times_sensitivity() {
    let mut rc = controller(AUTO_ROTATE_SPEED);
    rc.begin_drag(100.0, 100.0);
    rc.drag_to(150.0, 130.0);
    let s = rc.state();
    assert!((s.angle_y - 0.25).abs() < 1e-6);
    assert!((s.angle_x - 0.15).abs() < 1e-6);
    assert!((s.velocity_x - 0.25).abs() < 1e-6);
    assert!((s.velocity_y - 0.15).abs() < 1e-6);
    assert!(s.dragging);
}

#[test]
fn drag_deltas_accumulate_per_move_not_per_frame() {
    let mut rc = controller(AUTO_ROTATE_SPEED);
    rc.begin_drag(0.0, 0.0);
    let mut x = 0.0;
    for _ in 0..10 {
        x += 10.0;
        rc.drag_to(x, 0.0);
        // frames keep arriving while the pointer is held
        rc.tick();
        rc.tick();
    }
    let s = rc.state();
    assert!((s.angle_y - 100.0 * 0.005).abs() < 1e-5);
    assert!((s.velocity_x - 10.0 * 0.005).abs() < 1e-6);
}

#[test]
fn momentum_decays_geometrically_after_release() {
    let mut rc = controller(AUTO_ROTATE_SPEED);
    rc.begin_drag(100.0, 100.0);
    rc.drag_to(150.0, 130.0);
    rc.end_drag();
    let v0 = (rc.state().velocity_x, rc.state().velocity_y);
    for k in 1..=60 {
        rc.tick();
        let f = 0.95_f32.powi(k);
        let s = rc.state();
        assert!((s.velocity_x - v0.0 * f).abs() < 1e-6, "k={k}");
        assert!((s.velocity_y - v0.1 * f).abs() < 1e-6, "k={k}");
    }
    for _ in 0..2000 {
        rc.tick();
    }
    assert!(rc.state().velocity_x.abs() < 1e-9);
    assert!(rc.state().velocity_y.abs() < 1e-9);
}

#[test]
fn velocity_never_flips_sign_while_free() {
    let mut rc = controller(AUTO_ROTATE_SPEED);
    rc.begin_drag(0.0, 0.0);
    rc.drag_to(-40.0, 25.0);
    rc.end_drag();
    let mut prev = *rc.state();
    for _ in 0..500 {
        rc.tick();
        let s = *rc.state();
        assert!(s.velocity_x <= 0.0 && s.velocity_x.abs() <= prev.velocity_x.abs());
        assert!(s.velocity_y >= 0.0 && s.velocity_y.abs() <= prev.velocity_y.abs());
        prev = s;
    }
}

#[test]
fn idle_ticks_auto_rotate_around_y_only() {
    let mut rc = controller(0.002);
    for _ in 0..100 {
        rc.tick();
    }
    let s = rc.state();
    assert!((s.angle_y - 0.2).abs() < 1e-5);
    assert_eq!(s.angle_x, 0.0);
}

#[test]
fn release_adds_momentum_on_top_of_auto_rotation() {
    let mut rc = controller(0.002);
    rc.begin_drag(0.0, 0.0);
    rc.drag_to(20.0, 0.0);
    rc.end_drag();
    let before = rc.state().angle_y;
    rc.tick();
    let after = rc.state().angle_y;
    assert!((after - before - (0.002 + 0.1)).abs() < 1e-6);
}

#[test]
fn moves_after_leave_are_ignored() {
    let mut rc = controller(0.0);
    rc.begin_drag(0.0, 0.0);
    rc.drag_to(8.0, 4.0);
    rc.end_drag();
    let released = *rc.state();
    rc.drag_to(200.0, 200.0);
    assert_eq!(*rc.state(), released);
    assert!(!rc.is_dragging());
}
