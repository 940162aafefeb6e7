// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn local_point_is_relative_to_rect_origin() {
    let p = local_point(
        Vec2::new(150.0, 80.0),
        Vec2::new(100.0, 50.0),
        Vec2::new(400.0, 300.0),
    )
    .unwrap();
    assert!((p.x - 50.0).abs() < 1e-6);
    assert!((p.y - 30.0).abs() < 1e-6);
}

#[test]
fn local_point_rejects_points_outside_the_rect() {
    let origin = Vec2::new(10.0, 10.0);
    let size = Vec2::new(100.0, 100.0);
    assert!(local_point(Vec2::new(5.0, 50.0), origin, size).is_none());
    assert!(local_point(Vec2::new(50.0, 111.0), origin, size).is_none());
    // edges count as inside
    assert!(local_point(Vec2::new(110.0, 110.0), origin, size).is_some());
}

#[test]
fn local_point_rejects_empty_rect() {
    assert!(local_point(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 100.0)).is_none());
    assert!(local_point(Vec2::ZERO, Vec2::ZERO, Vec2::new(100.0, 0.0)).is_none());
}

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(Vec2::new(800.0, 600.0), 1.0), (800, 600));
    assert_eq!(backing_size(Vec2::new(800.0, 600.0), 2.0), (1600, 1200));
}

#[test]
fn backing_size_is_never_zero() {
    assert_eq!(backing_size(Vec2::ZERO, 2.0), (1, 1));
    assert_eq!(backing_size(Vec2::new(0.2, 0.2), 1.0), (1, 1));
}
