// Host-side tests for pointer normalization and sprite hit testing.

use glam::{Mat4, Vec3};
use globe_core::*;

fn center_ray(camera: &Camera) -> Ray {
    camera.ray_through(0.0, 0.0)
}

fn marker(id: usize, position: Vec3) -> LoadedMarker<'static, u32> {
    LoadedMarker {
        id: MarkerId(id),
        position,
        asset: &0,
    }
}

#[test]
fn corners_map_to_unit_square() {
    let vp = Viewport::new(800.0, 600.0);
    let tl = PickRequest::from_pixels(0.0, 0.0, vp).unwrap();
    assert_eq!((tl.normalized_x, tl.normalized_y), (-1.0, 1.0));
    let br = PickRequest::from_pixels(800.0, 600.0, vp).unwrap();
    assert_eq!((br.normalized_x, br.normalized_y), (1.0, -1.0));
    let c = PickRequest::from_pixels(400.0, 300.0, vp).unwrap();
    assert_eq!((c.normalized_x, c.normalized_y), (0.0, 0.0));
}

#[test]
fn empty_viewport_yields_no_request() {
    assert!(PickRequest::from_pixels(10.0, 10.0, Viewport::new(0.0, 0.0)).is_none());
}

#[test]
fn billboard_hit_and_miss() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        dir: Vec3::NEG_Z,
    };
    let hit = ray_billboard(&ray, Vec3::new(0.2, 0.0, 1.0), 0.5, Vec3::X, Vec3::Y, Vec3::NEG_Z);
    assert!((hit.unwrap() - 4.0).abs() < 1e-6);
    let miss = ray_billboard(&ray, Vec3::new(0.3, 0.0, 1.0), 0.5, Vec3::X, Vec3::Y, Vec3::NEG_Z);
    assert!(miss.is_none());
}

#[test]
fn billboard_behind_origin_is_ignored() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        dir: Vec3::NEG_Z,
    };
    let behind = ray_billboard(&ray, Vec3::new(0.0, 0.0, 6.0), 0.5, Vec3::X, Vec3::Y, Vec3::NEG_Z);
    assert!(behind.is_none());
}

#[test]
fn nearest_of_two_markers_on_one_ray_wins() {
    let camera = Camera::default();
    let ray = center_ray(&camera);
    let front = marker(1, Vec3::new(0.0, 0.0, MARKER_ORBIT_RADIUS));
    let back = marker(0, Vec3::new(0.0, 0.0, -MARKER_ORBIT_RADIUS));

    // order of the candidates must not matter
    for markers in [[back, front], [front, back]] {
        let hit = pick_nearest(&ray, &camera, Mat4::IDENTITY, MARKER_SCALE, markers).unwrap();
        assert_eq!(hit.id, MarkerId(1));
        assert!((hit.t - (CAMERA_Z - MARKER_ORBIT_RADIUS)).abs() < 1e-3);
    }
}

#[test]
fn back_marker_alone_is_still_hit() {
    let camera = Camera::default();
    let ray = center_ray(&camera);
    let back = marker(0, Vec3::new(0.0, 0.0, -MARKER_ORBIT_RADIUS));
    let hit = pick_nearest(&ray, &camera, Mat4::IDENTITY, MARKER_SCALE, [back]).unwrap();
    assert_eq!(hit.id, MarkerId(0));
    assert!((hit.t - (CAMERA_Z + MARKER_ORBIT_RADIUS)).abs() < 1e-3);
}

#[test]
fn model_rotation_changes_which_marker_is_nearest() {
    let camera = Camera::default();
    let ray = center_ray(&camera);
    let a = marker(0, Vec3::new(0.0, 0.0, MARKER_ORBIT_RADIUS));
    let b = marker(1, Vec3::new(0.0, 0.0, -MARKER_ORBIT_RADIUS));
    let half_turn = Mat4::from_rotation_y(std::f32::consts::PI);
    let hit = pick_nearest(&ray, &camera, half_turn, MARKER_SCALE, [a, b]).unwrap();
    assert_eq!(hit.id, MarkerId(1));
}

#[test]
fn no_markers_means_no_hit() {
    let camera = Camera::default();
    let ray = center_ray(&camera);
    let none: [LoadedMarker<'static, u32>; 0] = [];
    assert!(pick_nearest(&ray, &camera, Mat4::IDENTITY, MARKER_SCALE, none).is_none());
}
