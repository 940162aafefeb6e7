//! Pointer → marker selection.
//!
//! A click is normalized to device coordinates, turned into a camera ray and
//! tested against the loaded markers only. Markers are camera-facing square
//! sprites, so the hit test is a ray/plane intersection followed by an
//! extent check along the camera's right and up axes.

use crate::camera::{Camera, Ray, Viewport};
use crate::registry::{LoadedMarker, MarkerId};
use glam::{Mat4, Vec3};

/// Click position in normalized device coordinates, both in `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickRequest {
    pub normalized_x: f32,
    pub normalized_y: f32,
}

impl PickRequest {
    /// Convert pixel coordinates (origin top-left) into device coordinates
    /// (origin centre, y up). Returns `None` for an empty viewport.
    pub fn from_pixels(px: f32, py: f32, viewport: Viewport) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }
        Some(Self {
            normalized_x: 2.0 * px / viewport.width - 1.0,
            normalized_y: 1.0 - 2.0 * py / viewport.height,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub id: MarkerId,
    pub t: f32,
}

/// Ray parameter where `ray` crosses a camera-facing square of side `size`
/// centred at `center`, or `None` if it misses or lies behind the origin.
#[inline]
pub fn ray_billboard(
    ray: &Ray,
    center: Vec3,
    size: f32,
    right: Vec3,
    up: Vec3,
    normal: Vec3,
) -> Option<f32> {
    let denom = ray.dir.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let local = ray.at(t) - center;
    let half = size * 0.5;
    (local.dot(right).abs() <= half && local.dot(up).abs() <= half).then_some(t)
}

/// Nearest marker sprite along `ray`. `model` places local marker positions in
/// the world (the group rotation).
pub fn pick_nearest<'a, A: 'a, I>(
    ray: &Ray,
    camera: &Camera,
    model: Mat4,
    sprite_size: f32,
    markers: I,
) -> Option<PickHit>
where
    I: IntoIterator<Item = LoadedMarker<'a, A>>,
{
    let (right, up) = camera.billboard_axes();
    let normal = camera.forward();
    let mut best = None::<PickHit>;
    for m in markers {
        let center = model.transform_point3(m.position);
        if let Some(t) = ray_billboard(ray, center, sprite_size, right, up, normal) {
            match best {
                Some(b) if t >= b.t => {}
                _ => best = Some(PickHit { id: m.id, t }),
            }
        }
    }
    best
}
