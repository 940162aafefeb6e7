//! Even point layout on a sphere surface.

use glam::Vec3;
use std::f32::consts::PI;

/// Lay out `count` points over a sphere of `radius` using the Fibonacci
/// (golden-angle) construction.
///
/// Points are ordered from the south pole upwards; the output is fully
/// determined by the inputs. A count of zero yields no points and a count of
/// one yields a single point on the equator.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let offset = 2.0 / count as f32;
    let increment = PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|i| {
            let y = i as f32 * offset - 1.0 + offset / 2.0;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = i as f32 * increment;
            Vec3::new(theta.cos() * r * radius, y * radius, theta.sin() * r * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_sits_on_equator() {
        let pts = fibonacci_sphere(1, 2.0);
        assert_eq!(pts.len(), 1);
        assert!((pts[0] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(fibonacci_sphere(0, 1.0).is_empty());
    }

    #[test]
    fn heights_step_evenly() {
        let pts = fibonacci_sphere(4, 1.0);
        let ys: Vec<f32> = pts.iter().map(|p| p.y).collect();
        let expected = [-0.75, -0.25, 0.25, 0.75];
        for (y, e) in ys.iter().zip(expected) {
            assert!((y - e).abs() < 1e-6, "y={y} expected={e}");
        }
    }
}
