// Host-side tests for the Fibonacci sphere layout.

use globe_core::*;

#[test]
fn every_point_lies_on_the_sphere() {
    for &radius in &[0.5_f32, 1.0, 3.2, 42.0] {
        for n in 1..=64 {
            for (i, p) in fibonacci_sphere(n, radius).iter().enumerate() {
                let err = (p.length() - radius).abs();
                assert!(
                    err < 1e-4 * radius.max(1.0),
                    "n={n} r={radius} point {i} has |p|={}",
                    p.length()
                );
            }
        }
    }
}

#[test]
fn points_are_distinct() {
    for n in 2..=100 {
        let pts = fibonacci_sphere(n, 1.0);
        assert_eq!(pts.len(), n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = pts[i].distance(pts[j]);
                assert!(d > 1e-3, "n={n}: points {i} and {j} coincide (d={d})");
            }
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let a = fibonacci_sphere(37, 2.5);
    let b = fibonacci_sphere(37, 2.5);
    assert_eq!(a, b);
}

#[test]
fn ten_markers_first_point_matches_reference() {
    let pts = fibonacci_sphere(10, 3.2);
    let p0 = pts[0];
    // y = -0.9, theta = 0
    let expected_x = (1.0_f32 - 0.81).sqrt() * 3.2;
    assert!((p0.x - expected_x).abs() < 1e-5);
    assert!((p0.x - 1.395).abs() < 1e-3);
    assert!((p0.y - -2.88).abs() < 1e-5);
    assert!(p0.z.abs() < 1e-6);
}

#[test]
fn heights_span_open_interval() {
    let n = 25;
    let r = 3.2;
    let pts = fibonacci_sphere(n, r);
    for w in pts.windows(2) {
        assert!(w[1].y > w[0].y, "heights must increase monotonically");
    }
    assert!(pts[0].y > -r);
    assert!(pts[n - 1].y < r);
}
