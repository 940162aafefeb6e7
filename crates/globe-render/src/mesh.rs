//! CPU-side globe geometry: a subdivided icosahedron with flat normals and a
//! matching wireframe.

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

const T: f32 = 1.618_034; // golden ratio

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Triangles of an icosahedron whose edges are split into `detail + 1`
/// segments, projected onto a sphere of `radius`.
pub fn icosphere_triangles(radius: f32, detail: u32) -> Vec<[Vec3; 3]> {
    let cols = detail as usize + 1;
    let mut tris = Vec::with_capacity(ICOSAHEDRON_FACES.len() * cols * cols);
    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| Vec3::from(ICOSAHEDRON_VERTICES[i]));
        // rows of lattice points from edge ab towards apex c
        let grid: Vec<Vec<Vec3>> = (0..=cols)
            .map(|i| {
                let t = i as f32 / cols as f32;
                let aj = a.lerp(c, t);
                let bj = b.lerp(c, t);
                let rows = cols - i;
                (0..=rows)
                    .map(|j| {
                        if rows == 0 {
                            aj
                        } else {
                            aj.lerp(bj, j as f32 / rows as f32)
                        }
                    })
                    .collect()
            })
            .collect();
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                tris.push(tri.map(|p| p.normalize() * radius));
            }
        }
    }
    tris
}

/// Flat-shaded triangle list: every vertex carries its face normal.
pub fn flat_shaded_vertices(tris: &[[Vec3; 3]]) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(tris.len() * 3);
    for &[a, b, c] in tris {
        let mut n = (b - a).cross(c - a).normalize_or_zero();
        let centroid = (a + b + c) / 3.0;
        let (b, c) = if n.dot(centroid) < 0.0 {
            n = -n;
            (c, b)
        } else {
            (b, c)
        };
        for p in [a, b, c] {
            out.push(MeshVertex {
                pos: p.to_array(),
                normal: n.to_array(),
            });
        }
    }
    out
}

/// Line list with the three edges of every triangle, pushed out by `inflate`
/// so the lines sit just above the shaded surface.
pub fn wireframe_vertices(tris: &[[Vec3; 3]], inflate: f32) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(tris.len() * 6);
    for &[a, b, c] in tris {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            for v in [p, q] {
                out.push(MeshVertex {
                    pos: (v * inflate).to_array(),
                    normal: v.normalize_or_zero().to_array(),
                });
            }
        }
    }
    out
}
