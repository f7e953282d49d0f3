use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Indexed triangle mesh of a UV sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Unit vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices, counter-clockwise when viewed from outside.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build a UV sphere centered at the origin.
///
/// The grid has `(width_segments + 1) * (height_segments + 1)` vertices;
/// the seam and pole rows are duplicated so texture coordinates stay
/// continuous. Degenerate pole triangles are skipped. Segment counts are
/// raised to at least 3 around and 2 top to bottom.
#[must_use]
pub fn uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> SphereMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let vertex_count = ((w + 1) * (h + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_v, cos_v) = (v * PI).sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_u, cos_u) = (u * TAU).sin_cos();
            let dir = Vec3::new(-cos_u * sin_v, cos_v, sin_u * sin_v);
            positions.push((dir * radius).to_array());
            normals.push(dir.normalize_or_zero().to_array());
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity((6 * w * (h - 1)) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    SphereMesh {
        positions,
        normals,
        indices,
    }
}
