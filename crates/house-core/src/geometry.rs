//! Indexed triangle meshes for the primitive shapes the widgets are built from.
//!
//! All shapes are centred on the origin with Y up and counter-clockwise front
//! faces. Cylinders and cones run along Y; angles start at +Z and sweep toward +X.

use glam::Vec3;
use std::f32::consts::{PI, TAU};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GEOMETRY_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug)]
pub struct Geometry {
    id: u64,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Wrap raw mesh data. Missing normals are rebuilt from face normals.
    pub fn from_mesh_data(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let indices = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => vertex_normals(&positions, &indices),
        };
        Self::with_id(positions, normals, indices)
    }

    fn with_id(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            id: NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed),
            positions,
            normals,
            indices,
        }
    }

    /// Process-unique identity, stable for the geometry's lifetime.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        // (normal, u, v) with u x v == normal so the quads wind CCW
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(((n + u * su + v * sv) * half).to_array());
                normals.push(n.to_array());
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self::with_id(positions, normals, indices)
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half_h = height * 0.5;
        let slope = if height > 0.0 {
            (radius_bottom - radius_top) / height
        } else {
            0.0
        };
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();

        // Side: two rings with a duplicated seam column
        for (y, r) in [(half_h, radius_top), (-half_h, radius_bottom)] {
            for i in 0..=segments {
                let theta = i as f32 / segments as f32 * TAU;
                let (s, c) = theta.sin_cos();
                positions.push([r * s, y, r * c]);
                normals.push(Vec3::new(s, slope, c).normalize().to_array());
            }
        }
        let row = segments + 1;
        for i in 0..segments {
            let (top, bottom) = (i, row + i);
            indices.extend_from_slice(&[top, bottom, bottom + 1, top, bottom + 1, top + 1]);
        }

        let mut cap = |y: f32, r: f32, normal: Vec3, flip: bool| {
            let center = positions.len() as u32;
            positions.push([0.0, y, 0.0]);
            normals.push(normal.to_array());
            for i in 0..=segments {
                let theta = i as f32 / segments as f32 * TAU;
                let (s, c) = theta.sin_cos();
                positions.push([r * s, y, r * c]);
                normals.push(normal.to_array());
            }
            for i in 0..segments {
                let (a, b) = (center + 1 + i, center + 2 + i);
                if flip {
                    indices.extend_from_slice(&[center, b, a]);
                } else {
                    indices.extend_from_slice(&[center, a, b]);
                }
            }
        };
        if radius_top > 0.0 {
            cap(half_h, radius_top, Vec3::Y, false);
        }
        if radius_bottom > 0.0 {
            cap(-half_h, radius_bottom, Vec3::NEG_Y, true);
        }
        Self::with_id(positions, normals, indices)
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments)
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let n = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );
                positions.push((n * radius).to_array());
                normals.push(n.to_array());
            }
        }
        let row = ws + 1;
        let mut indices = Vec::new();
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        Self::with_id(positions, normals, indices)
    }
}

/// Area-weighted vertex normals for meshes that ship without them.
fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from_array(positions[a]);
        let face = (Vec3::from_array(positions[b]) - pa).cross(Vec3::from_array(positions[c]) - pa);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}
