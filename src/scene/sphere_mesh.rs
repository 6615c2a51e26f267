//! UV-sphere mesh generation for the shaded core sphere.

use std::f32::consts::{PI, TAU};

use crate::error::HaloError;

/// Upper bound on either segment count; keeps vertex indices within `u32`.
pub const MAX_SEGMENTS: u32 = 1024;

/// Vertex of the core sphere mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate, `u` around the equator, `v` from top to bottom.
    pub uv: [f32; 2],
}

impl SphereVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2
    ];

    /// Vertex buffer layout matching `@location(0..=2)` in the surface shader.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        };
}

/// CPU-side sphere mesh: vertices plus a triangle-list index buffer.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    /// Mesh vertices, row-major from the north pole down.
    pub vertices: Vec<SphereVertex>,
    /// Triangle-list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a UV sphere with `width_segments` slices around the Y axis and
    /// `height_segments` stacks from pole to pole.
    ///
    /// Every row carries `width_segments + 1` vertices so the seam gets its
    /// own texture coordinates. Quads touching a pole collapse to a single
    /// triangle.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] if the radius is not finite
    /// and positive, or a segment count falls outside `3..=MAX_SEGMENTS`
    /// (width) / `2..=MAX_SEGMENTS` (height).
    pub fn uv_sphere(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> Result<Self, HaloError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(HaloError::invalid(format!(
                "sphere radius must be a finite positive number, got {radius}"
            )));
        }
        if !(3..=MAX_SEGMENTS).contains(&width_segments)
            || !(2..=MAX_SEGMENTS).contains(&height_segments)
        {
            return Err(HaloError::invalid(format!(
                "sphere segments must be within 3x2..={MAX_SEGMENTS}x\
                 {MAX_SEGMENTS}, got {width_segments}x{height_segments}"
            )));
        }

        let row_len = width_segments + 1;
        let mut vertices =
            Vec::with_capacity((row_len * (height_segments + 1)) as usize);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * TAU;
                let normal = [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ];
                vertices.push(SphereVertex {
                    position: normal.map(|c| c * radius),
                    normal,
                    uv: [u, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row_len + ix + 1;
                let b = iy * row_len + ix;
                let c = (iy + 1) * row_len + ix;
                let d = (iy + 1) * row_len + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Ok(Self { vertices, indices })
    }

    /// Number of indices, as expected by `draw_indexed`.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = SphereMesh::uv_sphere(1.0, 128, 128).unwrap();
        assert_eq!(mesh.vertices.len(), 129 * 129);
        // Two triangles per quad except the two pole rows, which get one.
        let expected_tris = 128 * 128 * 2 - 2 * 128;
        assert_eq!(mesh.index_count(), expected_tris * 3);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn vertices_lie_on_sphere_with_unit_normals() {
        let radius = 2.5;
        let mesh = SphereMesh::uv_sphere(radius, 16, 8).unwrap();
        for v in &mesh.vertices {
            let p = glam::Vec3::from(v.position);
            let n = glam::Vec3::from(v.normal);
            assert!((p.length() - radius).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(p.normalize().dot(n) > 0.9999);
        }
    }

    #[test]
    fn poles_are_top_and_bottom_rows() {
        let mesh = SphereMesh::uv_sphere(1.0, 8, 4).unwrap();
        assert!((mesh.vertices[0].position[1] - 1.0).abs() < 1e-6);
        let last = mesh.vertices[mesh.vertices.len() - 1];
        assert!((last.position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_resolution_is_rejected() {
        assert!(matches!(
            SphereMesh::uv_sphere(1.0, 2, 8),
            Err(HaloError::InvalidArgument(_))
        ));
        assert!(matches!(
            SphereMesh::uv_sphere(1.0, 8, 1),
            Err(HaloError::InvalidArgument(_))
        ));
        assert!(matches!(
            SphereMesh::uv_sphere(0.0, 8, 8),
            Err(HaloError::InvalidArgument(_))
        ));
    }

    #[test]
    fn oversized_resolution_is_rejected_without_overflow() {
        for (w, h) in [(u32::MAX, 8), (8, u32::MAX), (MAX_SEGMENTS + 1, 8)] {
            let result =
                std::panic::catch_unwind(|| SphereMesh::uv_sphere(1.0, w, h));
            assert!(
                matches!(result, Ok(Err(HaloError::InvalidArgument(_)))),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn vertex_layout_stride() {
        assert_eq!(SphereVertex::LAYOUT.array_stride, 32);
    }
}
