//! Per-frame uniforms shared by every pass (bind group 0).
//!
//! Both materials read the same `time` value, so the clock is written once
//! per frame into a single buffer rather than once per material.

use wgpu::util::DeviceExt;

use crate::camera::core::CameraUniform;

/// GPU mirror of `FrameUniform` in `assets/shaders/modules/globals.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    /// Animation clock value.
    pub time: f32,
    /// Rotation of the particle cloud about +Y, in radians.
    pub particle_rotation: f32,
    /// Particle sprite size in logical pixels.
    pub point_size: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
    /// `(width, height, pixel_ratio, aspect)` of the viewport.
    pub resolution: [f32; 4],
}

impl FrameUniform {
    /// Frame uniform for a viewport of `width`x`height` physical pixels.
    #[must_use]
    pub fn new(
        time: f32,
        particle_rotation: f32,
        point_size: f32,
        (width, height): (u32, u32),
        pixel_ratio: f64,
    ) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Self {
            time,
            particle_rotation,
            point_size,
            _pad: 0.0,
            resolution: [w, h, pixel_ratio as f32, w / h],
        }
    }
}

/// Camera and frame uniform buffers plus the bind group exposing them.
pub struct GlobalBindings {
    camera_buffer: wgpu::Buffer,
    frame_buffer: wgpu::Buffer,
    /// Layout for group 0, shared by every pipeline.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for group 0.
    pub bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    /// Allocate both uniform buffers with initial contents.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        camera: &CameraUniform,
        frame: &FrameUniform,
    ) -> Self {
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(camera),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let frame_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Buffer"),
                contents: bytemuck::bytes_of(frame),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX
                | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: frame_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            camera_buffer,
            frame_buffer,
            layout,
            bind_group,
        }
    }

    /// Upload this frame's camera and clock state.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        camera: &CameraUniform,
        frame: &FrameUniform,
    ) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_uniform_is_32_bytes() {
        assert_eq!(size_of::<FrameUniform>(), 32);
    }

    #[test]
    fn resolution_packs_size_ratio_and_aspect() {
        let frame = FrameUniform::new(1.5, 0.15, 3.0, (1920, 1080), 2.0);
        assert_eq!(frame.time, 1.5);
        assert_eq!(frame.resolution, [1920.0, 1080.0, 2.0, 1920.0 / 1080.0]);
    }

    #[test]
    fn point_size_stays_logical_on_hidpi() {
        let frame = FrameUniform::new(0.0, 0.0, 3.0, (2560, 1440), 2.0);
        assert_eq!(frame.point_size, 3.0);
        assert_eq!(frame.point_size * frame.resolution[2], 6.0);
    }

    #[test]
    fn zero_sized_viewport_does_not_divide_by_zero() {
        let frame = FrameUniform::new(0.0, 0.0, 3.0, (0, 0), 1.0);
        assert!(frame.resolution.iter().all(|v| v.is_finite()));
    }
}
