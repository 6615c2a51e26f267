//! Particle cloud pass.
//!
//! Positions live in a read-only storage buffer; each particle is drawn as
//! a camera-facing quad (`draw(0..6, 0..count)`) so sprites keep a fixed
//! pixel size, which plain point primitives cannot do in wgpu.

use glam::Vec3;

use crate::error::HaloError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{Shader, ShaderComposer};
use crate::renderer::pipeline_util;
use crate::scene::ParticleSet;

/// Two triangles per sprite.
const VERTICES_PER_PARTICLE: u32 = 6;

/// Pipeline, storage buffer, and bind group for the particle cloud.
pub struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    positions: TypedBuffer<Vec3>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    particle_count: u32,
}

impl ParticlePass {
    /// Upload `particles` and build the pipeline against the shared globals
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Shader`] if the particle shader fails to
    /// compose, or [`HaloError::InvalidArgument`] if the cloud has more
    /// particles than one draw call can instance.
    pub fn new(
        context: &RenderContext,
        globals_layout: &wgpu::BindGroupLayout,
        composer: &mut ShaderComposer,
        particles: &ParticleSet,
    ) -> Result<Self, HaloError> {
        let particle_count = instance_count(particles.len())?;
        let device = &context.device;
        let positions = TypedBuffer::new_with_data(
            device,
            "Particle Positions",
            particles.positions(),
            wgpu::BufferUsages::STORAGE,
        );

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Particle Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage {
                            read_only: true,
                        },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group =
            Self::create_bind_group(device, &bind_group_layout, &positions);

        let shader = composer.compose(device, Shader::Particles)?;
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Pipeline Layout"),
                bind_group_layouts: &[globals_layout, &bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Particle Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(
                        context.format(),
                        Some(wgpu::BlendState::ALPHA_BLENDING),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state(false)),
                multisample: pipeline_util::multisample_state(),
                multiview: None,
                cache: None,
            });

        Ok(Self {
            pipeline,
            positions,
            bind_group_layout,
            bind_group,
            particle_count,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        positions: &TypedBuffer<Vec3>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: positions.buffer().as_entire_binding(),
            }],
        })
    }

    /// Replace the particle cloud. Recreates the bind group if the storage
    /// buffer had to grow.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] if the cloud has more particles
    /// than one draw call can instance. Nothing is uploaded in that case.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        particles: &ParticleSet,
    ) -> Result<(), HaloError> {
        let particle_count = instance_count(particles.len())?;
        if self.positions.write(device, queue, particles.positions()) {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.positions,
            );
        }
        self.particle_count = particle_count;
        Ok(())
    }

    /// Number of particles drawn per frame.
    #[must_use]
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    /// Record the particle draw. Skipped for an empty cloud.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        globals: &wgpu::BindGroup,
    ) {
        if self.particle_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, globals, &[]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.draw(0..VERTICES_PER_PARTICLE, 0..self.particle_count);
    }
}

fn instance_count(len: usize) -> Result<u32, HaloError> {
    u32::try_from(len).map_err(|_| {
        HaloError::invalid(format!(
            "{len} particles exceed the per-draw instance limit"
        ))
    })
}
