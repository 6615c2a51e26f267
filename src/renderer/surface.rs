//! Core sphere pass: an indexed UV-sphere mesh shaded by
//! `assets/shaders/surface.wgsl`.

use wgpu::util::DeviceExt;

use crate::error::HaloError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{Shader, ShaderComposer};
use crate::renderer::pipeline_util;
use crate::scene::{SphereMesh, SphereVertex};

/// Pipeline plus vertex/index buffers for the core sphere.
pub struct SurfacePass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl SurfacePass {
    /// Upload `mesh` and build the pipeline against the shared globals
    /// layout.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Shader`] if the surface shader fails to compose.
    pub fn new(
        context: &RenderContext,
        globals_layout: &wgpu::BindGroupLayout,
        composer: &mut ShaderComposer,
        mesh: &SphereMesh,
    ) -> Result<Self, HaloError> {
        let device = &context.device;
        let shader = composer.compose(device, Shader::Surface)?;

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Surface Pipeline Layout"),
                bind_group_layouts: &[globals_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Surface Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[SphereVertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(
                        context.format(),
                        None,
                    ),
                    compilation_options: Default::default(),
                }),
                // Double-sided: the back faces are visible when the camera
                // zooms inside the sphere.
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state(true)),
                multisample: pipeline_util::multisample_state(),
                multiview: None,
                cache: None,
            });

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "sphere mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.index_count() / 3
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        })
    }

    /// Record the sphere draw.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        globals: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, globals, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
