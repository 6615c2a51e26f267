//! The render engine: owns the GPU context, both render passes, and the
//! per-frame state they read.
//!
//! The host drives it with [`HaloEngine::update`] once per frame followed by
//! [`HaloEngine::render`]. Input flows in through
//! [`HaloEngine::handle_input`] / [`HaloEngine::handle_key_press`] and is
//! turned into [`HaloCommand`]s.

/// Command vocabulary.
pub mod command;
pub mod frame_state;

pub use command::HaloCommand;
pub use frame_state::FrameState;
use web_time::Duration;

use crate::error::HaloError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::globals::GlobalBindings;
use crate::renderer::particles::ParticlePass;
use crate::renderer::pipeline_util;
use crate::renderer::surface::SurfacePass;
use crate::scene::{distribute, ParticleSet, SphereMesh};
use crate::util::frame_clock::FrameClock;
use crate::util::frame_timing::FrameTiming;

/// How often the frame timer logs its smoothed FPS.
const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Renders the core sphere and the orbiting particle cloud.
pub struct HaloEngine {
    context: RenderContext,
    composer: ShaderComposer,
    globals: GlobalBindings,
    surface_pass: SurfacePass,
    particle_pass: ParticlePass,
    msaa_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    particles: ParticleSet,
    state: FrameState,
    input: InputProcessor,
    frame_timing: FrameTiming,
    options: Options,
}

impl HaloEngine {
    /// Build the engine for a window surface of `size` physical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] if the options fail
    /// validation, [`HaloError::Gpu`] if no adapter or device is available,
    /// or [`HaloError::Shader`] if a shader fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, HaloError> {
        options.validate()?;
        let particles =
            distribute(options.particles.count, options.particles.radius)?;
        let mesh = SphereMesh::uv_sphere(
            options.sphere.radius,
            options.sphere.width_segments,
            options.sphere.height_segments,
        )?;

        let context = RenderContext::new(window, size, scale_factor).await?;
        let mut composer = ShaderComposer::new()?;

        let (width, height) = context.size();
        let mut state = FrameState::new(&options, 1.0);
        state.camera.resize(width, height);

        let globals = GlobalBindings::new(
            &context.device,
            &state.camera_uniform(),
            &state.frame_uniform(context.size(), scale_factor),
        );
        let surface_pass =
            SurfacePass::new(&context, &globals.layout, &mut composer, &mesh)?;
        let particle_pass = ParticlePass::new(
            &context,
            &globals.layout,
            &mut composer,
            &particles,
        )?;
        let msaa_view = pipeline_util::create_msaa_view(
            &context.device,
            context.format(),
            width,
            height,
        );
        let depth_view =
            pipeline_util::create_depth_view(&context.device, width, height);

        log::info!(
            "engine ready: {} particles at radius {}, sphere {}x{} segments",
            particles.len(),
            particles.radius(),
            options.sphere.width_segments,
            options.sphere.height_segments,
        );

        Ok(Self {
            context,
            composer,
            globals,
            surface_pass,
            particle_pass,
            msaa_view,
            depth_view,
            particles,
            state,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            frame_timing: FrameTiming::new(FPS_REPORT_INTERVAL),
            options,
        })
    }

    /// Advance the animation clock by `frames` fixed steps (usually 1) and
    /// push the new uniforms to the GPU.
    pub fn update(&mut self, frames: u64) {
        self.state.advance(frames);
        self.globals.write(
            &self.context.queue,
            &self.state.camera_uniform(),
            &self
                .state
                .frame_uniform(self.context.size(), self.context.scale_factor),
        );
    }

    /// Draw one frame: clear, sphere, then particles. The pass renders into
    /// the multisampled target and resolves into the swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture could not be
    /// acquired. The caller should [`resize`](Self::resize) on `Lost` or
    /// `Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        let [r, g, b] = self.state.display.background;
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Halo Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &self.msaa_view,
                            resolve_target: Some(&view),
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Discard,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Discard,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if self.state.display.show_sphere {
                self.surface_pass.draw(&mut pass, &self.globals.bind_group);
            }
            if self.state.display.show_particles {
                self.particle_pass.draw(&mut pass, &self.globals.bind_group);
            }
        }

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface, the multisampled color and depth targets, and the
    /// camera aspect. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.msaa_view = pipeline_util::create_msaa_view(
            &self.context.device,
            self.context.format(),
            width,
            height,
        );
        self.depth_view =
            pipeline_util::create_depth_view(&self.context.device, width, height);
        self.state.camera.resize(width, height);
    }

    /// Record a new display scale factor (used for point sprite sizing).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.context.scale_factor = scale_factor;
    }

    /// Feed a platform-agnostic input event. Returns `true` if it produced a
    /// command.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.input
            .handle_event(event)
            .is_some_and(|command| self.execute(command))
    }

    /// Feed a key press (`KeyCode` debug name, e.g. `"Space"`). Returns
    /// `true` if the key is bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        self.input
            .handle_key_press(key)
            .is_some_and(|command| self.execute(command))
    }

    /// Execute a command. Returns `true` if anything visible changed.
    pub fn execute(&mut self, command: HaloCommand) -> bool {
        log::trace!("execute {command:?}");
        self.state.apply(command)
    }

    /// Replace the options, regenerating the particle cloud and sphere
    /// mesh only when their parameters changed. The animation clock keeps
    /// its accumulated time.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] if the new options fail
    /// validation, or [`HaloError::Shader`] if the sphere pipeline has to
    /// be rebuilt and its shader fails to compose. On error the previous
    /// options stay in effect.
    pub fn set_options(&mut self, options: Options) -> Result<(), HaloError> {
        options.validate()?;

        if options.sphere != self.options.sphere {
            let mesh = SphereMesh::uv_sphere(
                options.sphere.radius,
                options.sphere.width_segments,
                options.sphere.height_segments,
            )?;
            self.surface_pass = SurfacePass::new(
                &self.context,
                &self.globals.layout,
                &mut self.composer,
                &mesh,
            )?;
        }

        if options.particles.count != self.options.particles.count
            || options.particles.radius.to_bits()
                != self.options.particles.radius.to_bits()
        {
            let particles =
                distribute(options.particles.count, options.particles.radius)?;
            self.particle_pass.upload(
                &self.context.device,
                &self.context.queue,
                &particles,
            )?;
            self.particles = particles;
            log::info!(
                "regenerated {} particles at radius {}",
                self.particles.len(),
                self.particles.radius()
            );
        }

        self.state.apply_options(&options);
        self.input.set_key_bindings(options.keybindings.clone());
        self.options = options;
        Ok(())
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The particle cloud currently on the GPU.
    #[must_use]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// The shared animation clock.
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.state.clock
    }

    /// Clock, camera, and visibility state.
    #[must_use]
    pub fn frame_state(&self) -> &FrameState {
        &self.state
    }

    /// Whether the animation clock is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
