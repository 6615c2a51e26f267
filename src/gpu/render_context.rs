use crate::error::HaloError;

/// Device, queue, and the window surface the halo is presented on.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    /// Window surface.
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration; `width`/`height` track the window.
    pub config: wgpu::SurfaceConfiguration,
    /// Physical pixels per logical pixel of the display.
    pub scale_factor: f64,
}

/// Surface extent for a requested window size. A minimized window reports
/// zero, which wgpu refuses to configure.
fn surface_extent((width, height): (u32, u32)) -> (u32, u32) {
    (width.max(1), height.max(1))
}

impl RenderContext {
    /// Open a surface on `window`, pick a high-performance adapter that can
    /// present to it, and configure it for vsync'd presentation.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Gpu`] if the surface, adapter, or device cannot
    /// be created, or if the adapter cannot present to the surface.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
    ) -> Result<Self, HaloError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window).map_err(|e| {
            HaloError::Gpu(format!("surface creation failed: {e}"))
        })?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(|e| HaloError::Gpu(format!("no usable adapter: {e}")))?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Halo Device"),
                ..Default::default()
            })
            .await
            .map_err(|e| HaloError::Gpu(format!("device request failed: {e}")))?;

        let (width, height) = surface_extent(size);
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                HaloError::Gpu("adapter cannot present to this surface".into())
            })?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            scale_factor,
        })
    }

    /// Swapchain texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size. Returns `false` (and does nothing)
    /// when either dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        log::debug!("surface reconfigured to {width}x{height}");
        true
    }

    /// Acquire the next swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface is lost, outdated, or
    /// timed out.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Start a command encoder for one frame.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Halo Encoder"),
            })
    }

    /// Finish `encoder` and hand it to the queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_window_gets_a_one_pixel_surface() {
        assert_eq!(surface_extent((0, 0)), (1, 1));
        assert_eq!(surface_extent((0, 720)), (1, 720));
        assert_eq!(surface_extent((1280, 720)), (1280, 720));
    }
}
