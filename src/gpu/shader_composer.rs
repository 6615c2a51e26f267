use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::HaloError;

/// WGSL entry-point shaders shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    /// Time-animated shading of the core sphere.
    Surface,
    /// Camera-facing particle sprites.
    Particles,
}

impl Shader {
    /// Every entry-point shader.
    pub const ALL: [Self; 2] = [Self::Surface, Self::Particles];

    /// WGSL source, embedded at compile time.
    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            Self::Surface => {
                include_str!("../../assets/shaders/surface.wgsl")
            }
            Self::Particles => {
                include_str!("../../assets/shaders/particles.wgsl")
            }
        }
    }

    /// Path used in composer diagnostics.
    #[must_use]
    pub fn file_path(self) -> &'static str {
        match self {
            Self::Surface => "surface.wgsl",
            Self::Particles => "particles.wgsl",
        }
    }
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// The shared `halo::globals` module (camera and frame uniforms, bound at
/// group 0) is registered at construction time. The composer produces
/// `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with the shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, HaloError> {
        let mut composer = Composer::default();

        let _ = composer
            .add_composable_module(ComposableModuleDescriptor {
                source: include_str!(
                    "../../assets/shaders/modules/globals.wgsl"
                ),
                file_path: "modules/globals.wgsl",
                language: ShaderLanguage::Wgsl,
                ..Default::default()
            })
            .map_err(|e| describe("modules/globals.wgsl", &e))?;

        Ok(Self { composer })
    }

    /// Compose one of the crate's shaders into a `wgpu::ShaderModule` ready
    /// for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: Shader,
    ) -> Result<wgpu::ShaderModule, HaloError> {
        let naga_module = self.compose_naga(shader)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.file_path()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu shader
    /// module. Useful for testing shader composition without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: Shader,
    ) -> Result<naga::Module, HaloError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source(),
                file_path: shader.file_path(),
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| describe(shader.file_path(), &e))
    }
}

fn describe(file_path: &str, err: &ComposerError) -> HaloError {
    HaloError::Shader(format!("{file_path}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let _ = composer.compose_naga(shader).unwrap_or_else(|e| {
                panic!("{} failed to compose: {e}", shader.file_path())
            });
        }
    }

    #[test]
    fn composed_shaders_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer.compose_naga(shader).unwrap();
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::default(),
            );
            assert!(
                validator.validate(&module).is_ok(),
                "{} failed validation",
                shader.file_path()
            );
        }
    }

    #[test]
    fn entry_points_present() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(Shader::Particles).unwrap();
        let names: Vec<&str> =
            module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }
}
