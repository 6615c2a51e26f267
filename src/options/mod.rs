//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (particle layout, sphere mesh, camera, clock,
//! display toggles, keybindings) are consolidated here. Options serialize
//! to/from TOML so a scene can be described in a preset file.

mod camera;
mod clock;
mod display;
mod keybindings;
mod particles;
mod sphere;

use std::path::Path;

pub use camera::CameraOptions;
pub use clock::ClockOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use particles::{ParticleOptions, MAX_PARTICLES};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sphere::SphereOptions;

use crate::error::HaloError;
use crate::scene::sphere_mesh::MAX_SEGMENTS;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[particles]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Particle cloud layout.
    pub particles: ParticleOptions,
    /// Core sphere mesh.
    pub sphere: SphereOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Animation clock.
    pub clock: ClockOptions,
    /// Visibility toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::OptionsParse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, HaloError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| HaloError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::Io`] if the file cannot be read and
    /// [`HaloError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, HaloError> {
        let content = std::fs::read_to_string(path).map_err(HaloError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`HaloError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), HaloError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HaloError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HaloError::Io)?;
        }
        std::fs::write(path, content).map_err(HaloError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Check the preconditions the engine relies on before any geometry is
    /// generated.
    ///
    /// # Errors
    ///
    /// Returns [`HaloError::InvalidArgument`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), HaloError> {
        if !(0..=MAX_PARTICLES).contains(&self.particles.count) {
            return Err(HaloError::invalid(format!(
                "particles.count must be in 0..={MAX_PARTICLES}, got {}",
                self.particles.count
            )));
        }
        if !positive(self.particles.radius) {
            return Err(HaloError::invalid(format!(
                "particles.radius must be positive, got {}",
                self.particles.radius
            )));
        }
        if !positive(self.sphere.radius) {
            return Err(HaloError::invalid(format!(
                "sphere.radius must be positive, got {}",
                self.sphere.radius
            )));
        }
        let (w, h) = (self.sphere.width_segments, self.sphere.height_segments);
        if !(3..=MAX_SEGMENTS).contains(&w) || !(2..=MAX_SEGMENTS).contains(&h)
        {
            return Err(HaloError::invalid(format!(
                "sphere segments must be within 3x2..={MAX_SEGMENTS}x\
                 {MAX_SEGMENTS}, got {w}x{h}"
            )));
        }
        if !self.clock.step.is_finite() || self.clock.step < 0.0 {
            return Err(HaloError::invalid(format!(
                "clock.step must be >= 0, got {}",
                self.clock.step
            )));
        }
        if !(self.clock.rotation_divisor.is_finite()
            && self.clock.rotation_divisor > 0.0)
        {
            return Err(HaloError::invalid(format!(
                "clock.rotation_divisor must be positive, got {}",
                self.clock.rotation_divisor
            )));
        }
        let cam = &self.camera;
        if !(positive(cam.znear) && cam.zfar > cam.znear && positive(cam.fovy))
        {
            return Err(HaloError::invalid(format!(
                "camera projection is degenerate (fovy {}, near {}, far {})",
                cam.fovy, cam.znear, cam.zfar
            )));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_reference_scene() {
        let opts = Options::default();
        assert_eq!(opts.particles.count, 8000);
        assert_eq!(opts.particles.radius, 1.6);
        assert_eq!(opts.sphere.radius, 1.0);
        assert_eq!(opts.sphere.width_segments, 128);
        assert_eq!(opts.clock.step, 0.05);
        assert_eq!(opts.camera.fovy, 50.0);
        assert_eq!(opts.camera.distance, 5.0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[particles]
count = 1200
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.particles.count, 1200);
        // Everything else should be default
        assert_eq!(opts.particles.radius, 1.6);
        assert_eq!(opts.clock, ClockOptions::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[particles\ncount = ").unwrap_err();
        assert!(matches!(err, HaloError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_survive_reload() {
        use crate::input::KeyAction;
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = "KeyX"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyX"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("Space"), None);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut opts = Options::default();
        opts.particles.count = -5;
        assert!(matches!(
            opts.validate(),
            Err(HaloError::InvalidArgument(_))
        ));

        let mut opts = Options::default();
        opts.particles.radius = 0.0;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.sphere.height_segments = 1;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.sphere.width_segments = u32::MAX;
        assert!(matches!(
            opts.validate(),
            Err(HaloError::InvalidArgument(_))
        ));

        let mut opts = Options::default();
        opts.clock.step = -0.05;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera.zfar = opts.camera.znear;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn particle_count_is_capped() {
        let mut opts = Options::default();
        opts.particles.count = MAX_PARTICLES;
        assert!(opts.validate().is_ok());
        opts.particles.count = MAX_PARTICLES + 1;
        assert!(matches!(
            opts.validate(),
            Err(HaloError::InvalidArgument(_))
        ));

        let opts = Options::from_toml_str("[particles]\ncount = 9000000000\n")
            .unwrap();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn zero_particles_is_valid() {
        let mut opts = Options::default();
        opts.particles.count = 0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("halo-options-{}", std::process::id()));
        let path = dir.join("dense.toml");
        let mut opts = Options::default();
        opts.particles.count = 20_000;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["dense".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("particles"));
        assert!(props.contains_key("sphere"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("clock"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));

        let sphere = &props["sphere"]["properties"];
        assert!(sphere.get("radius").is_some());
        assert!(sphere.get("width_segments").is_none());
    }

    #[test]
    fn bundled_presets_load_and_validate() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets");
        let names = Options::list_presets(&dir);
        assert_eq!(names, ["calm", "dense"]);
        for name in names {
            let opts = Options::load(&dir.join(format!("{name}.toml")))
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(opts.validate().is_ok(), "{name} failed validation");
        }
    }
}
