//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use atoll_terrain::{AltitudeReportConfig, GenerationParameters, RegenerationPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Noise, curve and mesh resolution settings.
    pub terrain: GenerationParameters,
    /// Factors applied to the altitude range pushed to the material.
    pub material: AltitudeReportConfig,
    /// Whether generation runs once per configuration or continuously.
    pub regeneration: RegenerationPolicy,
    /// Showcase camera settings.
    pub camera: CameraConfig,
    /// Headless run settings.
    pub run: RunConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Yaw rate in degrees per second.
    pub rotate_speed: f32,
    /// Zoom rate. Not used by the orbit itself.
    pub zoom_speed: f32,
}

/// Headless run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Number of frames to simulate before exiting.
    pub frames: u32,
    /// Simulated wall-clock time per frame, in milliseconds.
    pub frame_time_ms: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "atoll_terrain=trace").
    pub log_level: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 10.0,
            zoom_speed: 10.0,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_time_ms: 1000.0 / 60.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A changed file that fails [`validate`](Self::validate) is reported as an
    /// error so the caller can keep running with the current settings.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config == self {
            return Ok(None);
        }

        new_config.validate()?;
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }

    /// Check the sections that have constraints beyond their types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terrain.validate()?;
        let frame_time = self.run.frame_time_ms;
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return Err(ConfigError::InvalidFrameTime(frame_time));
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_terrain::{ResponseCurve, TerrainError};

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("vertex_resolution: 10"));
        assert!(ron_str.contains("rotate_speed: 10.0"));
        assert!(ron_str.contains("regeneration: Once"));
    }

    #[test]
    fn test_config_roundtrip_with_custom_curves() {
        let mut config = Config::default();
        config.terrain.height_curve = ResponseCurve::linear(0.0, 0.2, 1.0, 0.9);
        config.terrain.island_curve = ResponseCurve::linear(0.0, 1.0, 1.0, 0.0);
        config.regeneration = RegenerationPolicy::Continuous;

        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = ron::from_str("(terrain: (octaves: 4))").unwrap();
        assert_eq!(config.terrain.octaves, 4);
        assert_eq!(config.terrain.vertex_resolution, 10);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.regeneration, RegenerationPolicy::Once);
    }

    #[test]
    fn test_curve_keys_without_tangents() {
        let ron_str = "(terrain: (island_curve: [(time: 0.0, value: 1.0), (time: 1.0, value: 0.0)]))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.island_curve.keys().len(), 2);
        assert_eq!(config.terrain.island_curve.evaluate(0.0), 1.0);
        assert_eq!(config.terrain.island_curve.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.vertex_resolution = 64;
        config.terrain.seed = 9;
        config.material.texture_elevation = 1.5;
        config.run.frames = 30;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("atoll");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.octaves = 6;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.terrain.octaves), Some(6));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_rejects_invalid_terrain() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let mut broken = config.clone();
        broken.terrain.rows_per_slice = 0;
        broken.save(dir.path()).unwrap();

        let err = config.reload(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTerrain(TerrainError::ZeroRowsPerSlice)
        ));
    }

    #[test]
    fn test_validate_frame_time() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.run.frame_time_ms = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFrameTime(_))
        ));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// atoll settings\n(\n  // terrain\n  terrain: (seed: 3),\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.seed, 3);
    }
}
