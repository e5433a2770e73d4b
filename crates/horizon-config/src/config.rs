//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Skybox parameters.
    pub skybox: SkyboxConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Skybox parameters, matching the live control panel the viewer exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyboxConfig {
    /// Camera height above the ground in the environment photo.
    pub height: f64,
    /// Radius of the sky sphere; must keep the scene camera inside.
    pub radius: f64,
    /// Tessellation density (rings per hemisphere).
    pub resolution: u32,
    /// Ground projection on/off. When off the environment renders as a plain
    /// sphere background.
    pub grounded: bool,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// MSAA sample count (1, 2, 4).
    pub msaa_samples: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log rebuild timings for every geometry regeneration.
    pub log_rebuild_timings: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            height: 15.0,
            radius: 100.0,
            resolution: 128,
            grounded: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            msaa_samples: 4,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_rebuild_timings: false,
            log_level: "info".to_string(),
        }
    }
}

impl SkyboxConfig {
    /// Reports the first non-positive parameter, if any.
    ///
    /// Catches bad values at load time, before they reach the skybox
    /// constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "skybox.height",
                value: self.height,
            });
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "skybox.radius",
                value: self.radius,
            });
        }
        if self.resolution == 0 {
            return Err(ConfigError::InvalidValue {
                field: "skybox.resolution",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Default config directory under the platform config dir, e.g.
    /// `~/.config/horizon` on Linux. Falls back to the current directory when
    /// the platform reports none.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("horizon"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("horizon.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `horizon.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("horizon.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
