//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Reference ellipsoid and terrain.
    pub globe: GlobeConfig,
    /// Cube mapping and refinement.
    pub tessellation: TessellationConfig,
    /// Random point sampling used to check coverage.
    pub sampling: SamplingConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Globe shape and terrain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Semi-major axis in meters.
    pub equatorial_radius_m: f64,
    /// Semi-minor axis in meters.
    pub polar_radius_m: f64,
    /// Terrain model draped over the ellipsoid.
    pub elevation: ElevationConfig,
}

/// Terrain model selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum ElevationConfig {
    /// Bare ellipsoid.
    #[default]
    Zero,
    /// Uniform height in meters.
    Constant { meters: f64 },
    /// Multi-octave simplex noise.
    Fractal {
        seed: u32,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
        base_frequency: f64,
        amplitude_m: f64,
    },
}

/// Cube mapping and refinement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TessellationConfig {
    /// Latitude separating the lateral faces from the polar caps, in degrees.
    pub latitude_cutoff_deg: f64,
    /// Uniform refinement depth below the six roots.
    pub depth: u32,
    /// Vertical exaggeration applied to terrain when computing sector points.
    pub exaggeration: f64,
}

/// Coverage sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of random locations to test.
    pub samples: u32,
    /// Seed for the location generator.
    pub seed: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            equatorial_radius_m: 6_378_137.0,
            polar_radius_m: 6_356_752.3142,
            elevation: ElevationConfig::Zero,
        }
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            latitude_cutoff_deg: 45.0,
            depth: 3,
            exaggeration: 1.0,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 42,
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

// --- Load / Save / Reload ---

impl Config {
    /// The per-user config directory, `<platform config dir>/tessera`.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("tessera"))
            .ok_or(ConfigError::NoConfigDir)
    }

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
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Reject values that would make the tessellation or the globe
    /// meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let globe = &self.globe;
        if !(globe.equatorial_radius_m.is_finite() && globe.equatorial_radius_m > 0.0) {
            return Err(invalid(
                "globe.equatorial_radius_m",
                format!("must be positive, got {}", globe.equatorial_radius_m),
            ));
        }
        if !(globe.polar_radius_m > 0.0 && globe.polar_radius_m <= globe.equatorial_radius_m) {
            return Err(invalid(
                "globe.polar_radius_m",
                format!(
                    "must lie in (0, {}], got {}",
                    globe.equatorial_radius_m, globe.polar_radius_m
                ),
            ));
        }

        let cutoff = self.tessellation.latitude_cutoff_deg;
        if !(cutoff > 0.0 && cutoff < 90.0) {
            return Err(invalid(
                "tessellation.latitude_cutoff_deg",
                format!("must lie strictly between 0 and 90, got {cutoff}"),
            ));
        }
        if !self.tessellation.exaggeration.is_finite() {
            return Err(invalid(
                "tessellation.exaggeration",
                format!("must be finite, got {}", self.tessellation.exaggeration),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
