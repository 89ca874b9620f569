//! Configuration system for Tessera.
//!
//! Settings for the globe, the tessellation and the sampling run persist to
//! disk as a RON file. Command-line flags parsed with clap override the
//! loaded values, and unknown or missing fields fall back to defaults so old
//! and new config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, ElevationConfig, GlobeConfig, SamplingConfig,
    TessellationConfig,
};
pub use error::ConfigError;
