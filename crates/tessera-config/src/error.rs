//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while locating, loading, saving or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no per-user configuration directory.
    #[error("no platform config directory; pass --config explicitly")]
    NoConfigDir,

    /// Failed to read the config file from disk.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file to disk.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`crate::Config`].
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value parsed fine but is outside its meaningful range.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field, e.g. `globe.polar_radius_m`.
        field: &'static str,
        reason: String,
    },
}
