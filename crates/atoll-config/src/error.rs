//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file or its directory.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The `terrain` section holds parameters the generator rejects.
    #[error("invalid terrain section: {0}")]
    InvalidTerrain(#[from] atoll_terrain::TerrainError),

    /// `run.frame_time_ms` is not a positive, finite duration.
    #[error("run.frame_time_ms must be positive and finite, got {0}")]
    InvalidFrameTime(f64),
}
