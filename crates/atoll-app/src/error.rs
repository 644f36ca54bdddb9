//! Application error type.

use atoll_config::ConfigError;
use atoll_terrain::TerrainError;

use crate::platform::PlatformError;

/// Anything that can stop a session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Terrain parameters were rejected.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    /// The configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Platform directories could not be resolved or created.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
