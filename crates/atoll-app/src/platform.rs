//! OS directory resolution for config and log files.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

const APP_NAME: &str = "atoll";

/// Where atoll keeps `config.ron` and its log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Directory holding `config.ron`.
    pub config_dir: PathBuf,
    /// Directory holding `atoll.log`.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS config directory (XDG on Linux, Known Folders on
    /// Windows, Library on macOS) without creating anything on disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::for_config_dir(config_base.join(APP_NAME)))
    }

    /// Resolve from `--config` if given, else from the OS.
    pub fn from_override(config_override: Option<&Path>) -> Result<Self, PlatformError> {
        match config_override {
            Some(dir) => Ok(Self::for_config_dir(dir.to_path_buf())),
            None => Self::resolve(),
        }
    }

    /// Use an explicit config directory; logs go to its `logs` subdirectory.
    pub fn for_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Create both directories on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
