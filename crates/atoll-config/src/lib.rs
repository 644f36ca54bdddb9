//! Configuration for the atoll terrain generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and can be re-read at runtime to pick up edits.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, RunConfig};
pub use error::ConfigError;
