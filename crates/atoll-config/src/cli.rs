//! Command-line argument parsing for the `atoll` binary.

use std::path::PathBuf;

use atoll_terrain::RegenerationPolicy;
use clap::Parser;

use crate::Config;

/// atoll command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "atoll", about = "Incremental island terrain generator")]
pub struct CliArgs {
    /// Grid cells per side; the mesh has (resolution + 1)^2 vertices.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Rows filled per tick before yielding.
    #[arg(long)]
    pub rows_per_slice: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Number of frames to run before exiting.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Regenerate the terrain continuously instead of once.
    #[arg(long)]
    pub continuous: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(res) = args.resolution {
            self.terrain.vertex_resolution = res;
        }
        if let Some(octaves) = args.octaves {
            self.terrain.octaves = octaves;
        }
        if let Some(rows) = args.rows_per_slice {
            self.terrain.rows_per_slice = rows;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(frames) = args.frames {
            self.run.frames = frames;
        }
        if args.continuous {
            self.regeneration = RegenerationPolicy::Continuous;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
