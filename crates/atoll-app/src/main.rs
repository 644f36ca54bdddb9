use std::process::ExitCode;

use atoll_app::{PlatformDirs, TerrainSession};
use atoll_config::{CliArgs, Config};
use clap::Parser;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::from_override(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    atoll_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let mut session = match TerrainSession::new(config) {
        Ok(session) => session.with_hot_reload(dirs.config_dir.clone()),
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match session.run() {
        Ok(summary) => {
            match summary.altitude {
                Some(altitude) => info!(
                    frames = summary.frames,
                    sim_steps = summary.sim_steps,
                    passes = summary.passes_completed,
                    meshes = summary.meshes_received,
                    min_altitude = altitude.min,
                    max_altitude = altitude.max,
                    camera_yaw_degrees = summary.camera_yaw_degrees,
                    "run complete"
                ),
                None => info!(
                    frames = summary.frames,
                    sim_steps = summary.sim_steps,
                    "run ended before the first pass completed"
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Terrain generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
