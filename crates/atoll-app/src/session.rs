//! A headless run: terrain generator, orbit camera and recording renderer
//! driven by the fixed-timestep loop, with optional config hot-reload.

use std::path::PathBuf;

use atoll_config::Config;
use atoll_terrain::{AltitudeRange, TerrainGenerator, TickReport};
use tracing::{debug, info, warn};

use crate::camera::OrbitCamera;
use crate::error::AppError;
use crate::game_loop::GameLoop;
use crate::renderer::RecordingRenderer;

/// Seconds of frame time between checks of `config.ron` for edits.
pub const RELOAD_CHECK_INTERVAL: f64 = 1.0;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames presented.
    pub frames: u64,
    /// Fixed simulation steps executed.
    pub sim_steps: u64,
    /// Generation passes that completed.
    pub passes_completed: u64,
    /// Meshes the renderer received.
    pub meshes_received: u64,
    /// Altitude range of the last completed pass.
    pub altitude: Option<AltitudeRange>,
    /// Total camera yaw in degrees.
    pub camera_yaw_degrees: f32,
}

/// Owns everything a headless run needs.
pub struct TerrainSession {
    config: Config,
    generator: TerrainGenerator,
    camera: OrbitCamera,
    renderer: RecordingRenderer,
    game_loop: GameLoop,
    reload_dir: Option<PathBuf>,
    since_reload_check: f64,
}

impl TerrainSession {
    /// Build a session from a validated config.
    pub fn new(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let generator = TerrainGenerator::new(
            config.terrain.clone(),
            config.material.clone(),
            config.regeneration,
        )?;

        Ok(Self {
            camera: OrbitCamera::from_config(&config.camera),
            generator,
            renderer: RecordingRenderer::new(),
            game_loop: GameLoop::new(),
            reload_dir: None,
            since_reload_check: 0.0,
            config,
        })
    }

    /// Watch `config_dir/config.ron` and apply edits while running.
    pub fn with_hot_reload(mut self, config_dir: PathBuf) -> Self {
        self.reload_dir = Some(config_dir);
        self
    }

    /// Present one frame of `frame_time` seconds.
    ///
    /// Each fixed step turns the camera and advances terrain generation by
    /// one slice.
    pub fn frame(&mut self, frame_time: f64) -> Result<(), AppError> {
        let Self {
            generator,
            camera,
            renderer,
            game_loop,
            ..
        } = self;

        let mut failure = None;
        game_loop.tick_with(
            frame_time,
            |dt, _| {
                camera.update(dt as f32);
                if failure.is_some() {
                    return;
                }
                match generator.tick(renderer) {
                    Ok(TickReport::Emitted(pass)) => debug!(
                        slices = pass.slices,
                        vertices = pass.vertex_count,
                        "terrain pass emitted"
                    ),
                    Ok(_) => {}
                    Err(e) => failure = Some(e),
                }
            },
            |_alpha| {},
        );
        if let Some(e) = failure {
            return Err(e.into());
        }

        self.since_reload_check += frame_time.max(0.0);
        if self.since_reload_check >= RELOAD_CHECK_INTERVAL {
            self.since_reload_check = 0.0;
            self.check_reload();
        }
        Ok(())
    }

    /// Run `config.run.frames` frames of `config.run.frame_time_ms` each.
    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        let frames = self.config.run.frames;
        info!(
            frames,
            resolution = self.config.terrain.vertex_resolution,
            rows_per_slice = self.config.terrain.rows_per_slice,
            policy = ?self.config.regeneration,
            "starting headless run"
        );

        for _ in 0..frames {
            // Re-read every frame so a hot-reloaded frame time takes effect.
            let frame_time = self.config.run.frame_time_ms / 1000.0;
            self.frame(frame_time)?;
        }
        Ok(self.summary())
    }

    /// Switch to a new configuration without restarting the session.
    ///
    /// Rejected terrain parameters leave the session untouched.
    pub fn apply_config(&mut self, config: Config) -> Result<(), AppError> {
        config.validate()?;
        self.generator.set_params(config.terrain.clone())?;
        self.generator
            .set_report_config(config.material.clone(), &mut self.renderer);
        self.generator.set_policy(config.regeneration);
        self.camera.apply_config(&config.camera);
        self.config = config;
        Ok(())
    }

    fn check_reload(&mut self) {
        let Some(dir) = self.reload_dir.as_deref() else {
            return;
        };
        match self.config.reload(dir) {
            Ok(Some(config)) => {
                if let Err(e) = self.apply_config(config) {
                    warn!("ignoring reloaded config: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("config reload failed, keeping current settings: {e}"),
        }
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.game_loop.frame_count(),
            sim_steps: self.game_loop.update_count(),
            passes_completed: self.generator.completed_passes(),
            meshes_received: self.renderer.meshes_received(),
            altitude: self.generator.altitude(),
            camera_yaw_degrees: self.camera.total_yaw_degrees(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The terrain generator.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// The recording renderer.
    pub fn renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    /// The orbit camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}
