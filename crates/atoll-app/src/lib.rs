//! Host application for atoll: fixed-timestep loop, orbit camera, a headless
//! recording renderer and the session that ties them to terrain generation.

pub mod camera;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod session;

pub use camera::OrbitCamera;
pub use error::AppError;
pub use game_loop::GameLoop;
pub use platform::{PlatformDirs, PlatformError};
pub use renderer::RecordingRenderer;
pub use session::{RunSummary, TerrainSession};
