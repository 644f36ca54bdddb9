//! Incremental island terrain generation: fBm Perlin heights shaped by a
//! radial falloff, built into a triangle mesh a few rows per host tick.

mod altitude;
mod builder;
mod curve;
mod error;
mod generator;
mod heightmap;
mod mesh;
mod params;
mod radial;
mod render;
mod trigger;

pub use altitude::{AltitudeRange, AltitudeRangeReporter, AltitudeReportConfig};
pub use builder::{BuildPhase, BuildProgress, CompletedPass, IncrementalMeshBuilder, StartOutcome};
pub use curve::{Keyframe, ResponseCurve};
pub use error::TerrainError;
pub use generator::{PassSummary, TerrainGenerator, TickReport};
pub use heightmap::{NOISE_DOMAIN_BIAS, NoiseHeightSampler};
pub use mesh::{TERRAIN_VERTEX_COLOR, TerrainMesh, grid_indices, vertex_normals};
pub use params::{GenerationParameters, MAX_VERTEX_RESOLUTION};
pub use radial::RadialShaper;
pub use render::TerrainRenderer;
pub use trigger::{RegenerationPolicy, RegenerationTrigger};
