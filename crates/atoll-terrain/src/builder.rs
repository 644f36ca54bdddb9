//! Time-sliced terrain mesh construction.
//!
//! [`IncrementalMeshBuilder`] spreads one generation pass over many host
//! ticks. Each call to [`advance`](IncrementalMeshBuilder::advance) fills
//! vertex rows until a slice boundary is reached (`row % rows_per_slice == 0`,
//! which includes row 0), then returns control. Once every row is filled the
//! same call triangulates the grid and hands back the finished mesh.

use std::time::Instant;

use glam::{Vec2, Vec3};
use tracing::{debug, info, trace, warn};

use crate::altitude::AltitudeRange;
use crate::error::TerrainError;
use crate::heightmap::NoiseHeightSampler;
use crate::mesh::TerrainMesh;
use crate::params::GenerationParameters;
use crate::radial::RadialShaper;

/// Externally visible builder state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildPhase {
    /// No pass in flight.
    Idle,
    /// A pass is in flight; `row` is the next row to be filled.
    Building {
        /// Next row to fill.
        row: u32,
    },
}

/// Result of [`IncrementalMeshBuilder::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh pass was allocated.
    Started,
    /// A pass was already in flight; the request was ignored.
    AlreadyBuilding,
}

/// Result of one [`IncrementalMeshBuilder::advance`] call.
#[derive(Debug)]
pub enum BuildProgress {
    /// Nothing to do.
    Idle,
    /// The pass yielded at a slice boundary.
    InProgress {
        /// Rows filled so far.
        rows_done: u32,
        /// Rows in the whole grid (`vertex_resolution + 1`).
        total_rows: u32,
    },
    /// The pass finished during this call.
    Completed(CompletedPass),
}

impl BuildProgress {
    /// `true` for [`BuildProgress::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Output of a finished pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedPass {
    /// The finished mesh.
    pub mesh: TerrainMesh,
    /// Range of the pre-scale combined heights.
    pub altitude: AltitudeRange,
    /// Number of `advance` calls the pass took.
    pub slices: u32,
}

/// Working state of one in-flight pass.
///
/// Buffers are allocated up front at full size; the row cursor indexes into them.
#[derive(Debug)]
struct MeshBuildState {
    params: GenerationParameters,
    height_sampler: NoiseHeightSampler,
    radial_shaper: RadialShaper,
    row: u32,
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    altitude: AltitudeRange,
    slices: u32,
    started_at: Instant,
}

impl MeshBuildState {
    fn new(params: GenerationParameters) -> Self {
        let vertex_count = params.vertex_count();
        Self {
            height_sampler: NoiseHeightSampler::new(&params),
            radial_shaper: RadialShaper::new(&params),
            row: 0,
            positions: vec![Vec3::ZERO; vertex_count],
            uvs: vec![Vec2::ZERO; vertex_count],
            altitude: AltitudeRange::EMPTY,
            slices: 0,
            started_at: Instant::now(),
            params,
        }
    }

    fn resolution(&self) -> u32 {
        self.params.vertex_resolution
    }

    /// Fill rows until a slice boundary. Returns `true` once every row is done.
    fn run_slice(&mut self) -> bool {
        self.slices += 1;
        while self.row <= self.resolution() {
            let row = self.row;
            self.fill_row(row);
            self.row += 1;

            if row % self.params.rows_per_slice == 0 {
                debug!(row, slice = self.slices, "terrain slice suspended");
                return false;
            }
        }
        true
    }

    fn fill_row(&mut self, row: u32) {
        let res = self.resolution();
        let row_len = self.params.row_len();
        let square_size = self.params.square_size();
        let vertical_scale = self.params.scale * self.params.height;

        for col in 0..=res {
            let shaped = self.height_sampler.sample(row, col);
            let falloff = self.radial_shaper.shape(row, col);
            let combined = shaped * falloff;

            let index = row as usize * row_len + col as usize;
            self.positions[index] = Vec3::new(
                col as f32 * square_size - 0.5,
                vertical_scale * combined,
                row as f32 * square_size - 0.5,
            );
            self.uvs[index] = Vec2::new(grid_fraction(col, res), grid_fraction(row, res));
            self.altitude.include(combined);
        }

        trace!(row, "terrain row filled");
    }

    fn finish(self) -> CompletedPass {
        let resolution = self.resolution();
        let mesh = TerrainMesh::from_grid(resolution, self.positions, self.uvs);

        info!(
            resolution,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            min_altitude = self.altitude.min,
            max_altitude = self.altitude.max,
            slices = self.slices,
            elapsed_ms = self.started_at.elapsed().as_secs_f64() * 1000.0,
            "terrain pass complete"
        );

        CompletedPass {
            mesh,
            altitude: self.altitude,
            slices: self.slices,
        }
    }
}

/// `index / resolution`, or zero for the single-vertex grid.
fn grid_fraction(index: u32, resolution: u32) -> f32 {
    if resolution == 0 {
        0.0
    } else {
        index as f32 / resolution as f32
    }
}

#[derive(Debug)]
enum BuilderState {
    Idle,
    Building(Box<MeshBuildState>),
}

/// Builds a terrain mesh across multiple host ticks.
///
/// At most one pass is in flight at a time; the pass owns a snapshot of the
/// parameters it was started with.
#[derive(Debug)]
pub struct IncrementalMeshBuilder {
    state: BuilderState,
    passes_completed: u64,
}

impl IncrementalMeshBuilder {
    /// Create an idle builder.
    pub fn new() -> Self {
        Self {
            state: BuilderState::Idle,
            passes_completed: 0,
        }
    }

    /// Begin a new pass with a snapshot of `params`.
    ///
    /// Parameters are validated before anything else, so a rejected request
    /// leaves the builder untouched. A request while a pass is already in
    /// flight is ignored.
    pub fn start(&mut self, params: &GenerationParameters) -> Result<StartOutcome, TerrainError> {
        params.validate()?;

        if let BuilderState::Building(build) = &self.state {
            warn!(
                row = build.row,
                "terrain generation already in progress, ignoring start request"
            );
            return Ok(StartOutcome::AlreadyBuilding);
        }

        debug!(
            resolution = params.vertex_resolution,
            octaves = params.octaves,
            rows_per_slice = params.rows_per_slice,
            "terrain pass started"
        );
        self.state = BuilderState::Building(Box::new(MeshBuildState::new(params.clone())));
        Ok(StartOutcome::Started)
    }

    /// Run one time slice of the in-flight pass.
    pub fn advance(&mut self) -> BuildProgress {
        let (finished, rows_done, total_rows) = match &mut self.state {
            BuilderState::Idle => return BuildProgress::Idle,
            BuilderState::Building(build) => {
                let finished = build.run_slice();
                (finished, build.row, build.resolution() + 1)
            }
        };

        if !finished {
            return BuildProgress::InProgress {
                rows_done,
                total_rows,
            };
        }

        match std::mem::replace(&mut self.state, BuilderState::Idle) {
            BuilderState::Building(build) => {
                self.passes_completed += 1;
                BuildProgress::Completed(build.finish())
            }
            BuilderState::Idle => BuildProgress::Idle,
        }
    }

    /// Discard the in-flight pass, if any. Returns whether one was discarded.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, BuilderState::Idle) {
            BuilderState::Building(build) => {
                debug!(row = build.row, "terrain pass cancelled");
                true
            }
            BuilderState::Idle => false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BuildPhase {
        match &self.state {
            BuilderState::Idle => BuildPhase::Idle,
            BuilderState::Building(build) => BuildPhase::Building { row: build.row },
        }
    }

    /// `true` when no pass is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, BuilderState::Idle)
    }

    /// Number of passes that ran to completion.
    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }

    /// Run a complete pass synchronously on a private builder.
    pub fn build_blocking(params: &GenerationParameters) -> Result<CompletedPass, TerrainError> {
        let mut builder = Self::new();
        builder.start(params)?;
        loop {
            if let BuildProgress::Completed(pass) = builder.advance() {
                return Ok(pass);
            }
        }
    }
}

impl Default for IncrementalMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}
