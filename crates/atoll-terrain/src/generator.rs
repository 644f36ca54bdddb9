//! One terrain instance: parameters, builder, trigger and altitude reporting
//! wired together behind a single per-tick entry point.

use tracing::{debug, info};

use crate::altitude::{AltitudeRange, AltitudeRangeReporter, AltitudeReportConfig};
use crate::builder::{BuildPhase, BuildProgress, IncrementalMeshBuilder};
use crate::error::TerrainError;
use crate::params::GenerationParameters;
use crate::render::TerrainRenderer;
use crate::trigger::{RegenerationPolicy, RegenerationTrigger};

/// Statistics of a pass that was handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSummary {
    /// Altitude range published for the pass.
    pub altitude: AltitudeRange,
    /// Vertices in the emitted mesh.
    pub vertex_count: usize,
    /// Triangles in the emitted mesh.
    pub triangle_count: usize,
    /// Ticks the pass took.
    pub slices: u32,
}

/// What happened during one [`TerrainGenerator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickReport {
    /// No pass in flight and none needed.
    Idle,
    /// A pass is in flight.
    Building {
        /// Rows filled so far.
        rows_done: u32,
        /// Rows in the whole grid.
        total_rows: u32,
    },
    /// A pass completed and was emitted to the renderer.
    Emitted(PassSummary),
}

/// A single terrain instance driven by the host's tick loop.
#[derive(Debug)]
pub struct TerrainGenerator {
    params: GenerationParameters,
    builder: IncrementalMeshBuilder,
    reporter: AltitudeRangeReporter,
    trigger: RegenerationTrigger,
    /// The in-flight pass was started from parameters that have since changed.
    stale_pass: bool,
}

impl TerrainGenerator {
    /// Create a generator. The first pass starts on the first tick.
    pub fn new(
        params: GenerationParameters,
        report: AltitudeReportConfig,
        policy: RegenerationPolicy,
    ) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            params,
            builder: IncrementalMeshBuilder::new(),
            reporter: AltitudeRangeReporter::new(report),
            trigger: RegenerationTrigger::new(policy),
            stale_pass: false,
        })
    }

    /// Replace the generation parameters.
    ///
    /// Rejected parameters leave the generator unchanged. Changed parameters
    /// schedule a new pass once the builder is idle; a pass already in flight
    /// finishes with the parameters it started with, is still emitted, and is
    /// followed by a pass with the new parameters.
    pub fn set_params(&mut self, params: GenerationParameters) -> Result<(), TerrainError> {
        params.validate()?;
        if params != self.params {
            info!("terrain parameters changed, scheduling regeneration");
            self.params = params;
            self.trigger.invalidate();
            self.stale_pass = !self.builder.is_idle();
        }
        Ok(())
    }

    /// Replace the altitude report factors and re-push the material range.
    pub fn set_report_config(
        &mut self,
        config: AltitudeReportConfig,
        renderer: &mut impl TerrainRenderer,
    ) {
        self.reporter.set_config(config);
        self.reporter.apply(renderer);
    }

    /// Switch the regeneration policy.
    pub fn set_policy(&mut self, policy: RegenerationPolicy) {
        self.trigger.set_policy(policy);
    }

    /// Run one scheduling tick: maybe start a pass, advance the builder one
    /// slice, and emit the result if the pass completed.
    ///
    /// On completion the material range is pushed before the mesh is handed over.
    pub fn tick(&mut self, renderer: &mut impl TerrainRenderer) -> Result<TickReport, TerrainError> {
        self.trigger.poll(&mut self.builder, &self.params)?;

        let report = match self.builder.advance() {
            BuildProgress::Idle => TickReport::Idle,
            BuildProgress::InProgress {
                rows_done,
                total_rows,
            } => TickReport::Building {
                rows_done,
                total_rows,
            },
            BuildProgress::Completed(pass) => {
                self.reporter.publish(pass.altitude);
                self.reporter.apply(renderer);
                if std::mem::take(&mut self.stale_pass) {
                    debug!("completed pass predates a parameter change, regenerating");
                    self.trigger.invalidate();
                } else {
                    self.trigger.mark_completed();
                }

                let summary = PassSummary {
                    altitude: pass.altitude,
                    vertex_count: pass.mesh.vertex_count(),
                    triangle_count: pass.mesh.triangle_count(),
                    slices: pass.slices,
                };
                renderer.replace_mesh(pass.mesh);
                TickReport::Emitted(summary)
            }
        };

        Ok(report)
    }

    /// Discard the in-flight pass. The trigger may start a new one next tick.
    pub fn cancel(&mut self) -> bool {
        self.stale_pass = false;
        self.builder.cancel()
    }

    /// Current parameters.
    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    /// Altitude range of the last completed pass.
    pub fn altitude(&self) -> Option<AltitudeRange> {
        self.reporter.range()
    }

    /// The altitude reporter.
    pub fn reporter(&self) -> &AltitudeRangeReporter {
        &self.reporter
    }

    /// The underlying builder.
    pub fn builder(&self) -> &IncrementalMeshBuilder {
        &self.builder
    }

    /// Builder phase.
    pub fn phase(&self) -> BuildPhase {
        self.builder.phase()
    }

    /// Number of passes completed so far.
    pub fn completed_passes(&self) -> u64 {
        self.builder.passes_completed()
    }

    /// Active regeneration policy.
    pub fn policy(&self) -> RegenerationPolicy {
        self.trigger.policy()
    }
}
