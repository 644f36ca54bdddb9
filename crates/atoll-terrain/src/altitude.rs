//! Altitude range tracking and reporting for color-by-height shading.

use serde::{Deserialize, Serialize};

use crate::render::TerrainRenderer;

/// Minimum and maximum combined height seen during one pass.
///
/// Values are the shaped noise multiplied by the island falloff, *before*
/// the `scale * height` vertical scaling applied to vertex positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltitudeRange {
    /// Lowest combined height.
    pub min: f32,
    /// Highest combined height.
    pub max: f32,
}

impl AltitudeRange {
    /// The identity element for [`include`](Self::include): `min = +inf`, `max = -inf`.
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Widen the range to cover `value`.
    pub fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// `true` until at least one value has been included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// `max - min`, or zero for an empty range.
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }
}

impl Default for AltitudeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Factors applied to the reported maximum altitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeReportConfig {
    /// Overall vertical scale of the displayed terrain object.
    pub vertical_scale: f32,
    /// Multiplier controlling where the color transitions sit.
    pub texture_elevation: f32,
}

impl Default for AltitudeReportConfig {
    fn default() -> Self {
        Self {
            vertical_scale: 1.0,
            texture_elevation: 1.0,
        }
    }
}

/// Holds the altitude range of the most recently completed pass and pushes
/// it to the terrain material.
///
/// The range is replaced only when a pass completes, so readers during an
/// in-flight pass always see the previous pass's values.
#[derive(Clone, Debug, Default)]
pub struct AltitudeRangeReporter {
    config: AltitudeReportConfig,
    latest: Option<AltitudeRange>,
}

impl AltitudeRangeReporter {
    /// Create a reporter with no published range.
    pub fn new(config: AltitudeReportConfig) -> Self {
        Self {
            config,
            latest: None,
        }
    }

    /// Record the range of a completed pass.
    pub fn publish(&mut self, range: AltitudeRange) {
        self.latest = Some(range);
    }

    /// Range of the last completed pass, if any.
    pub fn range(&self) -> Option<AltitudeRange> {
        self.latest
    }

    /// `max * vertical_scale * texture_elevation` for the last completed pass.
    pub fn effective_max(&self) -> Option<f32> {
        self.latest
            .map(|r| r.max * self.config.vertical_scale * self.config.texture_elevation)
    }

    /// Push `(min, effective_max)` to the renderer's material.
    ///
    /// Returns `false` without touching the renderer if no pass has completed.
    pub fn apply(&self, renderer: &mut impl TerrainRenderer) -> bool {
        match (self.latest, self.effective_max()) {
            (Some(range), Some(max)) => {
                renderer.set_height_range(range.min, max);
                true
            }
            _ => false,
        }
    }

    /// Current scale factors.
    pub fn config(&self) -> &AltitudeReportConfig {
        &self.config
    }

    /// Replace the scale factors. Takes effect on the next [`apply`](Self::apply).
    pub fn set_config(&mut self, config: AltitudeReportConfig) {
        self.config = config;
    }
}
