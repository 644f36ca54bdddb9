//! Terrain generation error types.

/// Errors raised when generation parameters are rejected.
///
/// Sampling and meshing never fail; only parameter validation does, and it
/// always happens before any builder state is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// `rows_per_slice` was zero, so the builder could never decide when to yield.
    #[error("rows_per_slice must be greater than zero")]
    ZeroRowsPerSlice,

    /// A numeric parameter was outside its accepted range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Field name as it appears in [`GenerationParameters`](crate::GenerationParameters).
        name: &'static str,
        /// The rejected value, widened for display.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },
}
