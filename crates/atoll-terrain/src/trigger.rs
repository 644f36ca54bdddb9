//! Decides when a new generation pass should start.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::{IncrementalMeshBuilder, StartOutcome};
use crate::error::TerrainError;
use crate::params::GenerationParameters;

/// When the trigger restarts generation after a pass completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegenerationPolicy {
    /// Generate once per configuration; regenerate only after
    /// [`RegenerationTrigger::invalidate`].
    #[default]
    Once,
    /// Start a new pass on every tick the builder is idle.
    Continuous,
}

/// Polls the builder once per tick and starts a pass when appropriate.
#[derive(Clone, Debug, Default)]
pub struct RegenerationTrigger {
    policy: RegenerationPolicy,
    latched: bool,
}

impl RegenerationTrigger {
    /// Create a trigger that will start the first pass on its first poll.
    pub fn new(policy: RegenerationPolicy) -> Self {
        Self {
            policy,
            latched: false,
        }
    }

    /// Start a pass if the builder is idle and the current configuration
    /// still needs one. Returns whether a pass was started.
    pub fn poll(
        &mut self,
        builder: &mut IncrementalMeshBuilder,
        params: &GenerationParameters,
    ) -> Result<bool, TerrainError> {
        if !builder.is_idle() {
            return Ok(false);
        }
        if self.latched && self.policy == RegenerationPolicy::Once {
            return Ok(false);
        }

        let started = builder.start(params)? == StartOutcome::Started;
        if started {
            debug!(policy = ?self.policy, "regeneration triggered");
        }
        Ok(started)
    }

    /// Record that a pass for the current configuration has completed.
    pub fn mark_completed(&mut self) {
        self.latched = true;
    }

    /// Forget the completed pass so the next poll regenerates.
    pub fn invalidate(&mut self) {
        self.latched = false;
    }

    /// `true` once a pass for the current configuration has completed.
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Active policy.
    pub fn policy(&self) -> RegenerationPolicy {
        self.policy
    }

    /// Switch policy. Does not clear the latch.
    pub fn set_policy(&mut self, policy: RegenerationPolicy) {
        self.policy = policy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildProgress;

    fn small() -> GenerationParameters {
        GenerationParameters {
            vertex_resolution: 2,
            rows_per_slice: 1,
            ..Default::default()
        }
    }

    fn finish(builder: &mut IncrementalMeshBuilder) {
        while !builder.advance().is_completed() {}
    }

    #[test]
    fn test_first_poll_starts_a_pass() {
        let mut trigger = RegenerationTrigger::default();
        let mut builder = IncrementalMeshBuilder::new();
        assert_eq!(trigger.poll(&mut builder, &small()), Ok(true));
        assert!(!builder.is_idle());
    }

    #[test]
    fn test_no_start_while_building() {
        let mut trigger = RegenerationTrigger::new(RegenerationPolicy::Continuous);
        let mut builder = IncrementalMeshBuilder::new();
        trigger.poll(&mut builder, &small()).unwrap();
        builder.advance();
        assert_eq!(trigger.poll(&mut builder, &small()), Ok(false));
    }

    #[test]
    fn test_once_policy_latches_after_completion() {
        let mut trigger = RegenerationTrigger::new(RegenerationPolicy::Once);
        let mut builder = IncrementalMeshBuilder::new();

        trigger.poll(&mut builder, &small()).unwrap();
        finish(&mut builder);
        trigger.mark_completed();

        for _ in 0..5 {
            assert_eq!(trigger.poll(&mut builder, &small()), Ok(false));
            assert!(matches!(builder.advance(), BuildProgress::Idle));
        }
        assert_eq!(builder.passes_completed(), 1);
    }

    #[test]
    fn test_invalidate_restarts_once_policy() {
        let mut trigger = RegenerationTrigger::new(RegenerationPolicy::Once);
        let mut builder = IncrementalMeshBuilder::new();

        trigger.poll(&mut builder, &small()).unwrap();
        finish(&mut builder);
        trigger.mark_completed();
        assert!(trigger.is_latched());

        trigger.invalidate();
        assert!(!trigger.is_latched());
        assert_eq!(trigger.poll(&mut builder, &small()), Ok(true));
    }

    #[test]
    fn test_continuous_policy_restarts_after_completion() {
        let mut trigger = RegenerationTrigger::new(RegenerationPolicy::Continuous);
        let mut builder = IncrementalMeshBuilder::new();

        for _ in 0..3 {
            assert_eq!(trigger.poll(&mut builder, &small()), Ok(true));
            finish(&mut builder);
            trigger.mark_completed();
        }
        assert_eq!(builder.passes_completed(), 3);
    }

    #[test]
    fn test_invalid_params_surface_from_poll() {
        let mut trigger = RegenerationTrigger::default();
        let mut builder = IncrementalMeshBuilder::new();
        let bad = GenerationParameters {
            rows_per_slice: 0,
            ..small()
        };
        assert_eq!(
            trigger.poll(&mut builder, &bad),
            Err(TerrainError::ZeroRowsPerSlice)
        );
        assert!(builder.is_idle());
    }
}
