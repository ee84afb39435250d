//! Step count terminations.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a step count.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.step_count() >= self.limit
    }
}

/// Terminates after a number of steps without a new best.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.unimproved_step_count() >= self.limit
    }
}
