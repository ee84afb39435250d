//! Wall-clock deadline.

use std::time::Instant;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the shared run deadline has passed.
///
/// ```
/// use std::time::{Duration, Instant};
/// use shiftwise_solver::termination::DeadlineTermination;
///
/// let term = DeadlineTermination::new(Instant::now() + Duration::from_secs(30));
/// assert!(!term.has_passed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeadlineTermination {
    deadline: Instant,
}

impl DeadlineTermination {
    pub fn new(deadline: Instant) -> Self {
        Self { deadline }
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

impl Termination for DeadlineTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        self.has_passed()
    }
}
