//! Termination conditions for a search worker.

mod best_score;
mod composite;
mod deadline;
mod external;
mod step_count;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use deadline::DeadlineTermination;
pub use external::ExternalTermination;
pub use step_count::{StepCountTermination, UnimprovedStepCountTermination};

/// Decides when a search worker stops.
pub trait Termination: Send + Debug {
    /// Returns true if searching should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}
