//! Local search refinement of the seed schedule.

mod acceptor;
mod moves;
mod phase;
mod selector;

#[cfg(test)]
mod tests;

pub use acceptor::{
    Acceptor, ConfiguredAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    SimulatedAnnealingAcceptor,
};
pub use moves::ScheduleMove;
pub use phase::LocalSearchPhase;
pub use selector::MoveSelector;
