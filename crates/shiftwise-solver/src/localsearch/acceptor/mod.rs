//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a move should be accepted by comparing the
//! resulting score with the last step's score.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use shiftwise_config::AcceptorConfig;
use shiftwise_core::ScheduleScore;

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Accepts or rejects candidate moves.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted.
    fn is_accepted(&mut self, last_step_score: &ScheduleScore, move_score: &ScheduleScore) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &ScheduleScore) {}

    /// Called when a step ends with an applied move.
    fn step_ended(&mut self, _step_score: &ScheduleScore) {}
}

/// The acceptor chosen by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredAcceptor {
    HillClimbing(HillClimbingAcceptor),
    LateAcceptance(LateAcceptanceAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
}

impl ConfiguredAcceptor {
    /// Builds the configured acceptor. `seed` drives any randomness it uses.
    pub fn from_config(config: &AcceptorConfig, seed: u64) -> Self {
        match config {
            AcceptorConfig::HillClimbing => Self::HillClimbing(HillClimbingAcceptor),
            AcceptorConfig::LateAcceptance(la) => Self::LateAcceptance(
                LateAcceptanceAcceptor::new(la.late_acceptance_size.unwrap_or(400)),
            ),
            AcceptorConfig::SimulatedAnnealing(sa) => Self::SimulatedAnnealing(
                SimulatedAnnealingAcceptor::new(
                    sa.starting_temperature.unwrap_or(100.0),
                    sa.decay_rate.unwrap_or(0.999),
                    seed,
                ),
            ),
        }
    }
}

impl Acceptor for ConfiguredAcceptor {
    fn is_accepted(&mut self, last_step_score: &ScheduleScore, move_score: &ScheduleScore) -> bool {
        match self {
            Self::HillClimbing(a) => a.is_accepted(last_step_score, move_score),
            Self::LateAcceptance(a) => a.is_accepted(last_step_score, move_score),
            Self::SimulatedAnnealing(a) => a.is_accepted(last_step_score, move_score),
        }
    }

    fn phase_started(&mut self, initial_score: &ScheduleScore) {
        match self {
            Self::HillClimbing(a) => a.phase_started(initial_score),
            Self::LateAcceptance(a) => a.phase_started(initial_score),
            Self::SimulatedAnnealing(a) => a.phase_started(initial_score),
        }
    }

    fn step_ended(&mut self, step_score: &ScheduleScore) {
        match self {
            Self::HillClimbing(a) => a.step_ended(step_score),
            Self::LateAcceptance(a) => a.step_ended(step_score),
            Self::SimulatedAnnealing(a) => a.step_ended(step_score),
        }
    }
}

#[cfg(test)]
mod tests;
