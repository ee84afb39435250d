//! Simulated annealing acceptor.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shiftwise_core::ScheduleScore;

use super::Acceptor;

/// Accepts a worsening objective with probability `exp(-delta / T)`.
///
/// A move that leaves more seats open is never accepted; the temperature
/// only trades objective units. The temperature decays multiplicatively
/// each step.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    rng: ChaCha8Rng,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay_rate: f64, seed: u64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, last_step_score: &ScheduleScore, move_score: &ScheduleScore) -> bool {
        if move_score >= last_step_score {
            return true;
        }
        if move_score.hard() < last_step_score.hard()
            || move_score.medium() < last_step_score.medium()
            || self.current_temperature <= 0.0
        {
            return false;
        }
        let delta = (last_step_score.soft() - move_score.soft()) as f64;
        let probability = (-delta / self.current_temperature).exp();
        self.rng.random::<f64>() < probability
    }

    fn phase_started(&mut self, _initial_score: &ScheduleScore) {
        self.current_temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_score: &ScheduleScore) {
        self.current_temperature *= self.decay_rate;
    }
}
