//! Worker difficulty ranking and greedy placement priorities.
//!
//! [`rank_workers`] scores how hard each worker is to place. A
//! [`WorkerPriority`] turns that ranking, or any other rule, into the
//! comparable value construction uses to pick between feasible candidates.

mod priority;


pub use priority::{CheapestFirst, DifficultyFirst, LeastLoaded, WorkerPriority};

use std::collections::BTreeSet;

use shiftwise_config::DifficultyWeights;
use shiftwise_core::{Problem, WorkerIdx};

/// Workers ordered hardest to place first.
#[derive(Debug, Clone)]
pub struct WorkerRanking {
    order: Vec<WorkerIdx>,
    hardness: Vec<f64>,
    /// Position of each worker in `order`.
    position: Vec<usize>,
}

impl WorkerRanking {
    /// Worker indices, hardest first.
    pub fn order(&self) -> &[WorkerIdx] {
        &self.order
    }

    pub fn hardness(&self, worker: WorkerIdx) -> f64 {
        self.hardness[worker]
    }

    /// Zero for the hardest worker.
    pub fn position(&self, worker: WorkerIdx) -> usize {
        self.position[worker]
    }
}

/// Scores every worker and sorts them descending by hardness.
///
/// Hardness adds three terms: the skill weight over the number of demanded
/// roles the worker can fill, the availability weight over their window
/// count, and their hourly rate in dollars over the rate divisor. Ties keep
/// input order.
///
/// ```
/// use shiftwise_config::DifficultyWeights;
/// use shiftwise_core::{ConstraintParameters, Money, Problem, Shift, Worker};
/// use shiftwise_solver::ranking::rank_workers;
///
/// let workers = vec![
///     Worker::new("flexible", Money::from_dollars(15.0), 40.0)
///         .with_skills(["Server", "Cook"])
///         .available_days([0, 1]),
///     Worker::new("narrow", Money::from_dollars(15.0), 40.0)
///         .with_skill("Cook")
///         .available_days([0]),
/// ];
/// let shifts = vec![Shift::parse("mon", 0, "11:00", "17:00")
///     .unwrap()
///     .require("Server", 1)
///     .require("Cook", 1)];
/// let problem = Problem::new(&workers, &shifts, &ConstraintParameters::default()).unwrap();
///
/// let ranking = rank_workers(&problem, &DifficultyWeights::default());
/// assert_eq!(ranking.order(), &[1, 0]);
/// ```
pub fn rank_workers(problem: &Problem, weights: &DifficultyWeights) -> WorkerRanking {
    let demanded: BTreeSet<&str> = problem
        .shifts()
        .iter()
        .flat_map(|s| s.demands.iter())
        .filter(|d| d.count > 0)
        .map(|d| d.role.as_str())
        .collect();

    let hardness: Vec<f64> = problem
        .workers()
        .iter()
        .map(|w| {
            let roles = demanded.iter().filter(|r| w.has_skill(r)).count().max(1);
            let windows = w.window_count.max(1);
            let rate_term = if weights.rate_divisor > 0.0 {
                w.rate.as_dollars() / weights.rate_divisor
            } else {
                0.0
            };
            weights.skill_weight / roles as f64
                + weights.availability_weight / windows as f64
                + rate_term
        })
        .collect();

    let mut order: Vec<WorkerIdx> = (0..problem.worker_count()).collect();
    order.sort_by(|&a, &b| hardness[b].total_cmp(&hardness[a]));

    let mut position = vec![0; order.len()];
    for (pos, &w) in order.iter().enumerate() {
        position[w] = pos;
    }

    WorkerRanking {
        order,
        hardness,
        position,
    }
}
