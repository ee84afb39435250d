//! Seeded random problems.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shiftwise_core::{
    AvailabilityWindow, BudgetParameters, ConstraintParameters, FairnessParameters, Money, Shift,
    TimeOfDay, Worker,
};

use crate::scenarios::Scenario;

const ROLES: [&str; 4] = ["Server", "Cook", "Host", "Bartender"];
const START_HOURS: [u8; 8] = [6, 7, 9, 11, 14, 17, 20, 22];

/// Generates a valid random [`Scenario`] from a seed.
///
/// ```
/// use shiftwise_test::RandomProblem;
///
/// let a = RandomProblem::new(7).workers(5).days(3).generate();
/// let b = RandomProblem::new(7).workers(5).days(3).generate();
/// assert_eq!(a.workers, b.workers);
/// assert_eq!(a.shifts, b.shifts);
///
/// // Some workers can take shifts that run past midnight.
/// let wide = RandomProblem::new(1).workers(20).generate();
/// assert!(wide
///     .workers
///     .iter()
///     .flat_map(|w| &w.availability)
///     .any(|win| win.end < win.start));
/// ```
#[derive(Debug, Clone)]
pub struct RandomProblem {
    seed: u64,
    workers: usize,
    days: u32,
    shifts_per_day: usize,
    constrained: bool,
}

impl RandomProblem {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            workers: 8,
            days: 7,
            shifts_per_day: 3,
            constrained: true,
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n.max(1);
        self
    }

    pub fn days(mut self, n: u32) -> Self {
        self.days = n.max(1);
        self
    }

    pub fn shifts_per_day(mut self, n: usize) -> Self {
        self.shifts_per_day = n.max(1);
        self
    }

    /// Whether to draw random budget and fairness parameters.
    pub fn constrained(mut self, yes: bool) -> Self {
        self.constrained = yes;
        self
    }

    pub fn generate(&self) -> Scenario {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let workers = (0..self.workers)
            .map(|i| self.random_worker(&mut rng, i))
            .collect();

        let mut shifts = Vec::new();
        for day in 0..self.days {
            for k in 0..self.shifts_per_day {
                shifts.push(random_shift(&mut rng, format!("d{day}-s{k}"), day));
            }
        }

        let params = if self.constrained {
            random_params(&mut rng)
        } else {
            ConstraintParameters::default()
        };
        Scenario::new(workers, shifts).with_params(params)
    }

    fn random_worker(&self, rng: &mut ChaCha8Rng, i: usize) -> Worker {
        let rate = Money::from_cents(rng.random_range(1_200..=3_000));
        let max_hours = rng.random_range(8..=40) as f64;
        let mut worker = Worker::new(format!("w{i}"), rate, max_hours);

        let primary = ROLES[rng.random_range(0..ROLES.len())];
        worker = worker.with_skill(primary);
        for role in ROLES {
            if role != primary && rng.random_bool(0.25) {
                worker = worker.with_skill(role);
            }
        }

        for day in 0..self.days {
            if !rng.random_bool(0.7) {
                continue;
            }
            let window = match rng.random_range(0..10) {
                0..=3 => AvailabilityWindow::all_day(day),
                4..=6 => {
                    let start = rng.random_range(5..=12u8);
                    let end = rng.random_range(start + 6..=23u8);
                    AvailabilityWindow::new(day, time(start, 0), time(end, 59))
                }
                // Evening into the small hours, for closing shifts.
                _ => AvailabilityWindow::new(day, time(18, 0), time(4, 0)),
            };
            worker = worker.available(window);
        }
        worker
    }
}

fn time(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap_or_else(|e| panic!("{e}"))
}

fn random_shift(rng: &mut ChaCha8Rng, id: String, day: u32) -> Shift {
    let start_hour = START_HOURS[rng.random_range(0..START_HOURS.len())];
    let length = rng.random_range(4..=9u8);
    let end_hour = (start_hour + length) % 24;
    let mut shift = Shift::new(id, day, time(start_hour, 0), time(end_hour, 0));

    let roles = rng.random_range(1..=2);
    let mut picked = Vec::new();
    while picked.len() < roles {
        let role = ROLES[rng.random_range(0..ROLES.len())];
        if !picked.contains(&role) {
            picked.push(role);
            shift = shift.require(role, rng.random_range(0..=2));
        }
    }
    shift
}

fn random_params(rng: &mut ChaCha8Rng) -> ConstraintParameters {
    let mut budget = BudgetParameters::default();
    if rng.random_bool(0.5) {
        budget = budget.with_weekly_cap(Money::from_dollars(rng.random_range(300..=3_000) as f64));
    }
    if rng.random_bool(0.3) {
        budget = budget.with_daily_cap(Money::from_dollars(rng.random_range(150..=600) as f64));
    }
    if rng.random_bool(0.3) {
        budget = budget.with_target(Money::from_dollars(rng.random_range(200..=2_000) as f64));
    }

    let mut fairness = FairnessParameters::default();
    if rng.random_bool(0.5) {
        fairness = fairness.with_max_consecutive_days(rng.random_range(2..=6));
    }
    if rng.random_bool(0.6) {
        fairness = fairness.with_min_rest_hours(rng.random_range(8..=12) as f64);
    }
    if rng.random_bool(0.5) {
        fairness = fairness.with_max_shift_imbalance(rng.random_range(1..=4));
    }
    ConstraintParameters::new(budget, fairness)
}
