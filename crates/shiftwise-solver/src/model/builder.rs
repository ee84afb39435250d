//! Composable construction of the [`ScheduleModel`].
//!
//! The mandatory constraints are always added. Every optional budget or
//! fairness parameter maps to its own step, skipped when the parameter is
//! absent.

use std::time::Instant;

use shiftwise_config::{ObjectiveWeights, SolverConfig};
use shiftwise_core::{Money, Problem, WorkerIdx};
use tracing::{debug, info};

use super::{HardConstraint, Limits, ObjectiveTerm, ScheduleModel, ShiftConflicts, Slot, SlotIdx};

const SECONDS_PER_HOUR_SQUARED: i128 = 3600;

/// Builds a [`ScheduleModel`] from a validated [`Problem`].
///
/// # Example
///
/// ```
/// use shiftwise_core::{ConstraintParameters, Money, Problem, Shift, Worker};
/// use shiftwise_solver::model::{HardConstraint, ModelBuilder};
///
/// let workers = vec![Worker::new("ana", Money::from_dollars(15.0), 40.0)
///     .with_skill("Server")
///     .available_days([0])];
/// let shifts = vec![Shift::parse("lunch", 0, "11:00", "17:00").unwrap().require("Server", 1)];
/// let problem = Problem::new(&workers, &shifts, &ConstraintParameters::default()).unwrap();
///
/// let model = ModelBuilder::new(&problem).build();
/// assert_eq!(model.variable_count(), 1);
/// assert!(model.hard_constraints().contains(&HardConstraint::NoOverlap));
/// assert!(!model
///     .hard_constraints()
///     .iter()
///     .any(|c| matches!(c, HardConstraint::WeeklyBudget(_))));
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder<'p> {
    problem: &'p Problem,
    weights: ObjectiveWeights,
    parallel_threshold: usize,
}

impl<'p> ModelBuilder<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        Self {
            problem,
            weights: ObjectiveWeights::default(),
            parallel_threshold: 256,
        }
    }

    pub fn from_config(problem: &'p Problem, config: &SolverConfig) -> Self {
        Self {
            problem,
            weights: config.objective,
            parallel_threshold: config.parallel_conflict_threshold,
        }
    }

    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn build(self) -> ScheduleModel<'p> {
        let started = Instant::now();
        let problem = self.problem;
        let fairness = *problem.fairness();
        let budget = *problem.budget();

        let conflicts =
            ShiftConflicts::build(problem, fairness.min_rest_minutes, self.parallel_threshold);
        let (slots, worker_slots) = encode_slots(problem);
        let schedulable = worker_slots.iter().map(|s| !s.is_empty()).collect();
        let costs = encode_costs(problem);

        let mut model = ScheduleModel {
            problem,
            slots,
            worker_slots,
            conflicts,
            hard: Vec::new(),
            objective: Vec::new(),
            limits: Limits::default(),
            weights: self.weights,
            schedulable,
            costs,
            hint: Vec::new(),
            lower_bound: 0,
        };

        add_headcount(&mut model);
        add_no_overlap(&mut model);
        add_max_hours(&mut model);
        if let Some(days) = fairness.max_consecutive_days {
            add_max_consecutive_days(&mut model, days);
        }
        if let Some(minutes) = fairness.min_rest_minutes {
            add_min_rest(&mut model, minutes);
        }
        if let Some(cap) = budget.weekly_cap {
            add_weekly_budget(&mut model, cap);
        }
        if let Some(cap) = budget.daily_cap {
            add_daily_budget(&mut model, cap);
        }

        add_labor_cost(&mut model, self.weights.cost);
        if let Some(target) = budget.target {
            add_target_overrun(&mut model, target, self.weights.target_overrun);
        }
        if self.weights.hours_balance > 0 {
            add_hours_balance(&mut model, self.weights.hours_balance);
        }
        if let Some(allowed) = fairness.max_shift_imbalance {
            add_shift_imbalance(&mut model, allowed, self.weights.shift_imbalance);
        }

        model.lower_bound = objective_lower_bound(&model);

        info!(
            event = "model_built",
            slots = model.slots.len(),
            variables = model.variable_count(),
            hard_constraints = model.hard.len(),
            objective_terms = model.objective.len(),
            overlap_pairs = model.conflicts.overlap_pairs(),
            rest_pairs = model.conflicts.short_rest_pairs(),
            lower_bound = model.lower_bound,
            elapsed_ms = started.elapsed().as_millis() as u64,
        );
        model
    }
}

fn encode_slots(problem: &Problem) -> (Vec<Slot>, Vec<Vec<SlotIdx>>) {
    let mut slots = Vec::new();
    let mut worker_slots = vec![Vec::new(); problem.worker_count()];

    for shift in problem.shifts() {
        for (demand_index, demand) in shift.demands.iter().enumerate() {
            if demand.count == 0 {
                continue;
            }
            let index = slots.len();
            let candidates: Vec<WorkerIdx> = problem
                .workers()
                .iter()
                .filter(|w| problem.is_eligible(w, shift, demand))
                .map(|w| w.index)
                .collect();
            for &w in &candidates {
                worker_slots[w].push(index);
            }
            debug!(
                event = "slot_encoded",
                shift = %shift.id,
                role = %demand.role,
                seats = demand.count,
                candidates = candidates.len(),
            );
            slots.push(Slot {
                index,
                shift: shift.index,
                demand: demand_index,
                seats: demand.count,
                candidates,
            });
        }
    }
    (slots, worker_slots)
}

fn encode_costs(problem: &Problem) -> Vec<i64> {
    let shifts = problem.shift_count();
    let mut costs = Vec::with_capacity(problem.worker_count() * shifts);
    for w in 0..problem.worker_count() {
        for s in 0..shifts {
            costs.push(problem.shift_cost(w, s).cents());
        }
    }
    costs
}

fn add_headcount(model: &mut ScheduleModel<'_>) {
    model.hard.push(HardConstraint::Headcount);
}

fn add_no_overlap(model: &mut ScheduleModel<'_>) {
    model.hard.push(HardConstraint::NoOverlap);
}

fn add_max_hours(model: &mut ScheduleModel<'_>) {
    model.hard.push(HardConstraint::MaxHours);
}

fn add_max_consecutive_days(model: &mut ScheduleModel<'_>, days: u32) {
    model.hard.push(HardConstraint::MaxConsecutiveDays(days));
    model.limits.max_consecutive_days = Some(days);
}

fn add_min_rest(model: &mut ScheduleModel<'_>, minutes: i64) {
    model.hard.push(HardConstraint::MinRest(minutes));
    model.limits.min_rest_minutes = Some(minutes);
}

fn add_weekly_budget(model: &mut ScheduleModel<'_>, cap: Money) {
    model.hard.push(HardConstraint::WeeklyBudget(cap));
    model.limits.weekly_cap = Some(cap.cents());
}

fn add_daily_budget(model: &mut ScheduleModel<'_>, cap: Money) {
    model.hard.push(HardConstraint::DailyBudget(cap));
    model.limits.daily_cap = Some(cap.cents());
}

fn add_labor_cost(model: &mut ScheduleModel<'_>, weight: i64) {
    model.objective.push(ObjectiveTerm::LaborCost { weight });
}

fn add_target_overrun(model: &mut ScheduleModel<'_>, target: Money, weight: i64) {
    model
        .objective
        .push(ObjectiveTerm::TargetOverrun { target, weight });
}

fn add_hours_balance(model: &mut ScheduleModel<'_>, weight: i64) {
    model.objective.push(ObjectiveTerm::HoursBalance { weight });
}

fn add_shift_imbalance(model: &mut ScheduleModel<'_>, allowed: u32, weight: i64) {
    model
        .objective
        .push(ObjectiveTerm::ShiftImbalance { allowed, weight });
}

/// Objective of the cheapest conceivable full cover: every seat at its
/// cheapest candidate, hours spread perfectly evenly, no imbalance.
fn objective_lower_bound(model: &ScheduleModel<'_>) -> i64 {
    let problem = model.problem;
    let mut cheapest_cost = 0i64;
    let mut total_minutes = 0i128;
    for slot in &model.slots {
        let Some(min_cost) = slot
            .candidates
            .iter()
            .map(|&w| model.cost(w, slot.shift))
            .min()
        else {
            continue;
        };
        cheapest_cost += min_cost * slot.seats as i64;
        total_minutes += problem.shift(slot.shift).duration() as i128 * slot.seats as i128;
    }
    let schedulable = model.schedulable.iter().filter(|s| **s).count().max(1) as i128;

    model
        .objective
        .iter()
        .map(|term| match *term {
            ObjectiveTerm::LaborCost { weight } => weight * cheapest_cost,
            ObjectiveTerm::TargetOverrun { target, weight } => {
                weight * (cheapest_cost - target.cents()).max(0)
            }
            ObjectiveTerm::HoursBalance { weight } => {
                let spread = total_minutes * total_minutes / schedulable / SECONDS_PER_HOUR_SQUARED;
                weight * spread as i64
            }
            ObjectiveTerm::ShiftImbalance { .. } => 0,
        })
        .sum()
}
