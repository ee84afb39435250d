//! The encoded assignment model.
//!
//! Decision variables are (seat slot, candidate worker) pairs. A slot is one
//! role requirement of one shift, with a headcount and the workers eligible
//! to fill it. Hard constraints and soft objective terms are listed
//! explicitly so that an absent parameter is simply an absent entry.

mod builder;
mod conflicts;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use conflicts::ShiftConflicts;

use shiftwise_config::ObjectiveWeights;
use shiftwise_core::{Money, Problem, ShiftIdx, WorkerIdx};

/// Position of a slot in [`ScheduleModel::slots`].
pub type SlotIdx = usize;

/// One role requirement of one shift.
#[derive(Debug, Clone)]
pub struct Slot {
    pub index: SlotIdx,
    pub shift: ShiftIdx,
    /// Index into the shift's role demands.
    pub demand: usize,
    pub seats: u32,
    /// Eligible workers, ascending by index.
    pub candidates: Vec<WorkerIdx>,
}

impl Slot {
    #[inline]
    pub fn is_candidate(&self, worker: WorkerIdx) -> bool {
        self.candidates.binary_search(&worker).is_ok()
    }
}

/// Hard constraints. A schedule violating any of them is never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardConstraint {
    /// At most `seats` workers per slot, one slot per shift per worker.
    Headcount,
    /// No worker holds two overlapping shifts.
    NoOverlap,
    /// No worker exceeds their max hours.
    MaxHours,
    /// Longest run of worked calendar days per worker.
    MaxConsecutiveDays(u32),
    /// Minimum minutes between two shifts of the same worker.
    MinRest(i64),
    /// Cap on total cost.
    WeeklyBudget(Money),
    /// Cap on the cost attributed to each day.
    DailyBudget(Money),
}

/// Weighted soft objective terms, minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveTerm {
    /// `weight` per cent of labor cost.
    LaborCost { weight: i64 },
    /// `weight` per cent above the target.
    TargetOverrun { target: Money, weight: i64 },
    /// `weight` per unit of summed squared worker minutes / 3600.
    HoursBalance { weight: i64 },
    /// `weight` per shift of count spread beyond `allowed`.
    ShiftImbalance { allowed: u32, weight: i64 },
}

/// Constraint values resolved for fast incremental checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_consecutive_days: Option<u32>,
    pub min_rest_minutes: Option<i64>,
    pub weekly_cap: Option<i64>,
    pub daily_cap: Option<i64>,
}

/// The full problem encoding, shared read-only by every search worker.
#[derive(Debug)]
pub struct ScheduleModel<'p> {
    problem: &'p Problem,
    slots: Vec<Slot>,
    worker_slots: Vec<Vec<SlotIdx>>,
    conflicts: ShiftConflicts,
    hard: Vec<HardConstraint>,
    objective: Vec<ObjectiveTerm>,
    limits: Limits,
    weights: ObjectiveWeights,
    /// Workers with at least one candidate slot; the only ones counted for imbalance.
    schedulable: Vec<bool>,
    costs: Vec<i64>,
    hint: Vec<(SlotIdx, WorkerIdx)>,
    lower_bound: i64,
}

impl<'p> ScheduleModel<'p> {
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, index: SlotIdx) -> &Slot {
        &self.slots[index]
    }

    /// Slots the worker is a candidate for.
    pub fn worker_slots(&self, worker: WorkerIdx) -> &[SlotIdx] {
        &self.worker_slots[worker]
    }

    pub fn conflicts(&self) -> &ShiftConflicts {
        &self.conflicts
    }

    pub fn hard_constraints(&self) -> &[HardConstraint] {
        &self.hard
    }

    pub fn objective_terms(&self) -> &[ObjectiveTerm] {
        &self.objective
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    #[inline]
    pub fn is_schedulable(&self, worker: WorkerIdx) -> bool {
        self.schedulable[worker]
    }

    /// Cost in cents of the worker taking the shift.
    #[inline]
    pub fn cost(&self, worker: WorkerIdx, shift: ShiftIdx) -> i64 {
        self.costs[worker * self.problem.shift_count() + shift]
    }

    /// Seed assignment supplied by construction.
    pub fn hint(&self) -> &[(SlotIdx, WorkerIdx)] {
        &self.hint
    }

    /// Attaches a seed assignment as the starting point of every search worker.
    pub fn with_hint(mut self, hint: Vec<(SlotIdx, WorkerIdx)>) -> Self {
        self.hint = hint;
        self
    }

    /// Best objective any fully covered schedule could reach.
    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    pub fn total_seats(&self) -> u64 {
        self.slots.iter().map(|s| s.seats as u64).sum()
    }

    pub fn variable_count(&self) -> usize {
        self.slots.iter().map(|s| s.candidates.len()).sum()
    }

    /// Approximate bytes of the shared encoding.
    pub fn estimated_bytes(&self) -> usize {
        let slot_bytes: usize = self
            .slots
            .iter()
            .map(|s| std::mem::size_of::<Slot>() + s.candidates.len() * std::mem::size_of::<WorkerIdx>())
            .sum();
        let worker_slot_bytes: usize = self
            .worker_slots
            .iter()
            .map(|v| std::mem::size_of::<Vec<SlotIdx>>() + v.len() * std::mem::size_of::<SlotIdx>())
            .sum();
        slot_bytes
            + worker_slot_bytes
            + self.conflicts.byte_size()
            + self.costs.len() * std::mem::size_of::<i64>()
    }

    /// Approximate bytes one search worker allocates for its working and best schedules.
    pub fn estimated_worker_bytes(&self) -> usize {
        let workers = self.problem.worker_count();
        let days = self.problem.horizon_days() as usize;
        let seats = self.total_seats() as usize;
        let per_state = self.slots.len() * 48
            + workers * (96 + days * std::mem::size_of::<u16>())
            + days * std::mem::size_of::<i64>();
        2 * per_state + 2 * seats * std::mem::size_of::<(SlotIdx, WorkerIdx)>()
    }

    /// Counts hard constraint violations of an arbitrary assignment set
    /// from scratch. Search never produces violations; this is the
    /// independent check used on final results.
    pub fn count_violations(&self, assignments: &[(SlotIdx, WorkerIdx)]) -> usize {
        let problem = self.problem;
        let workers = problem.worker_count();
        let days = problem.horizon_days() as usize;

        let mut per_slot = vec![0u32; self.slots.len()];
        let mut per_worker: Vec<Vec<ShiftIdx>> = vec![Vec::new(); workers];
        let mut violations = 0;

        for &(slot, worker) in assignments {
            let s = &self.slots[slot];
            if !s.is_candidate(worker) {
                violations += 1;
            }
            per_slot[slot] += 1;
            per_worker[worker].push(s.shift);
        }

        for constraint in &self.hard {
            match *constraint {
                HardConstraint::Headcount => {
                    violations += per_slot
                        .iter()
                        .zip(&self.slots)
                        .filter(|(n, s)| **n > s.seats)
                        .count();
                    for shifts in &per_worker {
                        let mut sorted = shifts.clone();
                        sorted.sort_unstable();
                        violations += sorted.windows(2).filter(|w| w[0] == w[1]).count();
                    }
                }
                HardConstraint::NoOverlap => {
                    violations += count_pairs(&per_worker, |a, b| {
                        a != b && self.conflicts.overlaps(a, b)
                    });
                }
                HardConstraint::MinRest(_) => {
                    violations += count_pairs(&per_worker, |a, b| self.conflicts.short_rest(a, b));
                }
                HardConstraint::MaxHours => {
                    violations += per_worker
                        .iter()
                        .enumerate()
                        .filter(|(w, shifts)| {
                            let minutes: i64 = shifts.iter().map(|&s| problem.shift(s).duration()).sum();
                            minutes > problem.worker(*w).max_minutes
                        })
                        .count();
                }
                HardConstraint::MaxConsecutiveDays(max) => {
                    for shifts in &per_worker {
                        let mut worked = vec![false; days];
                        for &s in shifts {
                            worked[problem.shift(s).day as usize] = true;
                        }
                        let mut run = 0;
                        for day in worked {
                            run = if day { run + 1 } else { 0 };
                            if run > max {
                                violations += 1;
                                break;
                            }
                        }
                    }
                }
                HardConstraint::WeeklyBudget(cap) => {
                    let total: i64 = assignments
                        .iter()
                        .map(|&(slot, w)| self.cost(w, self.slots[slot].shift))
                        .sum();
                    if total > cap.cents() {
                        violations += 1;
                    }
                }
                HardConstraint::DailyBudget(cap) => {
                    let mut per_day = vec![0i64; days];
                    for &(slot, w) in assignments {
                        let shift = self.slots[slot].shift;
                        per_day[problem.shift(shift).day as usize] += self.cost(w, shift);
                    }
                    violations += per_day.iter().filter(|&&c| c > cap.cents()).count();
                }
            }
        }
        violations
    }
}

fn count_pairs(per_worker: &[Vec<ShiftIdx>], mut conflict: impl FnMut(ShiftIdx, ShiftIdx) -> bool) -> usize {
    let mut count = 0;
    for shifts in per_worker {
        for (i, &a) in shifts.iter().enumerate() {
            for &b in &shifts[i + 1..] {
                if conflict(a, b) {
                    count += 1;
                }
            }
        }
    }
    count
}
