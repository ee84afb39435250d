//! Incremental schedule state.
//!
//! Holds one candidate assignment set plus the running totals every hard
//! check and objective term needs, so that assigning or removing one worker
//! costs time proportional to that worker's held shifts rather than to the
//! whole schedule. Every mutation keeps the state free of hard violations:
//! callers check before they assign.

use std::fmt;

use shiftwise_core::{ScheduleScore, ShiftIdx, WorkerIdx};
use smallvec::SmallVec;

use crate::model::{ObjectiveTerm, ScheduleModel, SlotIdx};

const MINUTES_SQUARED_PER_HOUR: i64 = 3600;

/// Why a worker cannot take a seat right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    NotCandidate,
    SlotFull,
    /// Overlap or insufficient rest against a held shift.
    Conflict(ShiftIdx),
    MaxHours,
    ConsecutiveDays,
    WeeklyBudget,
    DailyBudget,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::NotCandidate => f.write_str("not eligible"),
            Blocker::SlotFull => f.write_str("slot already full"),
            Blocker::Conflict(s) => write!(f, "conflicts with held shift {s}"),
            Blocker::MaxHours => f.write_str("max hours reached"),
            Blocker::ConsecutiveDays => f.write_str("too many consecutive days"),
            Blocker::WeeklyBudget => f.write_str("weekly budget cap"),
            Blocker::DailyBudget => f.write_str("daily budget cap"),
        }
    }
}

/// A hard-feasible, possibly partial, schedule.
#[derive(Debug, Clone)]
pub struct ScheduleState<'m, 'p> {
    model: &'m ScheduleModel<'p>,
    days: usize,
    slot_workers: Vec<SmallVec<[WorkerIdx; 4]>>,
    worker_shifts: Vec<SmallVec<[ShiftIdx; 8]>>,
    worker_minutes: Vec<i64>,
    /// Shifts starting on each day, indexed `worker * days + day`.
    worker_day_load: Vec<u16>,
    day_cost: Vec<i64>,
    total_cost: i64,
    sum_sq_minutes: i64,
    filled: u64,
}

impl<'m, 'p> ScheduleState<'m, 'p> {
    /// An empty schedule.
    pub fn new(model: &'m ScheduleModel<'p>) -> Self {
        let problem = model.problem();
        let workers = problem.worker_count();
        let days = problem.horizon_days() as usize;
        Self {
            model,
            days,
            slot_workers: vec![SmallVec::new(); model.slots().len()],
            worker_shifts: vec![SmallVec::new(); workers],
            worker_minutes: vec![0; workers],
            worker_day_load: vec![0; workers * days],
            day_cost: vec![0; days],
            total_cost: 0,
            sum_sq_minutes: 0,
            filled: 0,
        }
    }

    /// Replays assignments in order, skipping any that would break a hard
    /// constraint against the ones already placed.
    pub fn from_assignments(model: &'m ScheduleModel<'p>, assignments: &[(SlotIdx, WorkerIdx)]) -> Self {
        let mut state = Self::new(model);
        for &(slot, worker) in assignments {
            if slot < model.slots().len() && worker < model.problem().worker_count() {
                let _ = state.try_assign(slot, worker);
            }
        }
        state
    }

    pub fn model(&self) -> &'m ScheduleModel<'p> {
        self.model
    }

    /// Checks every hard constraint for adding `worker` to `slot`.
    pub fn check(&self, slot: SlotIdx, worker: WorkerIdx) -> Result<(), Blocker> {
        let model = self.model;
        let s = model.slot(slot);
        if !s.is_candidate(worker) {
            return Err(Blocker::NotCandidate);
        }
        if self.slot_workers[slot].len() as u32 >= s.seats {
            return Err(Blocker::SlotFull);
        }

        let conflicts = model.conflicts();
        if let Some(&held) = self.worker_shifts[worker]
            .iter()
            .find(|&&held| conflicts.excludes(s.shift, held))
        {
            return Err(Blocker::Conflict(held));
        }

        let shift = model.problem().shift(s.shift);
        if self.worker_minutes[worker] + shift.duration() > model.problem().worker(worker).max_minutes {
            return Err(Blocker::MaxHours);
        }

        let limits = model.limits();
        let day = shift.day as usize;
        if let Some(max) = limits.max_consecutive_days {
            if self.run_with(worker, day) > max {
                return Err(Blocker::ConsecutiveDays);
            }
        }

        let cost = model.cost(worker, s.shift);
        if limits.weekly_cap.is_some_and(|cap| self.total_cost + cost > cap) {
            return Err(Blocker::WeeklyBudget);
        }
        if limits.daily_cap.is_some_and(|cap| self.day_cost[day] + cost > cap) {
            return Err(Blocker::DailyBudget);
        }
        Ok(())
    }

    /// Length of the worked-day run through `day` if the worker also works `day`.
    fn run_with(&self, worker: WorkerIdx, day: usize) -> u32 {
        let loads = &self.worker_day_load[worker * self.days..(worker + 1) * self.days];
        if loads[day] > 0 {
            return 0;
        }
        let before = loads[..day].iter().rev().take_while(|&&n| n > 0).count();
        let after = loads[day + 1..].iter().take_while(|&&n| n > 0).count();
        (before + after + 1) as u32
    }

    /// Adds `worker` to `slot` after a successful [`check`](Self::check).
    pub fn try_assign(&mut self, slot: SlotIdx, worker: WorkerIdx) -> Result<(), Blocker> {
        self.check(slot, worker)?;
        self.assign_unchecked(slot, worker);
        Ok(())
    }

    fn assign_unchecked(&mut self, slot: SlotIdx, worker: WorkerIdx) {
        let shift_index = self.model.slot(slot).shift;
        let shift = self.model.problem().shift(shift_index);
        let cost = self.model.cost(worker, shift_index);
        let day = shift.day as usize;

        self.slot_workers[slot].push(worker);
        self.worker_shifts[worker].push(shift_index);

        let before = self.worker_minutes[worker];
        let after = before + shift.duration();
        self.worker_minutes[worker] = after;
        self.sum_sq_minutes += after * after - before * before;

        self.worker_day_load[worker * self.days + day] += 1;
        self.day_cost[day] += cost;
        self.total_cost += cost;
        self.filled += 1;
    }

    /// Removes `worker` from `slot`. Returns false when they did not hold it.
    pub fn unassign(&mut self, slot: SlotIdx, worker: WorkerIdx) -> bool {
        let Some(pos) = self.slot_workers[slot].iter().position(|&w| w == worker) else {
            return false;
        };
        self.slot_workers[slot].remove(pos);

        let shift_index = self.model.slot(slot).shift;
        if let Some(pos) = self.worker_shifts[worker].iter().position(|&s| s == shift_index) {
            self.worker_shifts[worker].remove(pos);
        }

        let shift = self.model.problem().shift(shift_index);
        let cost = self.model.cost(worker, shift_index);
        let day = shift.day as usize;

        let before = self.worker_minutes[worker];
        let after = before - shift.duration();
        self.worker_minutes[worker] = after;
        self.sum_sq_minutes += after * after - before * before;

        self.worker_day_load[worker * self.days + day] -= 1;
        self.day_cost[day] -= cost;
        self.total_cost -= cost;
        self.filled -= 1;
        true
    }

    #[inline]
    pub fn slot_workers(&self, slot: SlotIdx) -> &[WorkerIdx] {
        &self.slot_workers[slot]
    }

    #[inline]
    pub fn open_seats(&self, slot: SlotIdx) -> u32 {
        self.model.slot(slot).seats - self.slot_workers[slot].len() as u32
    }

    pub fn holds(&self, slot: SlotIdx, worker: WorkerIdx) -> bool {
        self.slot_workers[slot].contains(&worker)
    }

    pub fn worker_shifts(&self, worker: WorkerIdx) -> &[ShiftIdx] {
        &self.worker_shifts[worker]
    }

    #[inline]
    pub fn worker_minutes(&self, worker: WorkerIdx) -> i64 {
        self.worker_minutes[worker]
    }

    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    pub fn day_cost(&self, day: usize) -> i64 {
        self.day_cost[day]
    }

    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Seats still open across all slots.
    pub fn unfilled(&self) -> u64 {
        self.model.total_seats() - self.filled
    }

    /// Weighted objective; lower is better.
    pub fn objective(&self) -> i64 {
        self.model
            .objective_terms()
            .iter()
            .map(|term| match *term {
                ObjectiveTerm::LaborCost { weight } => weight * self.total_cost,
                ObjectiveTerm::TargetOverrun { target, weight } => {
                    weight * (self.total_cost - target.cents()).max(0)
                }
                ObjectiveTerm::HoursBalance { weight } => {
                    weight * (self.sum_sq_minutes / MINUTES_SQUARED_PER_HOUR)
                }
                ObjectiveTerm::ShiftImbalance { allowed, weight } => {
                    weight * (self.shift_spread() - allowed as i64).max(0)
                }
            })
            .sum()
    }

    /// Max minus min shift count over workers with at least one candidate slot.
    pub fn shift_spread(&self) -> i64 {
        let mut counts = self
            .worker_shifts
            .iter()
            .enumerate()
            .filter(|(w, _)| self.model.is_schedulable(*w))
            .map(|(_, shifts)| shifts.len() as i64);
        let Some(first) = counts.next() else {
            return 0;
        };
        let (min, max) = counts.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
        max - min
    }

    pub fn score(&self) -> ScheduleScore {
        ScheduleScore::penalized(0, self.unfilled() as i64, self.objective())
    }

    /// All (slot, worker) pairs, ascending.
    pub fn assignments(&self) -> Vec<(SlotIdx, WorkerIdx)> {
        let mut out: Vec<(SlotIdx, WorkerIdx)> = self
            .slot_workers
            .iter()
            .enumerate()
            .flat_map(|(slot, workers)| workers.iter().map(move |&w| (slot, w)))
            .collect();
        out.sort_unstable();
        out
    }
}
