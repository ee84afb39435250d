//! Validated, normalized input for one solving run.
//!
//! [`Problem::new`] rejects malformed input with a [`ValidationError`] and
//! resolves every time value to minutes from the start of day 0, so that
//! overlap, rest and cross-day checks are plain interval arithmetic.
//!
//! # Examples
//!
//! ```
//! use shiftwise_core::{ConstraintParameters, Money, Problem, Shift, Worker};
//!
//! let workers = vec![Worker::new("ana", Money::from_dollars(15.0), 40.0)
//!     .with_skill("Server")
//!     .available_days([0])];
//! let shifts = vec![Shift::parse("mon-late", 0, "22:00", "02:00").unwrap().require("Server", 1)];
//!
//! let problem = Problem::new(&workers, &shifts, &ConstraintParameters::default()).unwrap();
//! let shift = problem.shift(0);
//! assert_eq!(shift.start, 22 * 60);
//! assert_eq!(shift.end, 26 * 60);
//! assert_eq!(shift.duration(), 240);
//! ```

use std::collections::{BTreeSet, HashSet};

use crate::domain::{ConstraintParameters, Shift, ShiftCategory, Worker};
use crate::error::ValidationError;
use crate::units::{Money, TimeOfDay, MINUTES_PER_DAY};

/// Position of a worker in [`Problem::workers`].
pub type WorkerIdx = usize;

/// Position of a shift in [`Problem::shifts`].
pub type ShiftIdx = usize;

/// Upper bound on rest when no consecutive-day limit is set.
const MAX_REST_HOURS: f64 = 168.0;

/// A normalized worker.
#[derive(Debug, Clone)]
pub struct WorkerInfo {
    pub index: WorkerIdx,
    pub id: String,
    pub skills: BTreeSet<String>,
    pub rate: Money,
    pub max_minutes: i64,
    /// Availability as absolute `[start, end)` minute spans, sorted, with
    /// touching or overlapping windows merged.
    pub windows: Vec<(i64, i64)>,
    /// Number of availability windows as given, before merging.
    pub window_count: usize,
}

impl WorkerInfo {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// True when one merged availability span fully contains the shift.
    pub fn covers(&self, shift: &ShiftInfo) -> bool {
        self.windows
            .iter()
            .any(|&(start, end)| start <= shift.start && shift.end <= end)
    }
}

/// Headcount demand for one role of one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDemand {
    pub role: String,
    pub count: u32,
    pub required_skill: Option<String>,
}

/// A normalized shift.
#[derive(Debug, Clone)]
pub struct ShiftInfo {
    pub index: ShiftIdx,
    pub id: String,
    pub day: u32,
    /// Minutes from the start of day 0.
    pub start: i64,
    /// Minutes from the start of day 0; past midnight for overnight shifts.
    pub end: i64,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub category: ShiftCategory,
    pub opening_duties: bool,
    pub closing_duties: bool,
    pub demands: Vec<RoleDemand>,
}

impl ShiftInfo {
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    pub fn hours(&self) -> f64 {
        self.duration() as f64 / 60.0
    }

    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }

    /// True when the two half-open intervals intersect.
    #[inline]
    pub fn overlaps(&self, other: &ShiftInfo) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes between the earlier shift's end and the later one's start,
    /// or `None` when they overlap.
    pub fn rest_between(&self, other: &ShiftInfo) -> Option<i64> {
        if self.overlaps(other) {
            return None;
        }
        Some(if self.end <= other.start {
            other.start - self.end
        } else {
            self.start - other.end
        })
    }
}

/// Fairness limits in engine units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FairnessLimits {
    pub max_shift_imbalance: Option<u32>,
    pub max_consecutive_days: Option<u32>,
    pub min_rest_minutes: Option<i64>,
}

/// Budget limits in engine units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetLimits {
    pub weekly_cap: Option<Money>,
    pub daily_cap: Option<Money>,
    pub target: Option<Money>,
}

/// The immutable model shared read-only by every phase and search worker.
#[derive(Debug, Clone)]
pub struct Problem {
    workers: Vec<WorkerInfo>,
    shifts: Vec<ShiftInfo>,
    budget: BudgetLimits,
    fairness: FairnessLimits,
    horizon_days: u32,
}

impl Problem {
    /// Validates and normalizes the raw input.
    pub fn new(
        workers: &[Worker],
        shifts: &[Shift],
        params: &ConstraintParameters,
    ) -> Result<Self, ValidationError> {
        if workers.is_empty() {
            return Err(ValidationError::EmptyWorkers);
        }
        if shifts.is_empty() {
            return Err(ValidationError::EmptyShifts);
        }

        let budget = validate_budget(params)?;
        let fairness = validate_fairness(params)?;

        let mut seen = HashSet::new();
        let mut normalized_workers = Vec::with_capacity(workers.len());
        for (index, worker) in workers.iter().enumerate() {
            if !seen.insert(worker.id.as_str()) {
                return Err(ValidationError::DuplicateWorkerId(worker.id.clone()));
            }
            normalized_workers.push(normalize_worker(index, worker)?);
        }

        let mut seen = HashSet::new();
        let mut normalized_shifts = Vec::with_capacity(shifts.len());
        for (index, shift) in shifts.iter().enumerate() {
            if !seen.insert(shift.id.as_str()) {
                return Err(ValidationError::DuplicateShiftId(shift.id.clone()));
            }
            normalized_shifts.push(normalize_shift(index, shift)?);
        }

        let horizon_days = normalized_shifts
            .iter()
            .map(|s| s.day + 1)
            .max()
            .unwrap_or(1);

        Ok(Self {
            workers: normalized_workers,
            shifts: normalized_shifts,
            budget,
            fairness,
            horizon_days,
        })
    }

    pub fn workers(&self) -> &[WorkerInfo] {
        &self.workers
    }

    pub fn shifts(&self) -> &[ShiftInfo] {
        &self.shifts
    }

    #[inline]
    pub fn worker(&self, index: WorkerIdx) -> &WorkerInfo {
        &self.workers[index]
    }

    #[inline]
    pub fn shift(&self, index: ShiftIdx) -> &ShiftInfo {
        &self.shifts[index]
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    pub fn budget(&self) -> &BudgetLimits {
        &self.budget
    }

    pub fn fairness(&self) -> &FairnessLimits {
        &self.fairness
    }

    /// Number of calendar days spanned by shift start days.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// True when the worker can fill the given role demand of the shift.
    pub fn is_eligible(&self, worker: &WorkerInfo, shift: &ShiftInfo, demand: &RoleDemand) -> bool {
        worker.has_skill(&demand.role)
            && demand
                .required_skill
                .as_deref()
                .map_or(true, |skill| worker.has_skill(skill))
            && shift.duration() <= worker.max_minutes
            && worker.covers(shift)
    }

    /// Cost of the worker working the whole shift.
    #[inline]
    pub fn shift_cost(&self, worker: WorkerIdx, shift: ShiftIdx) -> Money {
        self.workers[worker]
            .rate
            .for_minutes(self.shifts[shift].duration())
    }

    /// Total seats demanded across all shifts and roles.
    pub fn total_seats(&self) -> u64 {
        self.shifts
            .iter()
            .flat_map(|s| s.demands.iter())
            .map(|d| d.count as u64)
            .sum()
    }
}

fn span(day: u32, start: TimeOfDay, end: TimeOfDay) -> (i64, i64) {
    let base = day as i64 * MINUTES_PER_DAY;
    let start = base + start.minutes() as i64;
    let mut end = base + end.minutes() as i64;
    if end < start {
        end += MINUTES_PER_DAY;
    }
    (start, end)
}

fn normalize_worker(index: usize, worker: &Worker) -> Result<WorkerInfo, ValidationError> {
    if worker.hourly_rate < Money::ZERO {
        return Err(ValidationError::invalid(
            format!("worker '{}'.hourly_rate", worker.id),
            "must not be negative",
        ));
    }
    if !worker.max_hours.is_finite() || worker.max_hours < 0.0 {
        return Err(ValidationError::invalid(
            format!("worker '{}'.max_hours", worker.id),
            format!("must be a non-negative number, got {}", worker.max_hours),
        ));
    }

    let mut windows = Vec::with_capacity(worker.availability.len());
    for window in &worker.availability {
        if window.start == window.end || window.start == TimeOfDay::END_OF_DAY {
            return Err(ValidationError::invalid(
                format!("worker '{}'.availability", worker.id),
                format!(
                    "window {}-{} on day {} is empty",
                    window.start, window.end, window.day
                ),
            ));
        }
        windows.push(span(window.day, window.start, window.end));
    }
    let window_count = windows.len();
    windows.sort_unstable();
    let windows = merge_spans(windows);

    Ok(WorkerInfo {
        index,
        id: worker.id.clone(),
        skills: worker.skills.iter().cloned().collect(),
        rate: worker.hourly_rate,
        max_minutes: (worker.max_hours * 60.0).round() as i64,
        windows,
        window_count,
    })
}

/// Joins sorted spans that touch or overlap, so a shift running across
/// midnight fits inside back-to-back availability.
fn merge_spans(sorted: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn normalize_shift(index: usize, shift: &Shift) -> Result<ShiftInfo, ValidationError> {
    if shift.start == shift.end || shift.start == TimeOfDay::END_OF_DAY {
        return Err(ValidationError::InvalidShiftTime {
            shift_id: shift.id.clone(),
        });
    }

    let mut demands = Vec::with_capacity(shift.requirements.len());
    for requirement in &shift.requirements {
        let count = u32::try_from(requirement.count).map_err(|_| {
            ValidationError::NegativeRequirement {
                shift_id: shift.id.clone(),
                role: requirement.role.clone(),
                count: requirement.count,
            }
        })?;
        demands.push(RoleDemand {
            role: requirement.role.clone(),
            count,
            required_skill: requirement.required_skill.clone(),
        });
    }

    let (start, end) = span(shift.day, shift.start, shift.end);
    Ok(ShiftInfo {
        index,
        id: shift.id.clone(),
        day: shift.day,
        start,
        end,
        start_time: shift.start,
        end_time: shift.end,
        category: shift.effective_category(),
        opening_duties: shift.requires_opening_duties(),
        closing_duties: shift.requires_closing_duties(),
        demands,
    })
}

fn validate_budget(params: &ConstraintParameters) -> Result<BudgetLimits, ValidationError> {
    let budget = &params.budget;
    for (field, value) in [
        ("budget.weekly_cap", budget.weekly_cap),
        ("budget.daily_cap", budget.daily_cap),
        ("budget.target", budget.target),
    ] {
        if value.is_some_and(|v| v < Money::ZERO) {
            return Err(ValidationError::invalid(field, "must not be negative"));
        }
    }
    Ok(BudgetLimits {
        weekly_cap: budget.weekly_cap,
        daily_cap: budget.daily_cap,
        target: budget.target,
    })
}

fn validate_fairness(params: &ConstraintParameters) -> Result<FairnessLimits, ValidationError> {
    let fairness = &params.fairness;
    if fairness.max_consecutive_days == Some(0) {
        return Err(ValidationError::invalid(
            "fairness.max_consecutive_days",
            "must be at least 1",
        ));
    }

    let min_rest_minutes = match fairness.min_rest_hours {
        None => None,
        Some(hours) => {
            let ceiling = fairness
                .max_consecutive_days
                .map_or(MAX_REST_HOURS, |days| 24.0 * days as f64);
            if !hours.is_finite() || hours < 0.0 || hours > ceiling {
                return Err(ValidationError::invalid(
                    "fairness.min_rest_hours",
                    format!("must be between 0 and {ceiling}, got {hours}"),
                ));
            }
            Some((hours * 60.0).round() as i64)
        }
    };

    Ok(FairnessLimits {
        max_shift_imbalance: fairness.max_shift_imbalance,
        max_consecutive_days: fairness.max_consecutive_days,
        min_rest_minutes,
    })
}

#[cfg(test)]
mod tests;
