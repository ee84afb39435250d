//! Result metrics: cost, budget use, hour distribution, fairness and gaps.


use std::fmt;

use shiftwise_core::{Assignment, Money, ScheduleScore, ShiftCategory, WorkerIdx};

use crate::model::{ScheduleModel, SlotIdx};

/// Rest below which a close followed by an open counts as a clopening.
const CLOPENING_REST_MINUTES: i64 = 12 * 60;

/// Fairness points lost per hour of standard deviation.
const FAIRNESS_POINTS_PER_HOUR: f64 = 10.0;

/// Why a seat stayed open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GapReason {
    NoEligibleWorkers,
    TooFewEligible { eligible: usize, needed: u32 },
    /// Enough eligible workers exist but budget, fairness or hours kept them off.
    ConstraintConflict,
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapReason::NoEligibleWorkers => {
                f.write_str("No workers available with required skills and availability")
            }
            GapReason::TooFewEligible { eligible, needed } => {
                write!(f, "Only {eligible} eligible workers, need {needed}")
            }
            GapReason::ConstraintConflict => {
                f.write_str("Scheduling conflict (budget, fairness, or hour constraints)")
            }
        }
    }
}

/// One under-filled role of one shift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoverageGap {
    pub shift_id: String,
    pub day: u32,
    pub time_range: String,
    pub category: ShiftCategory,
    pub role: String,
    pub required_skill: Option<String>,
    pub missing: u32,
    pub eligible_workers: usize,
    pub reason: GapReason,
}

/// Spend against the configured cap and target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BudgetReport {
    pub cap: Option<Money>,
    /// Percent of the cap spent.
    pub utilization_pct: Option<f64>,
    /// Cap minus spend.
    pub remaining: Option<Money>,
    pub target: Option<Money>,
    /// Spend minus target; positive means over.
    pub target_variance: Option<Money>,
}

/// Distribution of scheduled hours over every worker, idle ones included.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HoursSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkerLoad {
    pub worker_id: String,
    pub hours: f64,
    pub shifts: usize,
    pub cost: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoverageSummary {
    pub total_seats: u64,
    pub filled_seats: u64,
    pub coverage_pct: f64,
}

/// Everything reported alongside a solved schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleMetrics {
    pub total_cost: Money,
    pub total_hours: f64,
    pub budget: BudgetReport,
    pub hours: HoursSummary,
    /// 0 to 100, higher is more even; see [`fairness_score`].
    pub fairness_score: f64,
    pub workers: Vec<WorkerLoad>,
    pub workers_used: usize,
    /// Mean hours over workers with at least one shift.
    pub average_hours: f64,
    pub coverage: CoverageSummary,
    pub unfilled: Vec<CoverageGap>,
    pub clopenings: usize,
    pub score: ScheduleScore,
}

/// Balance score over the workers who work at all.
///
/// `100 - 10 * std_dev(hours)`, clamped to `0..=100`. Fewer than two
/// working workers, or a zero mean, score 100.
///
/// ```
/// use shiftwise_solver::metrics::fairness_score;
///
/// assert_eq!(fairness_score(&[]), 100.0);
/// assert_eq!(fairness_score(&[12.0]), 100.0);
/// assert_eq!(fairness_score(&[10.0, 10.0, 0.0]), 100.0);
/// assert_eq!(fairness_score(&[8.0, 12.0]), 80.0);
/// assert_eq!(fairness_score(&[1.0, 40.0]), 0.0);
/// ```
pub fn fairness_score(hours: &[f64]) -> f64 {
    let working: Vec<f64> = hours.iter().copied().filter(|&h| h > 0.0).collect();
    if working.len() < 2 {
        return 100.0;
    }
    let n = working.len() as f64;
    let mean = working.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 100.0;
    }
    let variance = working.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n;
    (100.0 - variance.sqrt() * FAIRNESS_POINTS_PER_HOUR).clamp(0.0, 100.0)
}

/// Computes metrics and output records for an assignment set.
#[derive(Debug)]
pub struct MetricsReporter<'a, 'p> {
    model: &'a ScheduleModel<'p>,
}

impl<'a, 'p> MetricsReporter<'a, 'p> {
    pub fn new(model: &'a ScheduleModel<'p>) -> Self {
        Self { model }
    }

    /// Output records, ordered by shift start, then shift, role and worker.
    pub fn assignments(&self, pairs: &[(SlotIdx, WorkerIdx)]) -> Vec<Assignment> {
        let problem = self.model.problem();
        let mut ordered = pairs.to_vec();
        ordered.sort_by_key(|&(slot, w)| {
            let s = self.model.slot(slot);
            (problem.shift(s.shift).start, s.shift, s.demand, w)
        });
        ordered
            .into_iter()
            .map(|(slot, w)| {
                let s = self.model.slot(slot);
                let shift = problem.shift(s.shift);
                Assignment {
                    worker_id: problem.worker(w).id.clone(),
                    shift_id: shift.id.clone(),
                    role: shift.demands[s.demand].role.clone(),
                    day: shift.day,
                    start: shift.start_time,
                    end: shift.end_time,
                    hours: shift.hours(),
                    cost: problem.shift_cost(w, s.shift),
                }
            })
            .collect()
    }

    pub fn report(&self, pairs: &[(SlotIdx, WorkerIdx)], score: ScheduleScore) -> ScheduleMetrics {
        let problem = self.model.problem();
        let workers = problem.worker_count();

        let mut minutes = vec![0i64; workers];
        let mut costs = vec![Money::ZERO; workers];
        let mut held: Vec<Vec<usize>> = vec![Vec::new(); workers];
        let mut filled = vec![0u32; self.model.slots().len()];
        for &(slot, w) in pairs {
            let shift = self.model.slot(slot).shift;
            minutes[w] += problem.shift(shift).duration();
            costs[w] += problem.shift_cost(w, shift);
            held[w].push(shift);
            filled[slot] += 1;
        }

        let total_cost: Money = costs.iter().copied().sum();
        let hours: Vec<f64> = minutes.iter().map(|&m| m as f64 / 60.0).collect();
        let total_hours = hours.iter().sum();

        let loads: Vec<WorkerLoad> = problem
            .workers()
            .iter()
            .map(|w| WorkerLoad {
                worker_id: w.id.clone(),
                hours: hours[w.index],
                shifts: held[w.index].len(),
                cost: costs[w.index],
            })
            .collect();
        let workers_used = loads.iter().filter(|l| l.shifts > 0).count();
        let average_hours = if workers_used == 0 {
            0.0
        } else {
            total_hours / workers_used as f64
        };

        let total_seats = self.model.total_seats();
        let filled_seats = pairs.len() as u64;
        let coverage = CoverageSummary {
            total_seats,
            filled_seats,
            coverage_pct: if total_seats == 0 {
                100.0
            } else {
                filled_seats as f64 * 100.0 / total_seats as f64
            },
        };

        ScheduleMetrics {
            total_cost,
            total_hours,
            budget: self.budget_report(total_cost),
            hours: summarize(&hours),
            fairness_score: fairness_score(&hours),
            workers: loads,
            workers_used,
            average_hours,
            coverage,
            unfilled: self.gaps(&filled),
            clopenings: self.clopenings(&mut held),
            score,
        }
    }

    fn budget_report(&self, spent: Money) -> BudgetReport {
        let budget = self.model.problem().budget();
        let cap = budget.weekly_cap;
        BudgetReport {
            cap,
            utilization_pct: cap.filter(|c| c.cents() > 0).map(|c| {
                spent.cents() as f64 * 100.0 / c.cents() as f64
            }),
            remaining: cap.map(|c| c - spent),
            target: budget.target,
            target_variance: budget.target.map(|t| spent - t),
        }
    }

    fn gaps(&self, filled: &[u32]) -> Vec<CoverageGap> {
        let problem = self.model.problem();
        let mut gaps = Vec::new();
        for slot in self.model.slots() {
            let missing = slot.seats - filled[slot.index];
            if missing == 0 {
                continue;
            }
            let shift = problem.shift(slot.shift);
            let demand = &shift.demands[slot.demand];
            let eligible = slot.candidates.len();
            let reason = if eligible == 0 {
                GapReason::NoEligibleWorkers
            } else if eligible < slot.seats as usize {
                GapReason::TooFewEligible {
                    eligible,
                    needed: slot.seats,
                }
            } else {
                GapReason::ConstraintConflict
            };
            gaps.push(CoverageGap {
                shift_id: shift.id.clone(),
                day: shift.day,
                time_range: shift.time_range(),
                category: shift.category,
                role: demand.role.clone(),
                required_skill: demand.required_skill.clone(),
                missing,
                eligible_workers: eligible,
                reason,
            });
        }
        gaps
    }

    /// Back-to-back closing then opening duty with under twelve hours between.
    fn clopenings(&self, held: &mut [Vec<usize>]) -> usize {
        let problem = self.model.problem();
        let mut count = 0;
        for shifts in held.iter_mut() {
            shifts.sort_by_key(|&s| problem.shift(s).start);
            shifts.dedup();
            count += shifts
                .windows(2)
                .filter(|pair| {
                    let (a, b) = (problem.shift(pair[0]), problem.shift(pair[1]));
                    a.closing_duties && b.opening_duties && b.start - a.end < CLOPENING_REST_MINUTES
                })
                .count();
        }
        count
    }
}

fn summarize(hours: &[f64]) -> HoursSummary {
    if hours.is_empty() {
        return HoursSummary::default();
    }
    let n = hours.len() as f64;
    let mean = hours.iter().sum::<f64>() / n;
    HoursSummary {
        min: hours.iter().copied().fold(f64::INFINITY, f64::min),
        max: hours.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean,
        variance: hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n,
    }
}
