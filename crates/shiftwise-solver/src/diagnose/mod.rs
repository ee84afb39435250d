//! Infeasibility diagnosis.
//!
//! Cheap, independent checks that explain why a schedule cannot cover every
//! seat. The first cause that applies is reported together with remediation
//! hints; when none applies, a structural message names what it can.


use std::collections::BTreeSet;
use std::fmt;

use shiftwise_core::{Money, ShiftIdx};
use tracing::info;

use crate::model::ScheduleModel;

/// One identified cause.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Required coverage hours exceed what the roster can work.
    HoursShortfall {
        required_hours: f64,
        available_hours: f64,
    },
    /// Even the cheapest full cover exceeds the weekly cap.
    BudgetShortfall { cap: Money, minimum_cost: Money },
    /// Even the cheapest cover of one day exceeds the daily cap.
    DailyBudgetShortfall {
        day: u32,
        cap: Money,
        minimum_cost: Money,
    },
    /// No simple count explains it; the constraint combination does.
    Structural {
        /// `shift/role` labels of slots nobody is eligible for.
        uncoverable: Vec<String>,
    },
}

impl Diagnostic {
    /// What to try next.
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            Diagnostic::HoursShortfall { .. } => &[
                "Add more workers",
                "Increase max hours",
                "Reduce shift requirements",
            ],
            Diagnostic::BudgetShortfall { .. } | Diagnostic::DailyBudgetShortfall { .. } => &[
                "Increase weekly budget",
                "Reduce shift requirements",
                "Add lower-cost workers",
            ],
            Diagnostic::Structural { .. } => &[
                "Relax fairness constraints",
                "Widen worker availability",
                "Add more workers",
                "Reduce shift requirements",
            ],
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HoursShortfall {
                required_hours,
                available_hours,
            } => write!(
                f,
                "Not enough worker hours: shifts require {required_hours:.1} hours but workers can cover at most {available_hours:.1} hours (short {:.1} hours)",
                required_hours - available_hours
            ),
            Diagnostic::BudgetShortfall { cap, minimum_cost } => write!(
                f,
                "Budget too tight: weekly cap {cap} is below the minimum possible cost {minimum_cost}. Increase budget to at least {minimum_cost}"
            ),
            Diagnostic::DailyBudgetShortfall {
                day,
                cap,
                minimum_cost,
            } => write!(
                f,
                "Daily budget too tight: cap {cap} is below the minimum cost {minimum_cost} of day {day}. Increase the daily budget to at least {minimum_cost}"
            ),
            Diagnostic::Structural { uncoverable } if uncoverable.is_empty() => f.write_str(
                "No schedule satisfies the rest, consecutive-day, hour and budget constraints together",
            ),
            Diagnostic::Structural { uncoverable } => write!(
                f,
                "No schedule satisfies the rest, consecutive-day, hour and budget constraints together; no eligible workers for {}",
                uncoverable.join(", ")
            ),
        }
    }
}

/// Runs the checks against an encoded model.
#[derive(Debug)]
pub struct InfeasibilityDiagnoser<'a, 'p> {
    model: &'a ScheduleModel<'p>,
}

impl<'a, 'p> InfeasibilityDiagnoser<'a, 'p> {
    pub fn new(model: &'a ScheduleModel<'p>) -> Self {
        Self { model }
    }

    /// Required seat-minutes against the roster's usable minutes. A worker
    /// contributes at most their max hours, and at most the distinct shift
    /// time they are eligible for.
    pub fn hours_check(&self) -> Option<Diagnostic> {
        let problem = self.model.problem();
        let required: i64 = self
            .model
            .slots()
            .iter()
            .map(|s| s.seats as i64 * problem.shift(s.shift).duration())
            .sum();

        let available: i64 = problem
            .workers()
            .iter()
            .map(|w| {
                let shifts: BTreeSet<ShiftIdx> = self
                    .model
                    .worker_slots(w.index)
                    .iter()
                    .map(|&s| self.model.slot(s).shift)
                    .collect();
                let eligible: i64 = shifts.iter().map(|&s| problem.shift(s).duration()).sum();
                eligible.min(w.max_minutes)
            })
            .sum();

        (required > available).then(|| Diagnostic::HoursShortfall {
            required_hours: required as f64 / 60.0,
            available_hours: available as f64 / 60.0,
        })
    }

    /// Cost of filling every coverable seat with its cheapest candidate,
    /// ignoring fairness, rest and hours, against the weekly then daily cap.
    pub fn budget_check(&self) -> Option<Diagnostic> {
        let problem = self.model.problem();
        let budget = problem.budget();
        if budget.weekly_cap.is_none() && budget.daily_cap.is_none() {
            return None;
        }

        let mut per_day = vec![0i64; problem.horizon_days() as usize];
        for slot in self.model.slots() {
            let Some(cheapest) = slot
                .candidates
                .iter()
                .map(|&w| self.model.cost(w, slot.shift))
                .min()
            else {
                continue;
            };
            per_day[problem.shift(slot.shift).day as usize] += cheapest * slot.seats as i64;
        }

        if let Some(cap) = budget.weekly_cap {
            let minimum_cost = Money::from_cents(per_day.iter().sum());
            if minimum_cost > cap {
                return Some(Diagnostic::BudgetShortfall { cap, minimum_cost });
            }
        }
        if let Some(cap) = budget.daily_cap {
            for (day, &cost) in per_day.iter().enumerate() {
                let minimum_cost = Money::from_cents(cost);
                if minimum_cost > cap {
                    return Some(Diagnostic::DailyBudgetShortfall {
                        day: day as u32,
                        cap,
                        minimum_cost,
                    });
                }
            }
        }
        None
    }

    pub fn structural(&self) -> Diagnostic {
        let problem = self.model.problem();
        let uncoverable = self
            .model
            .slots()
            .iter()
            .filter(|s| s.candidates.is_empty())
            .map(|s| {
                let shift = problem.shift(s.shift);
                format!("{}/{}", shift.id, shift.demands[s.demand].role)
            })
            .collect();
        Diagnostic::Structural { uncoverable }
    }

    /// The first count-based cause that applies, if any.
    pub fn find_cause(&self) -> Option<Diagnostic> {
        self.hours_check().or_else(|| self.budget_check())
    }

    /// Human-readable diagnostics, never empty: the cause, then remediation.
    pub fn diagnose(&self) -> Vec<String> {
        let cause = self.find_cause().unwrap_or_else(|| self.structural());
        info!(event = "diagnosis", cause = %cause);
        render(&cause)
    }
}

/// The cause line followed by a `Try:` line.
pub fn render(cause: &Diagnostic) -> Vec<String> {
    vec![
        cause.to_string(),
        format!("Try: {}", cause.remediation().join("; ")),
    ]
}
