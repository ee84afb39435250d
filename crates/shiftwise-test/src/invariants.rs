//! Independent checks of a returned schedule against its input.
//!
//! Works from the raw input and the public [`Assignment`] list only, so it
//! shares no code with the solver it checks.

use std::collections::{BTreeSet, HashMap};

use shiftwise_core::{Assignment, Money, ShiftInfo};

use crate::scenarios::Scenario;

/// Panics with a description of the first broken invariant.
pub fn assert_schedule_invariants(scenario: &Scenario, assignments: &[Assignment]) {
    let problem = scenario.problem();
    let shifts: HashMap<&str, &ShiftInfo> =
        problem.shifts().iter().map(|s| (s.id.as_str(), s)).collect();

    let mut per_worker: HashMap<&str, Vec<&ShiftInfo>> = HashMap::new();
    let mut per_role: HashMap<(&str, &str), u32> = HashMap::new();
    let mut total = Money::ZERO;
    let mut per_day: HashMap<u32, Money> = HashMap::new();

    for a in assignments {
        let shift = shifts
            .get(a.shift_id.as_str())
            .unwrap_or_else(|| panic!("assignment to unknown shift {}", a.shift_id));
        let worker = problem
            .workers()
            .iter()
            .find(|w| w.id == a.worker_id)
            .unwrap_or_else(|| panic!("assignment of unknown worker {}", a.worker_id));
        let demand = shift
            .demands
            .iter()
            .find(|d| d.role == a.role)
            .unwrap_or_else(|| panic!("{} has no role {}", a.shift_id, a.role));

        assert!(
            problem.is_eligible(worker, shift, demand),
            "{} is not eligible for {} as {}",
            a.worker_id,
            a.shift_id,
            a.role
        );
        assert_eq!(a.cost, worker.rate.for_minutes(shift.duration()));

        *per_role.entry((shift.id.as_str(), demand.role.as_str())).or_default() += 1;
        per_worker.entry(worker.id.as_str()).or_default().push(shift);
        total += a.cost;
        *per_day.entry(shift.day).or_default() += a.cost;
    }

    for ((shift_id, role), filled) in &per_role {
        let demand = shifts[shift_id]
            .demands
            .iter()
            .find(|d| d.role == *role)
            .map_or(0, |d| d.count);
        assert!(
            *filled <= demand,
            "{shift_id} {role}: {filled} assigned, {demand} required"
        );
    }

    let fairness = problem.fairness();
    for (worker_id, held) in &mut per_worker {
        held.sort_by_key(|s| s.start);
        let info = problem
            .workers()
            .iter()
            .find(|w| w.id == *worker_id)
            .unwrap_or_else(|| panic!("unknown worker {worker_id}"));

        let minutes: i64 = held.iter().map(|s| s.duration()).sum();
        assert!(
            minutes <= info.max_minutes,
            "{worker_id} works {minutes} minutes, max {}",
            info.max_minutes
        );

        for (i, a) in held.iter().enumerate() {
            for b in &held[i + 1..] {
                assert!(
                    !a.overlaps(b),
                    "{worker_id} holds overlapping {} and {}",
                    a.id,
                    b.id
                );
                if let Some(min_rest) = fairness.min_rest_minutes {
                    let rest = a.rest_between(b).unwrap_or(0);
                    assert!(
                        rest >= min_rest,
                        "{worker_id} rests {rest} minutes between {} and {}",
                        a.id,
                        b.id
                    );
                }
            }
        }

        if let Some(max_run) = fairness.max_consecutive_days {
            let days: BTreeSet<u32> = held.iter().map(|s| s.day).collect();
            let mut run = 0;
            let mut previous: Option<u32> = None;
            for day in days {
                run = if previous == Some(day.wrapping_sub(1)) { run + 1 } else { 1 };
                assert!(run <= max_run, "{worker_id} works {run} consecutive days");
                previous = Some(day);
            }
        }
    }

    let budget = problem.budget();
    if let Some(cap) = budget.weekly_cap {
        assert!(total <= cap, "total cost {total} exceeds cap {cap}");
    }
    if let Some(cap) = budget.daily_cap {
        for (day, cost) in &per_day {
            assert!(*cost <= cap, "day {day} costs {cost}, cap {cap}");
        }
    }
}
