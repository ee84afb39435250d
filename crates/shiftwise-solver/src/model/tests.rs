use shiftwise_config::{ObjectiveWeights, SolverConfig};
use shiftwise_core::{
    BudgetParameters, ConstraintParameters, FairnessParameters, Money, Problem,
};
use shiftwise_test::{scenarios, shift, worker, RandomProblem, Scenario};

use super::*;

fn build(problem: &Problem) -> ScheduleModel<'_> {
    ModelBuilder::new(problem).build()
}

#[test]
fn test_conflict_cache_matches_interval_arithmetic() {
    for seed in 0..6 {
        let scenario = RandomProblem::new(seed).days(4).shifts_per_day(4).generate();
        let problem = scenario.problem();
        let rest = problem.fairness().min_rest_minutes;
        let serial = ShiftConflicts::build(&problem, rest, usize::MAX);
        let parallel = ShiftConflicts::build(&problem, rest, 0);

        for a in problem.shifts() {
            for b in problem.shifts() {
                let expected_overlap = a.start < b.end && b.start < a.end;
                assert_eq!(serial.overlaps(a.index, b.index), expected_overlap);
                assert_eq!(parallel.overlaps(a.index, b.index), expected_overlap);

                let gap = if a.end <= b.start {
                    b.start - a.end
                } else {
                    a.start - b.end
                };
                let expected_short =
                    !expected_overlap && rest.map_or(false, |min| gap < min);
                assert_eq!(serial.short_rest(a.index, b.index), expected_short);
                assert_eq!(parallel.short_rest(a.index, b.index), expected_short);
            }
        }
    }
}

#[test]
fn test_overnight_rest_detected_across_days() {
    let problem = scenarios::clopening().problem();
    let conflicts = ShiftConflicts::build(&problem, Some(600), 256);
    assert!(!conflicts.overlaps(0, 1));
    assert!(conflicts.short_rest(0, 1));
    assert!(conflicts.short_rest(1, 0));
    assert_eq!(conflicts.short_rest_pairs(), 1);
}

#[test]
fn test_slot_candidates() {
    let scenario = Scenario::new(
        vec![
            worker("a", 15.0, 40.0, &["Server"], &[0]),
            worker("b", 15.0, 40.0, &["Cook"], &[0]),
            worker("c", 15.0, 4.0, &["Server"], &[0]),
            worker("d", 15.0, 40.0, &["Server"], &[1]),
        ],
        vec![shift("lunch", 0, "11:00", "17:00", "Server", 2)],
    );
    let problem = scenario.problem();
    let model = build(&problem);

    assert_eq!(model.slots().len(), 1);
    let slot = model.slot(0);
    assert_eq!(slot.seats, 2);
    assert_eq!(slot.candidates, vec![0]);
    assert_eq!(model.worker_slots(0), &[0]);
    assert!(model.worker_slots(1).is_empty());
    assert!(model.is_schedulable(0));
    assert!(!model.is_schedulable(2));
}

#[test]
fn test_zero_count_requirement_has_no_slot() {
    let scenario = Scenario::new(
        vec![worker("a", 15.0, 40.0, &["Server"], &[0])],
        vec![shift("lunch", 0, "11:00", "17:00", "Server", 0)],
    );
    let problem = scenario.problem();
    assert!(build(&problem).slots().is_empty());
}

#[test]
fn test_optional_steps_follow_parameters() {
    let unconstrained = scenarios::single_server().problem();
    let model = build(&unconstrained);
    assert_eq!(
        model.hard_constraints(),
        &[
            HardConstraint::Headcount,
            HardConstraint::NoOverlap,
            HardConstraint::MaxHours
        ]
    );
    assert_eq!(model.limits(), &Limits::default());
    assert!(model
        .objective_terms()
        .iter()
        .all(|t| !matches!(t, ObjectiveTerm::TargetOverrun { .. } | ObjectiveTerm::ShiftImbalance { .. })));

    let params = ConstraintParameters::new(
        BudgetParameters::default()
            .with_weekly_cap(Money::from_dollars(500.0))
            .with_daily_cap(Money::from_dollars(100.0))
            .with_target(Money::from_dollars(80.0)),
        FairnessParameters::recommended(),
    );
    let scenario = scenarios::single_server().with_params(params);
    let problem = scenario.problem();
    let model = build(&problem);

    let hard = model.hard_constraints();
    assert!(hard.contains(&HardConstraint::MaxConsecutiveDays(6)));
    assert!(hard.contains(&HardConstraint::MinRest(600)));
    assert!(hard.contains(&HardConstraint::WeeklyBudget(Money::from_dollars(500.0))));
    assert!(hard.contains(&HardConstraint::DailyBudget(Money::from_dollars(100.0))));
    assert_eq!(model.limits().weekly_cap, Some(50_000));
    assert_eq!(model.limits().daily_cap, Some(10_000));
    assert!(model.objective_terms().contains(&ObjectiveTerm::TargetOverrun {
        target: Money::from_dollars(80.0),
        weight: 10,
    }));
    assert!(model.objective_terms().contains(&ObjectiveTerm::ShiftImbalance {
        allowed: 3,
        weight: 500,
    }));
}

#[test]
fn test_zero_balance_weight_omits_term() {
    let problem = scenarios::single_server().problem();
    let weights = ObjectiveWeights {
        hours_balance: 0,
        ..ObjectiveWeights::default()
    };
    let model = ModelBuilder::new(&problem).with_weights(weights).build();
    assert!(!model
        .objective_terms()
        .iter()
        .any(|t| matches!(t, ObjectiveTerm::HoursBalance { .. })));
}

#[test]
fn test_lower_bound_single_server() {
    let problem = scenarios::single_server().problem();
    let model = build(&problem);
    // $90.00 labor plus 360² / 3600 balance.
    assert_eq!(model.lower_bound(), 9_000 + 36);
    assert_eq!(model.cost(0, 0), 9_000);
}

#[test]
fn test_lower_bound_uses_cheapest_candidate() {
    let problem = scenarios::budget_shortfall().problem();
    let model = build(&problem);
    // Two eight-hour seats at $20/h, 960 minutes spread over two workers.
    let balance = 960 * 960 / 2 / 3600;
    assert_eq!(model.lower_bound(), 2 * 16_000 + balance);
}

#[test]
fn test_from_config_uses_weights() {
    let problem = scenarios::single_server().problem();
    let mut config = SolverConfig::new();
    config.objective.cost = 3;
    let model = ModelBuilder::from_config(&problem, &config).build();
    assert_eq!(model.weights().cost, 3);
    assert_eq!(model.lower_bound(), 3 * 9_000 + 36);
}

#[test]
fn test_count_violations() {
    let problem = scenarios::overlapping_pair().problem();
    let model = build(&problem);
    assert_eq!(model.count_violations(&[]), 0);
    assert_eq!(model.count_violations(&[(0, 0)]), 0);
    assert_eq!(model.count_violations(&[(0, 0), (1, 0)]), 1);

    let problem = scenarios::clopening().problem();
    let model = build(&problem);
    assert_eq!(model.count_violations(&[(0, 0), (1, 0)]), 1);

    let problem = scenarios::hours_shortfall().problem();
    let model = build(&problem);
    assert_eq!(model.count_violations(&[(0, 0), (1, 0)]), 1);
}

#[test]
fn test_count_violations_budget_and_days() {
    let problem = scenarios::budget_shortfall().problem();
    let model = build(&problem);
    assert_eq!(model.count_violations(&[(0, 0)]), 0);
    assert_eq!(model.count_violations(&[(0, 0), (1, 0)]), 1);

    let problem = scenarios::consecutive_days().problem();
    let model = build(&problem);
    let three: Vec<_> = (0..3).map(|s| (s, 0)).collect();
    assert_eq!(model.count_violations(&three), 0);
    let four: Vec<_> = (0..4).map(|s| (s, 0)).collect();
    assert_eq!(model.count_violations(&four), 1);
}

#[test]
fn test_estimates_are_positive() {
    let problem = scenarios::small_restaurant().problem();
    let model = build(&problem);
    assert!(model.estimated_bytes() > 0);
    assert!(model.estimated_worker_bytes() > 0);
    assert_eq!(model.total_seats(), problem.total_seats());
}
