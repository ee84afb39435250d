use std::time::Duration;

use shiftwise_config::{EnvironmentMode, SolverConfig, WorkerPriorityType};
use shiftwise_core::{ConstraintParameters, Money, ShiftwiseError, ValidationError};
use shiftwise_test::{assert_schedule_invariants, scenarios, shift, worker, RandomProblem, Scenario};

use super::*;
use crate::metrics::GapReason;

fn config() -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(5)
        .with_search_workers(2)
        .with_time_limit(Duration::from_secs(20))
}

fn run(scenario: &Scenario, config: &SolverConfig) -> ScheduleResult {
    let result = solve_problem(&scenario.workers, &scenario.shifts, &scenario.params, config).unwrap();
    assert_schedule_invariants(scenario, result.assignments());
    result
}

#[test]
fn test_single_server_scheduled_at_rate_times_hours() {
    let result = run(&scenarios::single_server(), &config());

    assert_eq!(result.status(), SolveStatus::Optimal);
    assert!(result.status().is_solved());
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.assignments()[0].worker_id, "alice");
    let metrics = result.metrics().unwrap();
    assert_eq!(metrics.total_cost, Money::from_dollars(90.0));
    assert!(metrics.unfilled.is_empty());
}

#[test]
fn test_overlapping_shifts_fill_one_and_disclose_the_other() {
    let result = run(&scenarios::overlapping_pair(), &config());

    assert_eq!(result.status(), SolveStatus::Feasible);
    assert_eq!(result.assignments().len(), 1);
    let gaps = &result.metrics().unwrap().unfilled;
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].missing, 1);
    assert_eq!(gaps[0].reason, GapReason::ConstraintConflict);
}

#[test]
fn test_budget_below_minimum_cover_is_infeasible() {
    let result = run(&scenarios::budget_shortfall(), &config());

    assert_eq!(result.status(), SolveStatus::Infeasible);
    assert!(result.assignments().is_empty());
    let text = result.diagnostics().join("\n");
    assert!(text.contains("$320.00"), "{text}");
    assert!(text.contains("$200.00"), "{text}");
}

#[test]
fn test_hours_shortfall_is_infeasible_with_both_totals() {
    let result = run(&scenarios::hours_shortfall(), &config());

    assert_eq!(result.status(), SolveStatus::Infeasible);
    let text = result.diagnostics().join("\n");
    assert!(text.contains("16.0"), "{text}");
    assert!(text.contains("10.0"), "{text}");
}

#[test]
fn test_consecutive_day_limit_respected() {
    let result = run(&scenarios::consecutive_days(), &config());

    assert!(result.status().is_solved());
    let mut days: Vec<u32> = result.assignments().iter().map(|a| a.day).collect();
    days.sort_unstable();
    let mut run_len = 0;
    let mut longest = 0;
    for (i, &day) in days.iter().enumerate() {
        run_len = if i > 0 && days[i - 1] + 1 == day { run_len + 1 } else { 1 };
        longest = longest.max(run_len);
    }
    assert!(longest <= 3, "worked {days:?}");
    assert_eq!(
        result.metrics().unwrap().unfilled.len(),
        5 - result.assignments().len()
    );
}

#[test]
fn test_overnight_close_then_open_never_co_assigned() {
    let result = run(&scenarios::clopening(), &config());

    assert_eq!(result.status(), SolveStatus::Feasible);
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.metrics().unwrap().clopenings, 0);
}

#[test]
fn test_overnight_shift_taken_by_worker_free_both_days() {
    let scenario = Scenario::new(
        vec![worker("nia", 15.0, 40.0, &["Server"], &[0, 1])],
        vec![shift("mon-late", 0, "22:00", "02:00", "Server", 1)],
    );
    let result = run(&scenario, &config());

    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.assignments()[0].worker_id, "nia");
    assert_eq!(result.metrics().unwrap().total_cost, Money::from_dollars(60.0));
}

#[test]
fn test_zero_time_limit_keeps_the_construction_seed() {
    let config = SolverConfig::new().with_time_limit(Duration::ZERO);
    let result = run(&scenarios::single_server(), &config);

    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.metrics().unwrap().total_cost, Money::from_dollars(90.0));
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_zero_time_limit_partial_seed_is_still_reported() {
    let scenario = scenarios::small_restaurant();
    let config = SolverConfig::new().with_time_limit(Duration::ZERO);
    let result = run(&scenario, &config);

    assert_ne!(result.status(), SolveStatus::TimeoutNoSolution);
    if result.status().is_solved() {
        assert!(!result.assignments().is_empty());
    } else {
        assert!(!result.diagnostics().is_empty());
    }
}

#[test]
fn test_zero_time_limit_with_empty_seed_times_out_with_diagnostics() {
    let scenario = Scenario::new(
        vec![worker("dee", 22.0, 40.0, &["Cook"], &[0])],
        vec![shift("mon-floor", 0, "11:00", "17:00", "Server", 1)],
    );
    let config = SolverConfig::new().with_time_limit(Duration::ZERO);
    let result = run(&scenario, &config);

    assert_eq!(result.status(), SolveStatus::TimeoutNoSolution);
    assert!(!result.diagnostics().is_empty());
    assert!(result.metrics().is_none());
    match result.into_result() {
        Err(ShiftwiseError::TimeoutNoSolution { diagnostics }) => assert!(!diagnostics.is_empty()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_infeasible_maps_onto_error() {
    let result = run(&scenarios::budget_shortfall(), &config());
    assert!(matches!(
        result.into_result(),
        Err(ShiftwiseError::Infeasible { .. })
    ));
}

#[test]
fn test_empty_input_is_a_validation_error() {
    let scenario = scenarios::single_server();
    let err = solve_problem(&[], &scenario.shifts, &scenario.params, &config()).unwrap_err();
    assert!(matches!(
        err,
        ShiftwiseError::Validation(ValidationError::EmptyWorkers)
    ));

    let err = solve_problem(&scenario.workers, &[], &scenario.params, &config()).unwrap_err();
    assert!(matches!(
        err,
        ShiftwiseError::Validation(ValidationError::EmptyShifts)
    ));
}

#[test]
fn test_phases_thread_the_seed_into_the_model() {
    let scenario = scenarios::small_restaurant();
    let config = config();
    let validated =
        ValidationResult::validate(&scenario.workers, &scenario.shifts, &scenario.params).unwrap();
    let seeded = validated.seed(&config);
    let seed = seeded.seed().clone();
    assert!(seeded.model().hint().is_empty());

    let modeled = seeded.encode();
    assert_eq!(modeled.model().hint(), seed.assignments.as_slice());

    let solved = modeled
        .solve(&config, Instant::now() + Duration::from_secs(20))
        .unwrap();
    let best = solved.outcome().best.as_ref().unwrap();
    assert!(best.score >= seed.score);
}

#[test]
fn test_every_priority_rule_solves() {
    for priority in [
        WorkerPriorityType::DifficultyFirst,
        WorkerPriorityType::CheapestFirst,
        WorkerPriorityType::LeastLoaded,
    ] {
        let result = run(&scenarios::small_restaurant(), &config().with_worker_priority(priority));
        assert_ne!(result.status(), SolveStatus::TimeoutNoSolution, "{priority:?}");
    }
}

#[test]
fn test_random_problems_keep_invariants() {
    for seed in 0..8 {
        let scenario = RandomProblem::new(seed).workers(10).days(5).generate();
        let config = config().with_random_seed(seed).with_step_limit(2_000);
        let result = run(&scenario, &config);
        assert_ne!(result.status(), SolveStatus::TimeoutNoSolution, "seed {seed}");
        if let Some(metrics) = result.metrics() {
            assert!((0.0..=100.0).contains(&metrics.fairness_score));
            if let Some(cap) = scenario.params.budget.weekly_cap {
                assert!(metrics.total_cost <= cap, "seed {seed}");
            }
        } else {
            assert!(!result.diagnostics().is_empty());
        }
    }
}

#[test]
fn test_random_problems_staff_overnight_shifts() {
    let mut overnight = 0;
    for seed in 0..8 {
        let scenario = RandomProblem::new(seed).workers(12).days(4).constrained(false).generate();
        let result = run(&scenario, &config().with_random_seed(seed).with_step_limit(1_000));
        overnight += result
            .assignments()
            .iter()
            .filter(|a| a.end <= a.start)
            .count();
    }
    assert!(overnight > 0);
}

#[test]
fn test_unconstrained_random_problems_keep_invariants() {
    for seed in 100..104 {
        let scenario = RandomProblem::new(seed).constrained(false).generate();
        run(&scenario, &config().with_random_seed(seed).with_step_limit(1_000));
    }
}

#[test]
fn test_same_seed_same_schedule() {
    let scenario = RandomProblem::new(21).workers(9).days(4).generate();
    let config = SolverConfig::new()
        .with_environment_mode(EnvironmentMode::Reproducible)
        .with_random_seed(7)
        .with_search_workers(2)
        .with_step_limit(500);

    let first = run(&scenario, &config);
    let second = run(&scenario, &config);
    assert_eq!(first, second);
}

#[test]
fn test_no_caps_means_no_budget_report() {
    let scenario = scenarios::single_server().with_params(ConstraintParameters::default());
    let result = run(&scenario, &config());
    let budget = result.metrics().unwrap().budget;
    assert_eq!(budget.cap, None);
    assert_eq!(budget.utilization_pct, None);
}
