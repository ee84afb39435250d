use std::time::Duration;

use shiftwise_test::{assert_schedule_invariants, scenarios, RandomProblem};

use super::*;

#[test]
fn test_solve_single_server() {
    let scenario = scenarios::single_server();
    let result = solve(
        &scenario.workers,
        &scenario.shifts,
        &scenario.params,
        Duration::from_secs(10),
    )
    .unwrap();

    assert!(result.is_success());
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(
        result.metrics().unwrap().total_cost,
        Money::from_dollars(90.0)
    );
}

#[test]
fn test_solve_reports_budget_shortfall() {
    let scenario = scenarios::budget_shortfall();
    let result = solve(
        &scenario.workers,
        &scenario.shifts,
        &scenario.params,
        Duration::from_secs(10),
    )
    .unwrap();

    assert_eq!(result.status(), SolveStatus::Infeasible);
    assert!(result.diagnostics()[0].contains("Increase budget to at least $320.00"));
}

#[test]
fn test_solve_rejects_empty_shifts() {
    let scenario = scenarios::single_server();
    let err = solve(
        &scenario.workers,
        &[],
        &scenario.params,
        Duration::from_secs(1),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ShiftwiseError::Validation(ValidationError::EmptyShifts)
    ));
}

#[test]
fn test_solve_with_config_small_restaurant() {
    let scenario = scenarios::small_restaurant();
    let config = SolverConfig::new()
        .with_random_seed(42)
        .with_search_workers(2)
        .with_time_limit(Duration::from_secs(10));
    let result =
        solve_with_config(&scenario.workers, &scenario.shifts, &scenario.params, &config).unwrap();

    assert_ne!(result.status(), SolveStatus::TimeoutNoSolution);
    assert_schedule_invariants(&scenario, result.assignments());
}

#[test]
fn test_solve_with_config_from_toml() {
    let config = SolverConfig::from_toml_str(
        r#"
        random_seed = 3
        search_workers = { count = 1 }

        [termination]
        seconds_spent_limit = 10
        step_count_limit = 500

        [construction]
        worker_priority = "cheapest_first"
        "#,
    )
    .unwrap();
    let scenario = RandomProblem::new(3).workers(6).days(3).generate();
    let result =
        solve_with_config(&scenario.workers, &scenario.shifts, &scenario.params, &config).unwrap();
    assert_schedule_invariants(&scenario, result.assignments());
}

#[test]
fn test_zero_time_limit_returns_the_seed() {
    let scenario = scenarios::single_server();
    let result = solve(
        &scenario.workers,
        &scenario.shifts,
        &scenario.params,
        Duration::ZERO,
    )
    .unwrap();
    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_eq!(result.assignments().len(), 1);
    assert!(result.diagnostics().is_empty());
}
