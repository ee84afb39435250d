//! Tests for validation and normalization.

use super::*;
use crate::domain::{
    AvailabilityWindow, BudgetParameters, FairnessParameters, RoleRequirement,
};

fn server(id: &str) -> Worker {
    Worker::new(id, Money::from_dollars(15.0), 40.0)
        .with_skill("Server")
        .available_days(0..7)
}

fn lunch(id: &str, day: u32) -> Shift {
    Shift::parse(id, day, "11:00", "17:00")
        .unwrap()
        .require("Server", 1)
}

fn params() -> ConstraintParameters {
    ConstraintParameters::default()
}

#[test]
fn test_rejects_empty_lists() {
    assert_eq!(
        Problem::new(&[], &[lunch("s1", 0)], &params()).unwrap_err(),
        ValidationError::EmptyWorkers
    );
    assert_eq!(
        Problem::new(&[server("w1")], &[], &params()).unwrap_err(),
        ValidationError::EmptyShifts
    );
}

#[test]
fn test_rejects_zero_length_shift() {
    let shift = Shift::parse("bad", 0, "09:00", "09:00").unwrap();
    let err = Problem::new(&[server("w1")], &[shift], &params()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidShiftTime {
            shift_id: "bad".to_string()
        }
    );
}

#[test]
fn test_rejects_negative_requirement() {
    let shift = lunch("s1", 0).with_requirement(RoleRequirement::new("Host", -1));
    let err = Problem::new(&[server("w1")], &[shift], &params()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NegativeRequirement { ref role, count: -1, .. } if role == "Host"
    ));
}

#[test]
fn test_rejects_duplicate_ids() {
    let err = Problem::new(&[server("w1"), server("w1")], &[lunch("s1", 0)], &params())
        .unwrap_err();
    assert_eq!(err, ValidationError::DuplicateWorkerId("w1".to_string()));

    let err = Problem::new(&[server("w1")], &[lunch("s1", 0), lunch("s1", 1)], &params())
        .unwrap_err();
    assert_eq!(err, ValidationError::DuplicateShiftId("s1".to_string()));
}

#[test]
fn test_rejects_negative_budget() {
    let params = params().with_budget(
        BudgetParameters::default().with_weekly_cap(Money::from_dollars(-1.0)),
    );
    let err = Problem::new(&[server("w1")], &[lunch("s1", 0)], &params).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "budget.weekly_cap"));
}

#[test]
fn test_rejects_rest_above_consecutive_window() {
    let params = params().with_fairness(
        FairnessParameters::default()
            .with_max_consecutive_days(1)
            .with_min_rest_hours(25.0),
    );
    let err = Problem::new(&[server("w1")], &[lunch("s1", 0)], &params).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "fairness.min_rest_hours"));

    let params = ConstraintParameters::default()
        .with_fairness(FairnessParameters::default().with_min_rest_hours(-2.0));
    assert!(Problem::new(&[server("w1")], &[lunch("s1", 0)], &params).is_err());
}

#[test]
fn test_rejects_zero_consecutive_days() {
    let params = params()
        .with_fairness(FairnessParameters::default().with_max_consecutive_days(0));
    assert!(Problem::new(&[server("w1")], &[lunch("s1", 0)], &params).is_err());
}

#[test]
fn test_rejects_bad_max_hours() {
    let worker = Worker::new("w1", Money::from_dollars(15.0), f64::NAN).with_skill("Server");
    assert!(Problem::new(&[worker], &[lunch("s1", 0)], &params()).is_err());
}

#[test]
fn test_normalizes_to_absolute_minutes() {
    let shifts = vec![
        lunch("mon", 0),
        Shift::parse("tue-close", 1, "20:00", "01:00")
            .unwrap()
            .require("Server", 1),
    ];
    let problem = Problem::new(&[server("w1")], &shifts, &params()).unwrap();

    let mon = problem.shift(0);
    assert_eq!((mon.start, mon.end), (660, 1020));
    assert_eq!(mon.hours(), 6.0);

    let tue = problem.shift(1);
    assert_eq!(tue.start, 1440 + 1200);
    assert_eq!(tue.end, 2880 + 60);
    assert_eq!(tue.duration(), 300);
    assert_eq!(problem.horizon_days(), 2);
}

#[test]
fn test_rest_between_crosses_midnight() {
    let shifts = vec![
        Shift::parse("close", 0, "23:00", "02:00").unwrap(),
        Shift::parse("open", 1, "07:00", "12:00").unwrap(),
    ];
    let problem = Problem::new(&[server("w1")], &shifts, &params()).unwrap();
    let (close, open) = (problem.shift(0), problem.shift(1));
    assert!(!close.overlaps(open));
    assert_eq!(close.rest_between(open), Some(5 * 60));
    assert_eq!(open.rest_between(close), Some(5 * 60));
}

#[test]
fn test_eligibility_requires_role_skill_and_coverage() {
    let workers = vec![
        server("full"),
        Worker::new("partial", Money::from_dollars(14.0), 40.0)
            .with_skill("Server")
            .available(AvailabilityWindow::parse(0, "12:00", "18:00").unwrap()),
        Worker::new("short", Money::from_dollars(14.0), 4.0)
            .with_skill("Server")
            .available_days(0..7),
        Worker::new("cook", Money::from_dollars(20.0), 40.0)
            .with_skill("Cook")
            .available_days(0..7),
    ];
    let shift = lunch("s1", 0);
    let problem = Problem::new(&workers, &[shift], &params()).unwrap();
    let info = problem.shift(0);
    let demand = &info.demands[0];

    let eligible: Vec<&str> = problem
        .workers()
        .iter()
        .filter(|w| problem.is_eligible(w, info, demand))
        .map(|w| w.id.as_str())
        .collect();
    assert_eq!(eligible, vec!["full"]);
}

#[test]
fn test_back_to_back_days_cover_an_overnight_shift() {
    let workers = vec![
        Worker::new("nia", Money::from_dollars(15.0), 40.0)
            .with_skill("Server")
            .available_days([0, 1]),
        Worker::new("monday-only", Money::from_dollars(15.0), 40.0)
            .with_skill("Server")
            .available_days([0]),
    ];
    let shifts = vec![Shift::parse("mon-late", 0, "22:00", "02:00")
        .unwrap()
        .require("Server", 1)];
    let problem = Problem::new(&workers, &shifts, &params()).unwrap();

    let nia = problem.worker(0);
    assert_eq!(nia.windows, vec![(0, 2880)]);
    assert_eq!(nia.window_count, 2);

    let info = problem.shift(0);
    let eligible: Vec<&str> = problem
        .workers()
        .iter()
        .filter(|w| problem.is_eligible(w, info, &info.demands[0]))
        .map(|w| w.id.as_str())
        .collect();
    assert_eq!(eligible, vec!["nia"]);
}

#[test]
fn test_overlapping_windows_merge_and_gaps_stay_split() {
    let worker = Worker::new("w1", Money::from_dollars(15.0), 40.0)
        .with_skill("Server")
        .available(AvailabilityWindow::parse(0, "08:00", "12:00").unwrap())
        .available(AvailabilityWindow::parse(0, "10:00", "14:00").unwrap())
        .available(AvailabilityWindow::parse(0, "15:00", "18:00").unwrap());
    let problem = Problem::new(&[worker], &[lunch("s1", 0)], &params()).unwrap();
    assert_eq!(problem.worker(0).windows, vec![(480, 840), (900, 1080)]);
    assert_eq!(problem.worker(0).window_count, 3);
}

#[test]
fn test_required_skill_is_checked() {
    let workers = vec![
        server("plain"),
        server("certified").with_skill("Wine"),
    ];
    let shift = Shift::parse("s1", 0, "17:00", "22:00")
        .unwrap()
        .with_requirement(RoleRequirement::new("Server", 1).with_skill("Wine"));
    let problem = Problem::new(&workers, &[shift], &params()).unwrap();
    let info = problem.shift(0);
    assert!(!problem.is_eligible(problem.worker(0), info, &info.demands[0]));
    assert!(problem.is_eligible(problem.worker(1), info, &info.demands[0]));
}

#[test]
fn test_shift_cost_and_seats() {
    let shift = lunch("s1", 0).require("Host", 2);
    let problem = Problem::new(&[server("w1")], &[shift], &params()).unwrap();
    assert_eq!(problem.shift_cost(0, 0), Money::from_dollars(90.0));
    assert_eq!(problem.total_seats(), 3);
}
