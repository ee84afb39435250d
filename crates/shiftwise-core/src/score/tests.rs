//! Tests for schedule scores.

use super::*;

#[test]
fn test_level_ordering() {
    // Any hard violation loses to any coverage gap.
    assert!(ScheduleScore::of(0, -5, -1_000_000) > ScheduleScore::of(-1, 0, 0));
    // Any coverage gap loses to any cost.
    assert!(ScheduleScore::of(0, 0, -1_000_000) > ScheduleScore::of(0, -1, 0));
    assert!(ScheduleScore::of(0, 0, -10) > ScheduleScore::of(0, 0, -11));
}

#[test]
fn test_penalized_constructor() {
    let score = ScheduleScore::penalized(0, 2, 9000);
    assert_eq!(score, ScheduleScore::of(0, -2, -9000));
    assert_eq!(score.unfilled(), 2);
    assert_eq!(score.objective(), 9000);
    assert_eq!(score.hard(), 0);
    assert_eq!(ScheduleScore::penalized(1, 0, 0).hard(), -1);
    assert_eq!(ScheduleScore::ZERO, ScheduleScore::default());
}

#[test]
fn test_parse() {
    let score: ScheduleScore = "0hard/-1medium/-9000soft".parse().unwrap();
    assert_eq!(score, ScheduleScore::of(0, -1, -9000));
    assert_eq!(score.to_string(), "0hard/-1medium/-9000soft");
    assert_eq!(" -2hard/0medium/5soft ".parse(), Ok(ScheduleScore::of(-2, 0, 5)));
}

#[test]
fn test_parse_errors() {
    assert!("0hard/-1soft".parse::<ScheduleScore>().is_err());
    assert!("0hard/-1medium/-9000".parse::<ScheduleScore>().is_err());
    let err = "xhard/0medium/0soft".parse::<ScheduleScore>().unwrap_err();
    assert!(err.to_string().starts_with("score parse error: invalid hard level"));
}
