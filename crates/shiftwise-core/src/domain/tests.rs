//! Tests for domain types.

use super::*;
use crate::units::{Money, TimeOfDay};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

#[test]
fn test_category_inference_boundaries() {
    assert_eq!(ShiftCategory::infer(t("07:59")), ShiftCategory::Prep);
    assert_eq!(ShiftCategory::infer(t("08:00")), ShiftCategory::Opening);
    assert_eq!(ShiftCategory::infer(t("16:59")), ShiftCategory::Lunch);
    assert_eq!(ShiftCategory::infer(t("23:00")), ShiftCategory::Dinner);
}

#[test]
fn test_duty_flags_follow_category() {
    let opening = Shift::parse("mon-open", 0, "08:00", "14:00").unwrap();
    assert_eq!(opening.effective_category(), ShiftCategory::Opening);
    assert!(opening.requires_opening_duties());
    assert!(!opening.requires_closing_duties());

    let closing = Shift::parse("mon-close", 0, "18:00", "23:30")
        .unwrap()
        .with_category(ShiftCategory::Closing);
    assert!(closing.requires_closing_duties());
    assert!(!closing.requires_opening_duties());
}

#[test]
fn test_explicit_duty_flags_win() {
    let shift = Shift::parse("mon-lunch", 0, "11:00", "15:00")
        .unwrap()
        .with_closing_duties(true);
    assert_eq!(shift.effective_category(), ShiftCategory::Lunch);
    assert!(shift.requires_closing_duties());

    let opening = Shift::parse("tue-open", 1, "09:00", "13:00")
        .unwrap()
        .with_opening_duties(false);
    assert!(!opening.requires_opening_duties());
}

#[test]
fn test_shift_builder() {
    let shift = Shift::parse("fri-dinner", 4, "17:00", "23:00")
        .unwrap()
        .require("Server", 2)
        .with_requirement(RoleRequirement::new("Bartender", 1).with_skill("Mixology"));
    assert_eq!(shift.requirements.len(), 2);
    assert_eq!(shift.requirements[1].required_skill.as_deref(), Some("Mixology"));
    assert_eq!(shift.time_range(), "17:00-23:00");
}

#[test]
fn test_worker_builder() {
    let worker = Worker::new("alice", Money::from_dollars(18.0), 32.0)
        .with_skills(["Server", "Host"])
        .available_days(0..3)
        .available(AvailabilityWindow::parse(5, "10:00", "16:00").unwrap());
    assert!(worker.has_skill("Host"));
    assert!(!worker.has_skill("Cook"));
    assert_eq!(worker.availability.len(), 4);
    assert_eq!(worker.availability[0].end, TimeOfDay::END_OF_DAY);
}

#[test]
fn test_recommended_fairness() {
    let fairness = FairnessParameters::recommended();
    assert_eq!(fairness.max_shift_imbalance, Some(3));
    assert_eq!(fairness.max_consecutive_days, Some(6));
    assert_eq!(fairness.min_rest_hours, Some(10.0));
    assert_eq!(FairnessParameters::default().min_rest_hours, None);
}
