//! Terse constructors. Panics on malformed literals, which is what a test wants.

use shiftwise_core::{AvailabilityWindow, Money, Shift, Worker};

/// A worker available all day on each of `days`.
pub fn worker(id: &str, rate_dollars: f64, max_hours: f64, skills: &[&str], days: &[u32]) -> Worker {
    Worker::new(id, Money::from_dollars(rate_dollars), max_hours)
        .with_skills(skills.iter().copied())
        .available_days(days.iter().copied())
}

/// A shift needing `count` workers of `role`.
pub fn shift(id: &str, day: u32, start: &str, end: &str, role: &str, count: i32) -> Shift {
    Shift::parse(id, day, start, end)
        .unwrap_or_else(|e| panic!("bad shift literal {id}: {e}"))
        .require(role, count)
}

/// An availability window from `"HH:MM"` literals.
pub fn window(day: u32, start: &str, end: &str) -> AvailabilityWindow {
    AvailabilityWindow::parse(day, start, end)
        .unwrap_or_else(|e| panic!("bad window literal {day} {start}-{end}: {e}"))
}
