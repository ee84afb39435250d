//! Score types for comparing candidate schedules.
//!
//! A schedule is judged on three levels, most significant first: hard
//! constraint violations, unfilled seats, and the weighted objective.

#[macro_use]
mod macros;

mod schedule;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use schedule::ScheduleScore;

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}
