//! ScheduleScore - hard violations, unfilled seats, weighted objective

use std::cmp::Ordering;
use std::fmt;

/// Three-level score of a schedule.
///
/// - `hard`: negated count of hard constraint violations
/// - `medium`: negated count of unfilled seats
/// - `soft`: negated weighted objective (labor cost, target overrun, balance)
///
/// Comparison order: hard > medium > soft. A schedule that fills one more
/// seat always beats a cheaper one that leaves it open.
///
/// # Examples
///
/// ```
/// use shiftwise_core::ScheduleScore;
///
/// let cheap_with_gap = ScheduleScore::of(0, -1, -5_000);
/// let covered = ScheduleScore::of(0, 0, -90_000);
///
/// assert!(covered > cheap_with_gap);
/// assert_eq!(covered.to_string(), "0hard/0medium/-90000soft");
/// assert_eq!("0hard/0medium/-90000soft".parse(), Ok(covered));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl ScheduleScore {
    pub const ZERO: ScheduleScore = ScheduleScore {
        hard: 0,
        medium: 0,
        soft: 0,
    };

    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        ScheduleScore { hard, medium, soft }
    }

    /// Builds a score from violation, gap and penalty counts.
    #[inline]
    pub const fn penalized(violations: i64, unfilled: i64, objective: i64) -> Self {
        ScheduleScore {
            hard: -violations,
            medium: -unfilled,
            soft: -objective,
        }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Number of unfilled seats.
    #[inline]
    pub const fn unfilled(&self) -> i64 {
        -self.medium
    }

    /// Weighted objective value (lower is better).
    #[inline]
    pub const fn objective(&self) -> i64 {
        -self.soft
    }
}

impl Ord for ScheduleScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then(self.medium.cmp(&other.medium))
            .then(self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for ScheduleScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ScheduleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScheduleScore({}, {}, {})",
            self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for ScheduleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

impl_score_parse!(ScheduleScore { hard => "hard", medium => "medium", soft => "soft" } => of);
