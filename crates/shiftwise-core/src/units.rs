//! Time and money units.
//!
//! All engine arithmetic runs on integers: clock times are minutes after
//! midnight, horizon positions are minutes after the start of day 0, and
//! money is whole cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use num_format::{Locale, ToFormattedString};

use crate::error::ValidationError;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 1440;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Maps an English weekday name to its zero-based index (Monday = 0).
///
/// ```
/// use shiftwise_core::day_index;
///
/// assert_eq!(day_index("Monday"), Some(0));
/// assert_eq!(day_index("sunday"), Some(6));
/// assert_eq!(day_index("Caturday"), None);
/// ```
pub fn day_index(name: &str) -> Option<u32> {
    let lower = name.trim().to_ascii_lowercase();
    WEEKDAYS
        .iter()
        .position(|d| *d == lower)
        .map(|i| i as u32)
}

/// A wall-clock time, stored as minutes after midnight.
///
/// `24:00` is accepted so that a shift or window may end exactly at midnight.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    /// `24:00`, only meaningful as the end of a span.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY as u16);

    /// Creates a time from hours and minutes.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        let total = hour as u16 * 60 + minute as u16;
        if minute >= 60 || total > MINUTES_PER_DAY as u16 {
            return Err(ValidationError::InvalidTime {
                value: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(TimeOfDay(total))
    }

    /// Minutes after midnight.
    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({self})")
    }
}

/// An amount of money in whole cents.
///
/// Fixed-point like a scaled score level: arithmetic stays exact and
/// only display converts to dollars.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a dollar amount, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Cost of working `minutes` at this hourly rate, rounded half up.
    ///
    /// ```
    /// use shiftwise_core::Money;
    ///
    /// let rate = Money::from_dollars(15.0);
    /// assert_eq!(rate.for_minutes(360), Money::from_dollars(90.0));
    /// assert_eq!(Money::from_cents(1).for_minutes(30), Money::from_cents(1));
    /// ```
    pub fn for_minutes(self, minutes: i64) -> Money {
        Money((self.0 * minutes + 30).div_euclid(60))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}${}.{:02}",
            (abs / 100).to_formatted_string(&Locale::en),
            abs % 100
        )
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({self})")
    }
}

#[cfg(test)]
mod tests;
