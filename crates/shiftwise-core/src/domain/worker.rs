//! Workers and their availability.

use crate::error::ValidationError;
use crate::units::{Money, TimeOfDay};

/// A span of time on one day during which a worker can be scheduled.
///
/// A window whose end precedes its start runs past midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailabilityWindow {
    pub day: u32,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl AvailabilityWindow {
    pub fn new(day: u32, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { day, start, end }
    }

    /// Parses `"HH:MM"` bounds.
    pub fn parse(day: u32, start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(day, start.parse()?, end.parse()?))
    }

    /// The whole calendar day, midnight to midnight.
    pub fn all_day(day: u32) -> Self {
        Self::new(day, TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY)
    }
}

/// A worker on the roster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    pub id: String,
    /// Roles and certifications the worker holds.
    pub skills: Vec<String>,
    pub hourly_rate: Money,
    /// Upper bound on scheduled hours over the horizon.
    pub max_hours: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability: Vec<AvailabilityWindow>,
}

impl Worker {
    pub fn new(id: impl Into<String>, hourly_rate: Money, max_hours: f64) -> Self {
        Self {
            id: id.into(),
            skills: Vec::new(),
            hourly_rate,
            max_hours,
            availability: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_skills<I, T>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn available(mut self, window: AvailabilityWindow) -> Self {
        self.availability.push(window);
        self
    }

    /// Available all day on each of the given days.
    pub fn available_days(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.availability
            .extend(days.into_iter().map(AvailabilityWindow::all_day));
        self
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}
