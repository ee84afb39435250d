//! Shifts, their categories and staffing requirements.

use std::fmt;

use crate::error::ValidationError;
use crate::units::TimeOfDay;

/// Kind of shift. Only used to derive opening and closing duty flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ShiftCategory {
    Prep,
    Opening,
    Lunch,
    Dinner,
    Closing,
    Double,
}

impl ShiftCategory {
    /// Guesses the category from the start time.
    ///
    /// ```
    /// use shiftwise_core::{ShiftCategory, TimeOfDay};
    ///
    /// let t = |s: &str| s.parse::<TimeOfDay>().unwrap();
    /// assert_eq!(ShiftCategory::infer(t("06:00")), ShiftCategory::Prep);
    /// assert_eq!(ShiftCategory::infer(t("10:30")), ShiftCategory::Opening);
    /// assert_eq!(ShiftCategory::infer(t("11:00")), ShiftCategory::Lunch);
    /// assert_eq!(ShiftCategory::infer(t("17:00")), ShiftCategory::Dinner);
    /// ```
    pub fn infer(start: TimeOfDay) -> Self {
        match start.hour() {
            0..=7 => ShiftCategory::Prep,
            8..=10 => ShiftCategory::Opening,
            11..=16 => ShiftCategory::Lunch,
            _ => ShiftCategory::Dinner,
        }
    }
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftCategory::Prep => "Prep",
            ShiftCategory::Opening => "Opening",
            ShiftCategory::Lunch => "Lunch",
            ShiftCategory::Dinner => "Dinner",
            ShiftCategory::Closing => "Closing",
            ShiftCategory::Double => "Double",
        };
        f.write_str(name)
    }
}

/// Headcount needed for one role on a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleRequirement {
    pub role: String,
    /// Signed so that a negative count from upstream is rejected, not wrapped.
    pub count: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_skill: Option<String>,
}

impl RoleRequirement {
    pub fn new(role: impl Into<String>, count: i32) -> Self {
        Self {
            role: role.into(),
            count,
            required_skill: None,
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skill = Some(skill.into());
        self
    }
}

/// A fixed time interval on one day with role-based headcount requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub id: String,
    pub day: u32,
    pub start: TimeOfDay,
    /// An end before `start` means the shift runs past midnight.
    pub end: TimeOfDay,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<ShiftCategory>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Vec<RoleRequirement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opening_duties: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub closing_duties: Option<bool>,
}

impl Shift {
    pub fn new(id: impl Into<String>, day: u32, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            id: id.into(),
            day,
            start,
            end,
            category: None,
            requirements: Vec::new(),
            opening_duties: None,
            closing_duties: None,
        }
    }

    /// Parses `"HH:MM"` bounds.
    pub fn parse(
        id: impl Into<String>,
        day: u32,
        start: &str,
        end: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(id, day, start.parse()?, end.parse()?))
    }

    pub fn require(mut self, role: impl Into<String>, count: i32) -> Self {
        self.requirements.push(RoleRequirement::new(role, count));
        self
    }

    pub fn with_requirement(mut self, requirement: RoleRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_category(mut self, category: ShiftCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_opening_duties(mut self, value: bool) -> Self {
        self.opening_duties = Some(value);
        self
    }

    pub fn with_closing_duties(mut self, value: bool) -> Self {
        self.closing_duties = Some(value);
        self
    }

    /// The explicit category, or one inferred from the start time.
    pub fn effective_category(&self) -> ShiftCategory {
        self.category
            .unwrap_or_else(|| ShiftCategory::infer(self.start))
    }

    pub fn requires_opening_duties(&self) -> bool {
        self.opening_duties
            .unwrap_or(self.effective_category() == ShiftCategory::Opening)
    }

    pub fn requires_closing_duties(&self) -> bool {
        self.closing_duties
            .unwrap_or(self.effective_category() == ShiftCategory::Closing)
    }

    /// `"HH:MM-HH:MM"`, as shown in coverage reports.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}
