//! Budget and fairness parameters.
//!
//! Every field is optional; an absent field leaves that dimension
//! unconstrained.

use crate::units::Money;

/// Labor budget for the horizon.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BudgetParameters {
    /// Hard cap on the total cost of the horizon.
    pub weekly_cap: Option<Money>,
    /// Hard cap on the cost attributed to any single day.
    pub daily_cap: Option<Money>,
    /// Soft target; spending above it is penalized.
    pub target: Option<Money>,
}

impl BudgetParameters {
    pub fn with_weekly_cap(mut self, cap: Money) -> Self {
        self.weekly_cap = Some(cap);
        self
    }

    pub fn with_daily_cap(mut self, cap: Money) -> Self {
        self.daily_cap = Some(cap);
        self
    }

    pub fn with_target(mut self, target: Money) -> Self {
        self.target = Some(target);
        self
    }
}

/// Limits that keep schedules humane and evenly spread.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FairnessParameters {
    /// Soft: allowed spread between the busiest and idlest worker's shift count.
    pub max_shift_imbalance: Option<u32>,
    /// Hard: longest run of calendar days any worker may work.
    pub max_consecutive_days: Option<u32>,
    /// Hard: minimum hours between the end of one shift and the start of the next.
    pub min_rest_hours: Option<f64>,
}

impl FairnessParameters {
    /// Imbalance 3, six consecutive days, ten hours of rest.
    pub fn recommended() -> Self {
        Self {
            max_shift_imbalance: Some(3),
            max_consecutive_days: Some(6),
            min_rest_hours: Some(10.0),
        }
    }

    pub fn with_max_shift_imbalance(mut self, value: u32) -> Self {
        self.max_shift_imbalance = Some(value);
        self
    }

    pub fn with_max_consecutive_days(mut self, value: u32) -> Self {
        self.max_consecutive_days = Some(value);
        self
    }

    pub fn with_min_rest_hours(mut self, value: f64) -> Self {
        self.min_rest_hours = Some(value);
        self
    }
}

/// Constraint parameters for one solving run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConstraintParameters {
    pub budget: BudgetParameters,
    pub fairness: FairnessParameters,
}

impl ConstraintParameters {
    pub fn new(budget: BudgetParameters, fairness: FairnessParameters) -> Self {
        Self { budget, fairness }
    }

    pub fn with_budget(mut self, budget: BudgetParameters) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_fairness(mut self, fairness: FairnessParameters) -> Self {
        self.fairness = fairness;
        self
    }
}
