//! shiftwise core - input model and shared types for shift assignment
//!
//! This crate provides the pieces every other shiftwise crate builds on:
//! - Domain types for workers, shifts, role requirements and constraint parameters
//! - Time and money units ([`TimeOfDay`], [`Money`])
//! - Validation that normalizes raw input into an immutable [`Problem`]
//! - The [`ScheduleScore`] used to compare candidate schedules
//! - The error taxonomy shared by the engine

pub mod domain;
pub mod error;
pub mod problem;
pub mod score;
pub mod units;

pub use domain::{
    Assignment, AvailabilityWindow, BudgetParameters, ConstraintParameters, FairnessParameters,
    RoleRequirement, Shift, ShiftCategory, Worker,
};
pub use error::{Result, ShiftwiseError, ValidationError};
pub use problem::{
    BudgetLimits, FairnessLimits, Problem, RoleDemand, ShiftIdx, ShiftInfo, WorkerIdx, WorkerInfo,
};
pub use score::{ScheduleScore, ScoreParseError};
pub use units::{day_index, Money, TimeOfDay, MINUTES_PER_DAY};
