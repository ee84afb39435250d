//! Domain types supplied by the caller for a single solving run.
//!
//! Everything here is plain data. Validation and normalization into
//! comparable units happen in [`crate::problem`].

mod assignment;
mod params;
mod shift;
mod worker;

#[cfg(test)]
mod tests;

pub use assignment::Assignment;
pub use params::{BudgetParameters, ConstraintParameters, FairnessParameters};
pub use shift::{RoleRequirement, Shift, ShiftCategory};
pub use worker::{AvailabilityWindow, Worker};
