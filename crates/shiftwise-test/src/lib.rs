//! Shared test fixtures for shiftwise crates.
//!
//! - [`builders`] - terse constructors for workers and shifts
//! - [`scenarios`] - small hand-checked problems with known outcomes
//! - [`generator`] - seeded random problems for property tests
//! - [`invariants`] - an independent checker for returned schedules
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shiftwise-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use shiftwise_test::scenarios;
//! use shiftwise_test::invariants::assert_schedule_invariants;
//! ```

pub mod builders;
pub mod generator;
pub mod invariants;
pub mod scenarios;

pub use builders::{shift, worker};
pub use generator::RandomProblem;
pub use invariants::assert_schedule_invariants;
pub use scenarios::Scenario;
