//! Engine output.

use crate::units::{Money, TimeOfDay};

/// One worker placed on one role of one shift.
///
/// Produced only by the engine; a new run yields a new set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub worker_id: String,
    pub shift_id: String,
    pub role: String,
    pub day: u32,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub hours: f64,
    pub cost: Money,
}
