//! Error types for shiftwise

use thiserror::Error;

/// Main error type for shiftwise operations
#[derive(Debug, Error)]
pub enum ShiftwiseError {
    /// Malformed or contradictory input, caught before solving starts
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A valid input that admits no satisfying assignment
    #[error("No valid schedule exists: {}", .diagnostics.join("; "))]
    Infeasible { diagnostics: Vec<String> },

    /// The search ran out of memory or threads, even after the single-worker retry
    #[error("Resource exhausted: {reason}")]
    ResourceExhausted { reason: String },

    /// The deadline elapsed before any valid schedule was found
    #[error("No schedule found before the deadline: {}", .diagnostics.join("; "))]
    TimeoutNoSolution { diagnostics: Vec<String> },
}

/// Input rejected by validation. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("worker list is empty")]
    EmptyWorkers,

    #[error("shift list is empty")]
    EmptyShifts,

    #[error("duplicate worker id '{0}'")]
    DuplicateWorkerId(String),

    #[error("duplicate shift id '{0}'")]
    DuplicateShiftId(String),

    #[error("shift '{shift_id}': end time must differ from start time")]
    InvalidShiftTime { shift_id: String },

    #[error("shift '{shift_id}': requirement for role '{role}' has negative count {count}")]
    NegativeRequirement {
        shift_id: String,
        role: String,
        count: i32,
    },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for shiftwise operations
pub type Result<T> = std::result::Result<T, ShiftwiseError>;
