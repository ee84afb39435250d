//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when another search worker raises the shared flag.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use shiftwise_solver::termination::ExternalTermination;
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
/// flag.store(true, Ordering::Relaxed);
/// assert!(term.is_raised());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        self.is_raised()
    }
}
