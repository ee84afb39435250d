//! Reversible schedule moves.
//!
//! A move is applied only when the resulting schedule passes every hard
//! check; a failed application leaves the state exactly as it was.

use shiftwise_core::WorkerIdx;

use crate::model::SlotIdx;
use crate::state::ScheduleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMove {
    /// Fill an open seat.
    Assign { slot: SlotIdx, worker: WorkerIdx },
    /// Open a filled seat.
    Unassign { slot: SlotIdx, worker: WorkerIdx },
    /// Hand a seat to another worker.
    Change {
        slot: SlotIdx,
        from: WorkerIdx,
        to: WorkerIdx,
    },
    /// Exchange the holders of two seats.
    Swap {
        a: SlotIdx,
        worker_a: WorkerIdx,
        b: SlotIdx,
        worker_b: WorkerIdx,
    },
}

impl ScheduleMove {
    /// Applies the move. Returns false, leaving the state untouched, when
    /// the result would break a hard constraint.
    pub fn try_apply(&self, state: &mut ScheduleState<'_, '_>) -> bool {
        match *self {
            ScheduleMove::Assign { slot, worker } => state.try_assign(slot, worker).is_ok(),
            ScheduleMove::Unassign { slot, worker } => state.unassign(slot, worker),
            ScheduleMove::Change { slot, from, to } => {
                if !state.unassign(slot, from) {
                    return false;
                }
                if state.try_assign(slot, to).is_ok() {
                    return true;
                }
                restore(state, &[(slot, from)]);
                false
            }
            ScheduleMove::Swap {
                a,
                worker_a,
                b,
                worker_b,
            } => {
                if !state.holds(a, worker_a) || !state.holds(b, worker_b) {
                    return false;
                }
                state.unassign(a, worker_a);
                state.unassign(b, worker_b);
                if state.try_assign(a, worker_b).is_err() {
                    restore(state, &[(a, worker_a), (b, worker_b)]);
                    return false;
                }
                if state.try_assign(b, worker_a).is_err() {
                    state.unassign(a, worker_b);
                    restore(state, &[(a, worker_a), (b, worker_b)]);
                    return false;
                }
                true
            }
        }
    }

    /// Reverts a successful [`try_apply`](Self::try_apply).
    pub fn undo(&self, state: &mut ScheduleState<'_, '_>) {
        match *self {
            ScheduleMove::Assign { slot, worker } => {
                state.unassign(slot, worker);
            }
            ScheduleMove::Unassign { slot, worker } => restore(state, &[(slot, worker)]),
            ScheduleMove::Change { slot, from, to } => {
                state.unassign(slot, to);
                restore(state, &[(slot, from)]);
            }
            ScheduleMove::Swap {
                a,
                worker_a,
                b,
                worker_b,
            } => {
                state.unassign(a, worker_b);
                state.unassign(b, worker_a);
                restore(state, &[(a, worker_a), (b, worker_b)]);
            }
        }
    }
}

/// Puts back assignments that held a moment ago. Removing workers never
/// makes a previously valid placement invalid, so these cannot fail.
fn restore(state: &mut ScheduleState<'_, '_>, pairs: &[(SlotIdx, WorkerIdx)]) {
    for &(slot, worker) in pairs {
        let restored = state.try_assign(slot, worker);
        debug_assert!(restored.is_ok(), "restoring ({slot}, {worker}) failed");
    }
}
