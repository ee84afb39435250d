//! Random move sampling.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::moves::ScheduleMove;
use crate::model::SlotIdx;
use crate::state::ScheduleState;

/// Tries per sample before giving up on finding a suitable slot.
const SLOT_ATTEMPTS: usize = 8;

/// Samples assign, unassign, change and swap moves.
///
/// Assign moves are favoured while seats are open; once everything is
/// covered the mix shifts to change and swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSelector;

impl MoveSelector {
    pub fn sample(&self, state: &ScheduleState<'_, '_>, rng: &mut ChaCha8Rng) -> Option<ScheduleMove> {
        let roll: u32 = rng.random_range(0..100);
        if state.unfilled() > 0 {
            match roll {
                0..=44 => self.assign(state, rng),
                45..=79 => self.change(state, rng),
                80..=94 => self.swap(state, rng),
                _ => self.unassign(state, rng),
            }
        } else {
            match roll {
                0..=59 => self.change(state, rng),
                60..=94 => self.swap(state, rng),
                _ => self.unassign(state, rng),
            }
        }
    }

    fn random_slot(
        &self,
        state: &ScheduleState<'_, '_>,
        rng: &mut ChaCha8Rng,
        accept: impl Fn(SlotIdx) -> bool,
    ) -> Option<SlotIdx> {
        let n = state.model().slots().len();
        if n == 0 {
            return None;
        }
        (0..SLOT_ATTEMPTS)
            .map(|_| rng.random_range(0..n))
            .find(|&s| accept(s))
    }

    fn assign(&self, state: &ScheduleState<'_, '_>, rng: &mut ChaCha8Rng) -> Option<ScheduleMove> {
        let model = state.model();
        let slot = self.random_slot(state, rng, |s| {
            state.open_seats(s) > 0 && !model.slot(s).candidates.is_empty()
        })?;
        let candidates = &model.slot(slot).candidates;
        let worker = candidates[rng.random_range(0..candidates.len())];
        if state.holds(slot, worker) {
            return None;
        }
        Some(ScheduleMove::Assign { slot, worker })
    }

    fn unassign(&self, state: &ScheduleState<'_, '_>, rng: &mut ChaCha8Rng) -> Option<ScheduleMove> {
        let slot = self.random_slot(state, rng, |s| !state.slot_workers(s).is_empty())?;
        let held = state.slot_workers(slot);
        let worker = held[rng.random_range(0..held.len())];
        Some(ScheduleMove::Unassign { slot, worker })
    }

    fn change(&self, state: &ScheduleState<'_, '_>, rng: &mut ChaCha8Rng) -> Option<ScheduleMove> {
        let model = state.model();
        let slot = self.random_slot(state, rng, |s| {
            !state.slot_workers(s).is_empty() && model.slot(s).candidates.len() > 1
        })?;
        let held = state.slot_workers(slot);
        let from = held[rng.random_range(0..held.len())];
        let candidates = &model.slot(slot).candidates;
        let to = candidates[rng.random_range(0..candidates.len())];
        if state.holds(slot, to) {
            return None;
        }
        Some(ScheduleMove::Change { slot, from, to })
    }

    fn swap(&self, state: &ScheduleState<'_, '_>, rng: &mut ChaCha8Rng) -> Option<ScheduleMove> {
        let model = state.model();
        let a = self.random_slot(state, rng, |s| !state.slot_workers(s).is_empty())?;
        let b = self.random_slot(state, rng, |s| s != a && !state.slot_workers(s).is_empty())?;

        let held_a = state.slot_workers(a);
        let held_b = state.slot_workers(b);
        let worker_a = held_a[rng.random_range(0..held_a.len())];
        let worker_b = held_b[rng.random_range(0..held_b.len())];
        if worker_a == worker_b
            || !model.slot(a).is_candidate(worker_b)
            || !model.slot(b).is_candidate(worker_a)
        {
            return None;
        }
        Some(ScheduleMove::Swap {
            a,
            worker_a,
            b,
            worker_b,
        })
    }
}
