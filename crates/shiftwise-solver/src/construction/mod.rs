//! Greedy construction of the seed schedule.
//!
//! Shifts are visited scarcest first (fewest candidates on their tightest
//! slot, then start time). Each open seat goes to the feasible candidate
//! with the highest [`WorkerPriority`], ties to the lowest incremental cost,
//! then the lowest index. There is no backtracking: a seat with no feasible
//! candidate stays open.

#[cfg(test)]
mod tests;

use std::cmp::Reverse;
use std::time::Instant;

use shiftwise_core::{ScheduleScore, ShiftIdx, WorkerIdx};
use tracing::{info, trace};

use crate::model::{ScheduleModel, SlotIdx};
use crate::ranking::WorkerPriority;
use crate::state::ScheduleState;

/// The construction output, handed to the model as its search hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub assignments: Vec<(SlotIdx, WorkerIdx)>,
    pub unfilled: u64,
    pub score: ScheduleScore,
}

/// Ordered greedy placement under a swappable priority rule.
#[derive(Debug)]
pub struct ConstructionHeuristic<'m, 'p, P: WorkerPriority> {
    model: &'m ScheduleModel<'p>,
    priority: P,
}

impl<'m, 'p, P: WorkerPriority> ConstructionHeuristic<'m, 'p, P> {
    pub fn new(model: &'m ScheduleModel<'p>, priority: P) -> Self {
        Self { model, priority }
    }

    /// Shifts in visiting order.
    pub fn shift_order(&self) -> Vec<ShiftIdx> {
        let problem = self.model.problem();
        let mut scarcity: Vec<Option<usize>> = vec![None; problem.shift_count()];
        for slot in self.model.slots() {
            let n = slot.candidates.len();
            let entry = &mut scarcity[slot.shift];
            *entry = Some(entry.map_or(n, |m| m.min(n)));
        }

        let mut order: Vec<(usize, i64, ShiftIdx)> = scarcity
            .iter()
            .enumerate()
            .filter_map(|(s, n)| n.map(|n| (n, problem.shift(s).start, s)))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, _, s)| s).collect()
    }

    pub fn run(&self) -> Seed {
        let started = Instant::now();
        let model = self.model;
        let mut state = ScheduleState::new(model);

        let mut slots_by_shift: Vec<Vec<SlotIdx>> = vec![Vec::new(); model.problem().shift_count()];
        for slot in model.slots() {
            slots_by_shift[slot.shift].push(slot.index);
        }
        for slots in &mut slots_by_shift {
            slots.sort_by_key(|&s| (model.slot(s).candidates.len(), s));
        }

        for shift in self.shift_order() {
            for &slot in &slots_by_shift[shift] {
                while state.open_seats(slot) > 0 {
                    let Some(worker) = self.pick(&state, slot) else {
                        trace!(event = "seat_left_open", slot, shift);
                        break;
                    };
                    // `pick` only returns workers that pass every check.
                    if state.try_assign(slot, worker).is_err() {
                        break;
                    }
                }
            }
        }

        let score = state.score();
        let seed = Seed {
            assignments: state.assignments(),
            unfilled: state.unfilled(),
            score,
        };
        info!(
            event = "construction_end",
            priority = self.priority.name(),
            assigned = seed.assignments.len(),
            unfilled = seed.unfilled,
            score = %score,
            elapsed_ms = started.elapsed().as_millis() as u64,
        );
        seed
    }

    fn pick(&self, state: &ScheduleState<'_, '_>, slot: SlotIdx) -> Option<WorkerIdx> {
        let shift = self.model.slot(slot).shift;
        self.model
            .slot(slot)
            .candidates
            .iter()
            .copied()
            .filter(|&w| state.check(slot, w).is_ok())
            .max_by_key(|&w| {
                (
                    self.priority.priority(w, state),
                    Reverse(self.model.cost(w, shift)),
                    Reverse(w),
                )
            })
    }
}
