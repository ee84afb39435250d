//! Pairwise shift conflict cache.
//!
//! Overlap and short-rest pairs are computed once per run over all shift
//! pairs and stored as bit matrices. Per-worker checks then cost one bit
//! lookup instead of interval arithmetic.

use rayon::prelude::*;
use shiftwise_core::{Problem, ShiftIdx};

const WORD_BITS: usize = 64;

/// Square bit matrix indexed by shift.
#[derive(Debug, Clone)]
struct BitMatrix {
    words_per_row: usize,
    bits: Vec<u64>,
}

impl BitMatrix {
    fn from_rows(n: usize, rows: Vec<Vec<u64>>) -> Self {
        let words_per_row = n.div_ceil(WORD_BITS);
        let mut bits = Vec::with_capacity(n * words_per_row);
        for row in rows {
            bits.extend(row);
        }
        Self {
            words_per_row,
            bits,
        }
    }

    #[inline]
    fn get(&self, a: usize, b: usize) -> bool {
        let word = self.bits[a * self.words_per_row + b / WORD_BITS];
        word & (1u64 << (b % WORD_BITS)) != 0
    }

    fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn byte_size(&self) -> usize {
        self.bits.len() * std::mem::size_of::<u64>()
    }
}

/// Cached overlap and insufficient-rest relations between shifts.
///
/// Every shift overlaps itself, so one worker can never hold two seats
/// of the same shift.
#[derive(Debug, Clone)]
pub struct ShiftConflicts {
    shift_count: usize,
    overlap: BitMatrix,
    short_rest: BitMatrix,
}

impl ShiftConflicts {
    /// Builds the cache. Rows are computed in parallel once the shift count
    /// exceeds `parallel_threshold`.
    pub fn build(problem: &Problem, min_rest_minutes: Option<i64>, parallel_threshold: usize) -> Self {
        let n = problem.shift_count();
        let row = |a: usize| -> (Vec<u64>, Vec<u64>) {
            let words = n.div_ceil(WORD_BITS);
            let mut overlap = vec![0u64; words];
            let mut short_rest = vec![0u64; words];
            let sa = problem.shift(a);
            for b in 0..n {
                let sb = problem.shift(b);
                let bit = 1u64 << (b % WORD_BITS);
                match sa.rest_between(sb) {
                    None => overlap[b / WORD_BITS] |= bit,
                    Some(rest) if min_rest_minutes.is_some_and(|min| rest < min) => {
                        short_rest[b / WORD_BITS] |= bit
                    }
                    Some(_) => {}
                }
            }
            (overlap, short_rest)
        };

        let rows: Vec<(Vec<u64>, Vec<u64>)> = if n > parallel_threshold {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };
        let (overlap_rows, rest_rows): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

        Self {
            shift_count: n,
            overlap: BitMatrix::from_rows(n, overlap_rows),
            short_rest: BitMatrix::from_rows(n, rest_rows),
        }
    }

    #[inline]
    pub fn overlaps(&self, a: ShiftIdx, b: ShiftIdx) -> bool {
        self.overlap.get(a, b)
    }

    #[inline]
    pub fn short_rest(&self, a: ShiftIdx, b: ShiftIdx) -> bool {
        self.short_rest.get(a, b)
    }

    /// True when one worker may not hold both shifts.
    #[inline]
    pub fn excludes(&self, a: ShiftIdx, b: ShiftIdx) -> bool {
        self.overlaps(a, b) || self.short_rest(a, b)
    }

    /// Unordered overlapping pairs of distinct shifts.
    pub fn overlap_pairs(&self) -> usize {
        (self.overlap.count_ones() - self.shift_count) / 2
    }

    /// Unordered short-rest pairs.
    pub fn short_rest_pairs(&self) -> usize {
        self.short_rest.count_ones() / 2
    }

    pub fn byte_size(&self) -> usize {
        self.overlap.byte_size() + self.short_rest.byte_size()
    }
}
