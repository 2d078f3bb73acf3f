//! Exact subset dynamic program for total weighted tardiness.
//!
//! # State
//!
//! `dp[S][j]` = minimum weighted tardiness of processing exactly the jobs in
//! subset `S` (from t=0), with job `j ∈ S` processed last. Subsets are
//! bitmasks; both tables are flat arrays indexed by `S * n + j`.
//!
//! # Recurrence
//!
//! The completion time of the last job only depends on *which* jobs precede
//! it, not on their order: `C_j = p(S \ {j}) + p_j`. Hence
//!
//! ```text
//! dp[{j}][j] = w_j · max(0, p_j − d_j)
//! dp[S][j]   = min_{j' ∈ S\{j}} dp[S\{j}][j'] + w_j · max(0, p(S\{j}) + p_j − d_j)
//! ```
//!
//! Layers are built by subset size, so every `dp[S\{j}]` is final before it
//! is read. Ties keep the first minimum in ascending job order, which makes
//! the reconstructed sequence deterministic.
//!
//! # Complexity
//! O(n² · 2ⁿ) time, O(n · 2ⁿ) memory. Only viable for small n.
//!
//! # Reference
//! Held & Karp (1962), "A Dynamic Programming Approach to Sequencing Problems"

use log::{debug, trace};

use super::Solver;
use crate::models::{Job, Solution};
use crate::scheduler::tardiness_cost;
use crate::Cost;

/// Largest job count whose subsets fit in a `usize` bitmask.
pub const MAX_DP_JOBS: usize = usize::BITS as usize - 1;

/// Exact subset DP solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpSolver;

impl Solver for DpSolver {
    fn name(&self) -> &'static str {
        "dp"
    }

    fn solve(&self, jobs: &[Job]) -> Solution {
        optimal(jobs)
    }
}

/// Finds a minimum-cost sequence with the subset DP.
///
/// Equivalent in cost to exhaustive search. The table lives only for the
/// duration of the call.
///
/// # Panics
/// If `jobs.len() > MAX_DP_JOBS`. Memory runs out long before that, so
/// callers must bound the job count (see [`super::SolveConfig`]).
pub fn optimal(jobs: &[Job]) -> Solution {
    let n = jobs.len();
    assert!(
        n <= MAX_DP_JOBS,
        "subset DP supports at most {MAX_DP_JOBS} jobs, got {n}"
    );
    if n == 0 {
        return Solution::default();
    }

    let table = SubsetTable::build(jobs);
    debug!(
        "subset dp: n={}, subsets={}, states={}",
        n,
        table.subset_count(),
        table.cost.len()
    );
    table.reconstruct()
}

/// Cost and backpointer tables, indexed by `mask * n + last`.
struct SubsetTable {
    n: usize,
    cost: Vec<Cost>,
    pred: Vec<Option<u8>>,
}

impl SubsetTable {
    fn build(jobs: &[Job]) -> Self {
        let n = jobs.len();
        let subsets = 1usize << n;
        let load = subset_loads(jobs);

        let mut cost = vec![Cost::MAX; subsets * n];
        let mut pred = vec![None; subsets * n];

        // Base layer: each job alone, starting at t=0
        for (j, job) in jobs.iter().enumerate() {
            cost[(1 << j) * n + j] = tardiness_cost(job, job.duration);
        }

        for k in 2..=n {
            let mut built = 0usize;
            for mask in SubsetsOfSize::new(n, k) {
                for j in members(mask) {
                    let rest = mask ^ (1 << j);
                    let job = &jobs[j];
                    let step = tardiness_cost(job, load[rest] + job.duration);

                    let mut best = Cost::MAX;
                    let mut best_prev = None;
                    for prev in members(rest) {
                        let total = cost[rest * n + prev] + step;
                        if total < best {
                            best = total;
                            best_prev = Some(prev as u8);
                        }
                    }

                    cost[mask * n + j] = best;
                    pred[mask * n + j] = best_prev;
                }
                built += 1;
            }
            trace!("subset dp: layer {k} built ({built} subsets)");
        }

        Self { n, cost, pred }
    }

    fn subset_count(&self) -> usize {
        1 << self.n
    }

    /// Walks backpointers from the best last job of the full set.
    fn reconstruct(&self) -> Solution {
        let n = self.n;
        let full = self.subset_count() - 1;

        let mut best_cost = Cost::MAX;
        let mut best_last = 0;
        for j in members(full) {
            let c = self.cost[full * n + j];
            if c < best_cost {
                best_cost = c;
                best_last = j;
            }
        }

        let mut order = Vec::with_capacity(n);
        let mut mask = full;
        let mut current = Some(best_last);
        while let Some(j) = current {
            order.push(j);
            current = self.pred[mask * n + j].map(usize::from);
            mask ^= 1 << j;
        }
        order.reverse();

        Solution::new(order, best_cost)
    }
}

/// Total duration of every subset, indexed by mask.
fn subset_loads(jobs: &[Job]) -> Vec<i64> {
    let subsets = 1usize << jobs.len();
    let mut load = vec![0; subsets];
    for mask in 1..subsets {
        let lowest = mask.trailing_zeros() as usize;
        load[mask] = load[mask & (mask - 1)] + jobs[lowest].duration;
    }
    load
}

/// Job indices in `mask`, ascending.
fn members(mut mask: usize) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let j = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(j)
        }
    })
}

/// All `n`-bit masks with exactly `k` bits set, ascending (Gosper's hack).
struct SubsetsOfSize {
    next: usize,
    limit: usize,
}

impl SubsetsOfSize {
    fn new(n: usize, k: usize) -> Self {
        debug_assert!((1..=n).contains(&k));
        Self {
            next: (1 << k) - 1,
            limit: 1 << n,
        }
    }
}

impl Iterator for SubsetsOfSize {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.limit {
            return None;
        }
        let current = self.next;
        let lowest = current & current.wrapping_neg();
        let ripple = current + lowest;
        self.next = (((ripple ^ current) >> 2) / lowest) | ripple;
        Some(current)
    }
}
