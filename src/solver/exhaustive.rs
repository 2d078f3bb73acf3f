//! Exhaustive permutation search.
//!
//! Enumerates all n! orders in lexicographic order and keeps the first
//! strict minimum. Exact, but only practical up to n ≈ 10.

use itertools::Itertools;
use log::debug;

use super::Solver;
use crate::models::{Job, Solution};
use crate::scheduler::weighted_tardiness;

/// Brute-force solver over every permutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl Solver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, jobs: &[Job]) -> Solution {
        search(jobs)
    }
}

/// Finds a minimum-cost sequence by trying every permutation.
///
/// Among equally cheap orders, the lexicographically smallest wins.
pub fn search(jobs: &[Job]) -> Solution {
    let n = jobs.len();
    if n == 0 {
        return Solution::default();
    }

    let mut evaluated = 0u64;
    let best = all_orders(jobs)
        .inspect(|_| evaluated += 1)
        .reduce(|best, candidate| {
            if candidate.cost < best.cost {
                candidate
            } else {
                best
            }
        });
    debug!("exhaustive: n={n}, permutations={evaluated}");

    best.unwrap_or_default()
}

/// Every processing order of `jobs` with its cost, in lexicographic order.
///
/// Yields `n!` solutions; meant for inspecting small instances.
pub fn all_orders(jobs: &[Job]) -> impl Iterator<Item = Solution> + '_ {
    let n = jobs.len();
    (0..n).permutations(n).map(move |order| {
        // Permutations of 0..n are valid by construction
        let cost = weighted_tardiness(jobs, &order);
        Solution::new(order, cost)
    })
}
