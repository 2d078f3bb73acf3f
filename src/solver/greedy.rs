//! Greedy sort-based heuristic.
//!
//! # Rule
//!
//! Stable sort by:
//! 1. deadline ascending (most urgent first),
//! 2. weight descending (heavier job wins a deadline tie),
//! 3. duration ascending (shorter job wins).
//!
//! Jobs tied on all three keep their input order. The key is compared as
//! integers, so it stays exact for deadlines beyond `f64` precision (the
//! dispatching rules score in `f64`).
//!
//! # Complexity
//! O(n log n). Not optimal: the cost is an upper bound on the optimum.

use std::cmp::Reverse;

use super::Solver;
use crate::models::{Job, Solution};
use crate::scheduler::evaluate;

/// One-shot sort heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, jobs: &[Job]) -> Solution {
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by_key(|&i| priority_key(&jobs[i]));
        let cost = evaluate(jobs, &order);
        Solution::new(order, cost)
    }
}

fn priority_key(job: &Job) -> (i64, Reverse<u8>, i64) {
    (job.deadline, Reverse(job.weight), job.duration)
}

/// Sequences `jobs` with the greedy rule and reports its cost.
pub fn greedy(jobs: &[Job]) -> Solution {
    GreedySolver.solve(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{rules, RuleEngine, SchedulingContext};

    fn sample_jobs(first_deadline: i64) -> Vec<Job> {
        vec![
            Job::new(first_deadline, 3, 4),
            Job::new(5, 3, 3),
            Job::new(2, 2, 1),
            Job::new(8, 1, 1),
            Job::new(6, 4, 2),
        ]
    }

    #[test]
    fn test_greedy_baseline() {
        let solution = greedy(&sample_jobs(10));
        assert_eq!(&solution.sequence[..], &[2, 1, 4, 3, 0]);
        assert_eq!(solution.cost, 20);
    }

    #[test]
    fn test_greedy_tighter_deadline_baseline() {
        let solution = greedy(&sample_jobs(9));
        assert_eq!(&solution.sequence[..], &[2, 1, 4, 3, 0]);
        assert_eq!(solution.cost, 24);
    }

    #[test]
    fn test_deadline_tie_prefers_weight() {
        let jobs = vec![Job::new(5, 1, 1), Job::new(5, 1, 3)];
        assert_eq!(&greedy(&jobs).sequence[..], &[1, 0]);
    }

    #[test]
    fn test_weight_tie_prefers_short() {
        let jobs = vec![Job::new(5, 4, 2), Job::new(5, 2, 2)];
        assert_eq!(&greedy(&jobs).sequence[..], &[1, 0]);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let jobs = vec![Job::new(5, 2, 2); 3];
        assert_eq!(&greedy(&jobs).sequence[..], &[0, 1, 2]);
    }

    #[test]
    fn test_large_deadlines_stay_ordered() {
        // 2^53 and 2^53 + 1 are the same f64; the earlier deadline must still lead
        let base = 1i64 << 53;
        let jobs = vec![Job::new(base + 1, 1, 4), Job::new(base, 1, 1)];
        assert_eq!(&greedy(&jobs).sequence[..], &[1, 0]);

        let jobs = vec![Job::new(i64::MAX - 1, 2, 1), Job::new(i64::MAX - 2, 2, 1)];
        assert_eq!(&greedy(&jobs).sequence[..], &[1, 0]);
    }

    #[test]
    fn test_matches_rule_chain_on_small_values() {
        let engine = RuleEngine::new()
            .with_rule(rules::Edd)
            .with_tie_breaker(rules::HighestWeight)
            .with_tie_breaker(rules::Spt);
        for first_deadline in [2, 5, 9, 10] {
            let jobs = sample_jobs(first_deadline);
            let by_rules = engine.sort_indices(&jobs, &SchedulingContext::for_jobs(&jobs));
            assert_eq!(&greedy(&jobs).sequence[..], &by_rules[..]);
        }
    }

    #[test]
    fn test_single_and_empty() {
        let solution = greedy(&[Job::new(1, 3, 2)]);
        assert_eq!(&solution.sequence[..], &[0]);
        assert_eq!(solution.cost, 4);

        assert!(greedy(&[]).is_empty());
    }
}
