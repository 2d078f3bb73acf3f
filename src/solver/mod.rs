//! Sequencing algorithms for total weighted tardiness.
//!
//! Every solver takes the same job set and reports its sequence with the
//! cost computed by [`crate::scheduler::evaluate`]. Solvers are independent
//! strategies; none calls another.
//!
//! | Solver | Exact | Time |
//! |--------|-------|------|
//! | [`DpSolver`] | yes | O(n² · 2ⁿ) |
//! | [`ExhaustiveSolver`] | yes | O(n · n!) |
//! | [`GreedySolver`] | no | O(n log n) |
//! | [`DispatchSolver`] | no | O(n²) |
//!
//! # Example
//!
//! ```
//! use u_sequencing::models::Job;
//! use u_sequencing::solver::{greedy, optimal};
//!
//! let jobs = vec![
//!     Job::new(10, 3, 4),
//!     Job::new(5, 3, 3),
//!     Job::new(2, 2, 1),
//!     Job::new(8, 1, 1),
//!     Job::new(6, 4, 2),
//! ];
//! assert_eq!(greedy(&jobs).cost, 20);
//! assert_eq!(optimal(&jobs).cost, 14);
//! ```
//!
//! # References
//!
//! - Lawler (1977), "A pseudopolynomial algorithm for sequencing jobs to
//!   minimize total tardiness"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3.6

mod config;
pub mod dp;
mod exhaustive;
mod greedy;

pub use config::{SolveConfig, SolveError, SolverKind};
pub use dp::{optimal, DpSolver};
pub use exhaustive::{all_orders, search, ExhaustiveSolver};
pub use greedy::{greedy, GreedySolver};

use std::fmt::Debug;

use crate::models::{Job, Solution};
use crate::scheduler::{evaluate, DispatchScheduler};

/// A sequencing strategy.
pub trait Solver: Debug {
    /// Short solver name (e.g., "dp", "greedy").
    fn name(&self) -> &'static str;

    /// Sequences `jobs` and reports the cost of the chosen order.
    ///
    /// Jobs are assumed valid (see [`crate::validation::validate_jobs`]).
    fn solve(&self, jobs: &[Job]) -> Solution;
}

/// Heuristic solver backed by a [`DispatchScheduler`] (ATC by default).
#[derive(Debug, Clone, Default)]
pub struct DispatchSolver {
    scheduler: DispatchScheduler,
}

impl DispatchSolver {
    /// Wraps a configured scheduler.
    pub fn new(scheduler: DispatchScheduler) -> Self {
        Self { scheduler }
    }
}

impl Solver for DispatchSolver {
    fn name(&self) -> &'static str {
        "atc"
    }

    fn solve(&self, jobs: &[Job]) -> Solution {
        let sequence = self.scheduler.sequence(jobs);
        let cost = evaluate(jobs, &sequence);
        Solution::new(sequence, cost)
    }
}
