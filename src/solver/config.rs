//! Solve configuration.
//!
//! The exact solvers have no size guard of their own; `SolveConfig` is
//! where the job-count ceiling is enforced before any work starts.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dp::MAX_DP_JOBS;
use super::{DispatchSolver, DpSolver, ExhaustiveSolver, GreedySolver, Solver};
use crate::models::{Job, Solution};
use crate::validation::{validate_cost_bounds, ValidationError};

/// Which algorithm to run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Subset DP up to `max_exact_jobs`, greedy above.
    #[default]
    Auto,
    /// Exact subset dynamic program.
    Dp,
    /// Exact search over every permutation.
    Exhaustive,
    /// EDD → weight → SPT sort.
    Greedy,
    /// ATC list scheduling.
    Atc,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverKind::Auto => "auto",
            SolverKind::Dp => "dp",
            SolverKind::Exhaustive => "exhaustive",
            SolverKind::Greedy => "greedy",
            SolverKind::Atc => "atc",
        };
        f.write_str(name)
    }
}

/// Errors raised before solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// An exact solver was requested for more jobs than its ceiling.
    #[error("{solver} solver is limited to {limit} jobs, got {jobs}")]
    TooManyJobs {
        /// Requested solver.
        solver: SolverKind,
        /// Job count of the instance.
        jobs: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// Durations and weights are too large for 64-bit costs.
    #[error("{0}")]
    CostOverflow(#[from] ValidationError),
}

/// Solver selection and size ceilings.
///
/// # Example
/// ```
/// use u_sequencing::solver::{SolveConfig, SolverKind};
/// use u_sequencing::models::Job;
///
/// let config = SolveConfig::new().with_solver(SolverKind::Dp);
/// let solution = config.solve(&[Job::new(2, 3, 4)]).unwrap();
/// assert_eq!(solution.cost, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Algorithm to run.
    pub solver: SolverKind,
    /// Largest instance the subset DP may be run on.
    pub max_exact_jobs: usize,
    /// Largest instance exhaustive search may be run on.
    pub max_exhaustive_jobs: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            solver: SolverKind::Auto,
            max_exact_jobs: 18,
            max_exhaustive_jobs: 10,
        }
    }
}

impl SolveConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the algorithm.
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the subset DP ceiling.
    pub fn with_max_exact_jobs(mut self, max_jobs: usize) -> Self {
        self.max_exact_jobs = max_jobs;
        self
    }

    /// Sets the exhaustive search ceiling.
    pub fn with_max_exhaustive_jobs(mut self, max_jobs: usize) -> Self {
        self.max_exhaustive_jobs = max_jobs;
        self
    }

    /// Picks the concrete algorithm for an instance of `jobs` jobs.
    ///
    /// `Auto` never fails; explicit exact solvers fail above their ceiling.
    pub fn resolve(&self, jobs: usize) -> Result<SolverKind, SolveError> {
        let exact_limit = self.max_exact_jobs.min(MAX_DP_JOBS);
        let check = |solver, limit| {
            if jobs > limit {
                Err(SolveError::TooManyJobs {
                    solver,
                    jobs,
                    limit,
                })
            } else {
                Ok(solver)
            }
        };

        match self.solver {
            SolverKind::Auto if jobs <= exact_limit => Ok(SolverKind::Dp),
            SolverKind::Auto => Ok(SolverKind::Greedy),
            SolverKind::Dp => check(SolverKind::Dp, exact_limit),
            SolverKind::Exhaustive => check(SolverKind::Exhaustive, self.max_exhaustive_jobs),
            kind @ (SolverKind::Greedy | SolverKind::Atc) => Ok(kind),
        }
    }

    /// Returns the solver to run on an instance of `jobs` jobs.
    pub fn solver_for(&self, jobs: usize) -> Result<Box<dyn Solver>, SolveError> {
        let solver: Box<dyn Solver> = match self.resolve(jobs)? {
            SolverKind::Dp => Box::new(DpSolver),
            SolverKind::Exhaustive => Box::new(ExhaustiveSolver),
            SolverKind::Atc => Box::new(DispatchSolver::default()),
            SolverKind::Greedy | SolverKind::Auto => Box::new(GreedySolver::new()),
        };
        Ok(solver)
    }

    /// Checks the ceiling and the cost range, then solves.
    pub fn solve(&self, jobs: &[Job]) -> Result<Solution, SolveError> {
        let solver = self.solver_for(jobs.len())?;
        validate_cost_bounds(jobs)?;
        info!("solving {} jobs with {}", jobs.len(), solver.name());
        Ok(solver.solve(jobs))
    }
}
