//! Single-machine sequencing for total weighted tardiness.
//!
//! A set of jobs, each with a deadline, a processing time and a weight, is
//! processed one at a time starting at time 0 without idle time. A job that
//! completes at `C` after its deadline `d` costs `w · (C − d)`. The goal is
//! the processing order with the smallest total cost.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobSet`, `Sequence`, `Solution`
//! - **`validation`**: Domain-constraint checks on jobs and sequences
//! - **`scheduler`**: Cost model, completion profiles, KPIs and list scheduling
//! - **`dispatching`**: Priority rules and the rule engine
//! - **`solver`**: Exact (subset DP, exhaustive) and heuristic solvers
//! - **`io`**: Plain-text job and solution files
//! - **`generate`**: Seeded random instances
//!
//! # Example
//!
//! ```
//! use u_sequencing::io::parse_job_set;
//! use u_sequencing::solver::{SolveConfig, SolverKind};
//!
//! let jobs = parse_job_set("3\n3,2,1\n1,3,4\n4,1,2\n").unwrap();
//! let solution = SolveConfig::new()
//!     .with_solver(SolverKind::Dp)
//!     .solve(&jobs)
//!     .unwrap();
//! assert_eq!(&solution.sequence[..], &[1, 2, 0]);
//! assert_eq!(solution.cost, 11);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Held & Karp (1962), "A dynamic programming approach to sequencing problems"

pub mod dispatching;
pub mod generate;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

/// Total weighted tardiness.
pub type Cost = i64;
