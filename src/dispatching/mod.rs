//! Dispatching rules and rule engine for sequencing.
//!
//! Provides priority-based dispatching rules (SPT, EDD, WSPT, ATC, etc.)
//! and a composable rule engine for multi-criteria job prioritization.
//! The greedy solver is a fixed rule chain on top of this engine.
//!
//! # Usage
//!
//! ```
//! use u_sequencing::dispatching::{RuleEngine, SchedulingContext};
//! use u_sequencing::dispatching::rules;
//! use u_sequencing::models::Job;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Edd)
//!     .with_tie_breaker(rules::Spt);
//!
//! let jobs = vec![Job::new(8, 4, 1), Job::new(8, 2, 1), Job::new(3, 5, 1)];
//! let context = SchedulingContext::at_time(0);
//! assert_eq!(engine.sort_indices(&jobs, &context), vec![2, 1, 0]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (sequenced first).
/// This follows the academic convention where SPT = shortest processing time first.
pub type RuleScore = f64;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for jobs that should be processed first.
///
/// # Reference
/// Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job given the current scheduling context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, job: &Job, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
