//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Time-based**: SPT, LPT, WSPT
//! - **Due-date**: EDD, MST, ATC
//! - **Priority**: WEIGHT
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Job;

// ======================== Time-based rules ========================

/// Shortest Processing Time.
///
/// Prioritizes jobs with shorter duration, which keeps long jobs from
/// blocking the resource.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        job.duration as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        -(job.duration as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Weighted Shortest Processing Time.
///
/// Prioritizes by the ratio of weight to processing time.
///
/// # Reference
/// Smith (1956), optimal for minimizing total weighted completion time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        if job.duration <= 0 {
            return f64::MAX;
        }
        -(job.weight_factor() as f64 / job.duration as f64) // Higher ratio = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

// ======================== Due-date rules ========================

/// Earliest Due Date.
///
/// Prioritizes jobs with earlier survival deadlines.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        job.deadline as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Minimum Slack Time.
///
/// Slack = (deadline - current_time) - duration.
/// Prioritizes jobs with least slack (most urgent).
#[derive(Debug, Clone, Copy)]
pub struct Mst;

impl DispatchingRule for Mst {
    fn name(&self) -> &'static str {
        "MST"
    }

    fn evaluate(&self, job: &Job, context: &SchedulingContext) -> RuleScore {
        (job.deadline - context.current_time - job.duration) as f64
    }

    fn description(&self) -> &'static str {
        "Minimum Slack Time"
    }
}

/// Apparent Tardiness Cost.
///
/// Combines WSPT with deadline urgency using an exponential function.
/// The parameter `k` controls the balance:
/// - k > 2: more WSPT-like (processing time dominates)
/// - k < 2: more EDD-like (deadline dominates)
///
/// # Reference
/// Vepsalainen & Morton (1987), "Priority Rules for Job Shops with
/// Weighted Tardiness Costs"
#[derive(Debug, Clone, Copy)]
pub struct Atc {
    /// Lookahead parameter (default: 2.0).
    pub k: f64,
}

impl Default for Atc {
    fn default() -> Self {
        Self { k: 2.0 }
    }
}

impl Atc {
    /// Creates an ATC rule with custom k parameter.
    pub fn with_k(k: f64) -> Self {
        Self { k }
    }
}

impl DispatchingRule for Atc {
    fn name(&self) -> &'static str {
        "ATC"
    }

    fn evaluate(&self, job: &Job, context: &SchedulingContext) -> RuleScore {
        let processing_time = job.duration as f64;
        if processing_time <= 0.0 {
            return f64::MAX;
        }

        let weight = job.weight_factor() as f64;
        let slack = job.deadline as f64 - processing_time - context.current_time as f64;
        let p_avg = context
            .average_processing_time
            .unwrap_or(processing_time)
            .max(1.0);

        let urgency = if slack <= 0.0 {
            1.0
        } else {
            (-slack / (self.k * p_avg)).exp()
        };

        -(weight / processing_time * urgency) // Higher ATC = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Apparent Tardiness Cost"
    }
}

// ======================== Priority-based rule ========================

/// Highest weight first.
///
/// (Negated because lower score = higher priority in convention.)
#[derive(Debug, Clone, Copy)]
pub struct HighestWeight;

impl DispatchingRule for HighestWeight {
    fn name(&self) -> &'static str {
        "WEIGHT"
    }

    fn evaluate(&self, job: &Job, _context: &SchedulingContext) -> RuleScore {
        -(job.weight_factor() as f64)
    }

    fn description(&self) -> &'static str {
        "Highest Weight"
    }
}
