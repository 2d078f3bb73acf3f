//! Total weighted tardiness cost model.
//!
//! Simulates the single resource from t=0: jobs run back-to-back in the
//! given order, never idle, never preempted.
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | Start S_j | Sum of durations of jobs before j |
//! | Completion C_j | S_j + p_j |
//! | Tardiness T_j | max(0, C_j - d_j) |
//! | Cost | Σ w_j · T_j |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 3.6: Total Weighted Tardiness

use crate::models::Job;
use crate::validation::{validate_sequence, ValidationError};
use crate::Cost;

/// Start and completion time of every job under one sequence.
///
/// Indexed by job index, not by position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionProfile {
    start: Vec<i64>,
    completion: Vec<i64>,
    tardiness: Vec<i64>,
}

impl CompletionProfile {
    /// Start time of job `index`.
    pub fn start(&self, index: usize) -> i64 {
        self.start[index]
    }

    /// Completion time of job `index`.
    pub fn completion(&self, index: usize) -> i64 {
        self.completion[index]
    }

    /// Tardiness of job `index` (0 when on time).
    pub fn tardiness(&self, index: usize) -> i64 {
        self.tardiness[index]
    }

    /// Completion times, indexed by job.
    pub fn completions(&self) -> &[i64] {
        &self.completion
    }

    /// Latest completion time.
    pub fn makespan(&self) -> i64 {
        self.completion.iter().copied().max().unwrap_or(0)
    }

    /// Number of jobs in the profile.
    pub fn len(&self) -> usize {
        self.completion.len()
    }

    /// Whether the profile is empty.
    pub fn is_empty(&self) -> bool {
        self.completion.is_empty()
    }
}

/// Weighted tardiness of `job` completing at `completion`.
#[inline]
pub fn tardiness_cost(job: &Job, completion: i64) -> Cost {
    job.weight_factor() * job.tardiness_at(completion)
}

/// Computes the completion profile of `order`.
///
/// # Panics
/// If `order` is not a permutation of `0..jobs.len()`.
pub fn completion_profile(jobs: &[Job], order: &[usize]) -> CompletionProfile {
    assert_permutation(jobs, order);

    let mut start = vec![0; jobs.len()];
    let mut completion = vec![0; jobs.len()];
    let mut tardiness = vec![0; jobs.len()];
    let mut clock = 0;
    for &i in order {
        start[i] = clock;
        clock += jobs[i].duration;
        completion[i] = clock;
        tardiness[i] = jobs[i].tardiness_at(clock);
    }

    CompletionProfile {
        start,
        completion,
        tardiness,
    }
}

/// Total weighted tardiness of processing `jobs` in `order`.
///
/// # Panics
/// If `order` is not a permutation of `0..jobs.len()`.
pub fn evaluate(jobs: &[Job], order: &[usize]) -> Cost {
    assert_permutation(jobs, order);
    weighted_tardiness(jobs, order)
}

/// Like [`evaluate`], but reports an invalid `order` instead of panicking.
///
/// Intended for sequences that come from outside the crate (files, users).
pub fn try_evaluate(jobs: &[Job], order: &[usize]) -> Result<Cost, ValidationError> {
    validate_sequence(order, jobs.len())?;
    Ok(weighted_tardiness(jobs, order))
}

/// Cost of `order` without the permutation check.
pub(crate) fn weighted_tardiness(jobs: &[Job], order: &[usize]) -> Cost {
    let mut clock = 0;
    let mut cost = 0;
    for &i in order {
        let job = &jobs[i];
        clock += job.duration;
        cost += tardiness_cost(job, clock);
    }
    cost
}

fn assert_permutation(jobs: &[Job], order: &[usize]) {
    if let Err(e) = validate_sequence(order, jobs.len()) {
        panic!("invalid sequence: {e}");
    }
}
