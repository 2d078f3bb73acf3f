//! Job model.
//!
//! A job is a single unit of work processed on the shared resource.
//! Its identity is its position in the [`JobSet`].
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Smallest accepted priority weight.
pub const MIN_WEIGHT: u8 = 1;
/// Largest accepted priority weight.
pub const MAX_WEIGHT: u8 = 4;

/// A job to be sequenced on the single resource.
///
/// # Time Representation
/// All times are integer time units relative to t=0, the moment the
/// resource starts processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job {
    /// Survival deadline: completions after this time are tardy.
    pub deadline: i64,
    /// Processing duration.
    pub duration: i64,
    /// Priority weight in `MIN_WEIGHT..=MAX_WEIGHT` (higher = more important).
    pub weight: u8,
}

impl Job {
    /// Creates a job.
    ///
    /// Values are not checked here; see [`crate::validation::validate_jobs`].
    pub fn new(deadline: i64, duration: i64, weight: u8) -> Self {
        Self {
            deadline,
            duration,
            weight,
        }
    }

    /// Weight as a cost multiplier.
    #[inline]
    pub fn weight_factor(&self) -> i64 {
        i64::from(self.weight)
    }

    /// Tardiness if the job completes at `completion`.
    #[inline]
    pub fn tardiness_at(&self, completion: i64) -> i64 {
        (completion - self.deadline).max(0)
    }

    /// Latest start time that still meets the deadline.
    pub fn latest_start(&self) -> i64 {
        self.deadline - self.duration
    }
}

impl From<(i64, i64, u8)> for Job {
    fn from((deadline, duration, weight): (i64, i64, u8)) -> Self {
        Self::new(deadline, duration, weight)
    }
}

/// An ordered collection of jobs, indexed `0..n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobSet {
    jobs: Vec<Job>,
}

impl JobSet {
    /// Creates a job set from jobs in identity order.
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Total processing time of every job.
    pub fn total_duration(&self) -> i64 {
        self.jobs.iter().map(|j| j.duration).sum()
    }

    /// Mean processing time, `None` when empty.
    pub fn average_duration(&self) -> Option<f64> {
        if self.jobs.is_empty() {
            None
        } else {
            Some(self.total_duration() as f64 / self.jobs.len() as f64)
        }
    }

    /// Consumes the set and returns its jobs.
    pub fn into_jobs(self) -> Vec<Job> {
        self.jobs
    }
}

impl Deref for JobSet {
    type Target = [Job];

    fn deref(&self) -> &[Job] {
        &self.jobs
    }
}

impl From<Vec<Job>> for JobSet {
    fn from(jobs: Vec<Job>) -> Self {
        Self::new(jobs)
    }
}

impl FromIterator<Job> for JobSet {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
