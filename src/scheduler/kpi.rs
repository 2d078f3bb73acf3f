//! Sequence quality metrics (KPIs).
//!
//! Computes standard single-machine performance indicators from a job
//! set and a processing order.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Total Tardiness | Sum of max(0, completion - deadline) |
//! | Total Weighted Tardiness | Sum of weight * tardiness (the optimized cost) |
//! | Maximum Tardiness | Largest single delay |
//! | Tardy Jobs | Count of jobs completing after their deadline |
//! | On-Time Rate | Fraction meeting deadlines |
//! | Avg Flow Time | Mean completion time (all jobs released at t=0) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use super::cost::{completion_profile, tardiness_cost};
use crate::models::Job;
use crate::Cost;

/// Sequence performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceKpi {
    /// Makespan: latest completion time.
    pub makespan: i64,
    /// Sum of tardiness across all jobs.
    pub total_tardiness: i64,
    /// Sum of weighted tardiness across all jobs.
    pub total_weighted_tardiness: Cost,
    /// Maximum tardiness of any single job.
    pub max_tardiness: i64,
    /// Number of jobs completing after their deadline.
    pub tardy_jobs: usize,
    /// Fraction of jobs completing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Average flow time: mean completion time.
    pub avg_flow_time: f64,
}

impl SequenceKpi {
    /// Computes KPIs for processing `jobs` in `order`.
    ///
    /// # Panics
    /// If `order` is not a permutation of `0..jobs.len()`.
    pub fn calculate(jobs: &[Job], order: &[usize]) -> Self {
        let profile = completion_profile(jobs, order);

        let mut total_tardiness = 0;
        let mut total_weighted_tardiness = 0;
        let mut max_tardiness = 0;
        let mut tardy_jobs = 0;
        let mut total_flow_time = 0.0;

        for (i, job) in jobs.iter().enumerate() {
            let completion = profile.completion(i);
            total_flow_time += completion as f64;

            let tardiness = profile.tardiness(i);
            if tardiness > 0 {
                tardy_jobs += 1;
                total_tardiness += tardiness;
                max_tardiness = max_tardiness.max(tardiness);
                total_weighted_tardiness += tardiness_cost(job, completion);
            }
        }

        let (on_time_rate, avg_flow_time) = if jobs.is_empty() {
            (1.0, 0.0)
        } else {
            let n = jobs.len() as f64;
            ((jobs.len() - tardy_jobs) as f64 / n, total_flow_time / n)
        };

        Self {
            makespan: profile.makespan(),
            total_tardiness,
            total_weighted_tardiness,
            max_tardiness,
            tardy_jobs,
            on_time_rate,
            avg_flow_time,
        }
    }

    /// Whether the sequence keeps every job within `max_tardiness` of its deadline.
    pub fn meets_threshold(&self, max_tardiness: i64) -> bool {
        self.max_tardiness <= max_tardiness
    }
}
