//! Scheduling context for dispatching rule evaluation.

use crate::models::Job;

/// Runtime sequencing state passed to dispatching rules.
///
/// Holds the resource clock and the statistics that context-aware
/// rules (MST, ATC) need.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulingContext {
    /// Current resource clock: completion time of everything sequenced so far.
    pub current_time: i64,
    /// Average processing time across the job set (for ATC normalization).
    pub average_processing_time: Option<f64>,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Creates a context at time 0 with statistics taken from `jobs`.
    pub fn for_jobs(jobs: &[Job]) -> Self {
        let average_processing_time = if jobs.is_empty() {
            None
        } else {
            let total: i64 = jobs.iter().map(|j| j.duration).sum();
            Some(total as f64 / jobs.len() as f64)
        };
        Self {
            current_time: 0,
            average_processing_time,
        }
    }

    /// Moves the clock to `time`.
    pub fn with_time(mut self, time: i64) -> Self {
        self.current_time = time;
        self
    }

    /// Sets the average processing time.
    pub fn with_average_processing_time(mut self, avg: f64) -> Self {
        self.average_processing_time = Some(avg);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_jobs() {
        let ctx = SchedulingContext::for_jobs(&[Job::new(5, 2, 1), Job::new(5, 6, 1)]);
        assert_eq!(ctx.current_time, 0);
        assert!((ctx.average_processing_time.unwrap() - 4.0).abs() < 1e-10);
        assert!(SchedulingContext::for_jobs(&[]).average_processing_time.is_none());
    }

    #[test]
    fn test_with_time() {
        let ctx = SchedulingContext::at_time(3).with_time(10);
        assert_eq!(ctx.current_time, 10);
    }
}
