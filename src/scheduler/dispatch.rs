//! Dynamic priority-driven list scheduler.
//!
//! # Algorithm
//!
//! 1. Start the resource clock at t=0 with every job unscheduled.
//! 2. Evaluate the rule engine on the unscheduled jobs at the current clock.
//! 3. Append the best job, advance the clock by its duration, repeat.
//!
//! Unlike a one-shot sort, time-dependent rules (MST, ATC) see the
//! clock move as the sequence grows.
//!
//! # Complexity
//! O(n² · r) where n=jobs, r=rules in the engine.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 14.2: Composite Dispatching Rules

use log::trace;

use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::models::{Job, Sequence};

/// Priority-driven list scheduler for a single resource.
///
/// # Example
///
/// ```
/// use u_sequencing::scheduler::DispatchScheduler;
/// use u_sequencing::models::Job;
///
/// let jobs = vec![Job::new(20, 2, 1), Job::new(3, 2, 4)];
/// let sequence = DispatchScheduler::new().sequence(&jobs);
/// assert_eq!(&sequence[..], &[1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchScheduler {
    rule_engine: RuleEngine,
}

impl DispatchScheduler {
    /// Creates a scheduler driven by ATC, with EDD and SPT as tie-breakers.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::new()
                .with_rule(rules::Atc::default())
                .with_tie_breaker(rules::Edd)
                .with_tie_breaker(rules::Spt),
        }
    }

    /// Sets the rule engine used at each dispatch decision.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Builds a processing order for `jobs`.
    ///
    /// On a full tie the lower job index is dispatched first.
    pub fn sequence(&self, jobs: &[Job]) -> Sequence {
        let mut remaining: Vec<usize> = (0..jobs.len()).collect();
        let mut order = Vec::with_capacity(jobs.len());
        let mut context = SchedulingContext::for_jobs(jobs);

        while let Some(best) = self
            .rule_engine
            .select_best_among(jobs, &remaining, &context)
        {
            trace!("dispatch t={}: job {}", context.current_time, best);
            remaining.retain(|&i| i != best);
            order.push(best);
            context = context.with_time(context.current_time + jobs[best].duration);
        }

        Sequence::new(order)
    }
}

impl Default for DispatchScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new(10, 3, 4),
            Job::new(5, 3, 3),
            Job::new(2, 2, 1),
            Job::new(8, 1, 1),
            Job::new(6, 4, 2),
        ]
    }

    #[test]
    fn test_single_job() {
        let sequence = DispatchScheduler::new().sequence(&[Job::new(1, 4, 2)]);
        assert_eq!(&sequence[..], &[0]);
    }

    #[test]
    fn test_empty() {
        assert!(DispatchScheduler::new().sequence(&[]).is_empty());
    }

    #[test]
    fn test_sequence_is_permutation() {
        let jobs = sample_jobs();
        let sequence = DispatchScheduler::new().sequence(&jobs);
        assert!(sequence.is_permutation_of(jobs.len()));
    }

    #[test]
    fn test_static_rules_match_sort() {
        // With time-independent rules, dispatching equals a stable sort
        let jobs = sample_jobs();
        let engine = RuleEngine::new()
            .with_rule(rules::Edd)
            .with_tie_breaker(rules::HighestWeight)
            .with_tie_breaker(rules::Spt);
        let ctx = SchedulingContext::at_time(0);

        let sorted = engine.sort_indices(&jobs, &ctx);
        let dispatched = DispatchScheduler::new()
            .with_rule_engine(engine)
            .sequence(&jobs);
        assert_eq!(&dispatched[..], &sorted[..]);
    }

    #[test]
    fn test_full_tie_dispatches_lowest_index() {
        let jobs = vec![Job::new(5, 2, 2); 3];
        let sequence = DispatchScheduler::new().sequence(&jobs);
        assert_eq!(&sequence[..], &[0, 1, 2]);
    }

    #[test]
    fn test_clock_advances_for_slack_rule() {
        // At t=0, MST prefers job 0 (slack 0). Job 1 then has slack
        // 7-4-3 = 0 while job 2 has 20-4-1 = 15.
        let jobs = vec![Job::new(4, 4, 1), Job::new(7, 3, 1), Job::new(20, 1, 1)];
        let scheduler =
            DispatchScheduler::new().with_rule_engine(RuleEngine::new().with_rule(rules::Mst));
        assert_eq!(&scheduler.sequence(&jobs)[..], &[0, 1, 2]);
    }
}
