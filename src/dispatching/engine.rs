//! Rule engine for multi-criteria dispatching.
//!
//! Composes multiple dispatching rules with configurable evaluation modes
//! and tie-breaking strategies.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Job;

/// How multiple rules are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the input order (the sort is stable).
    #[default]
    NextRule,
    /// Lower job index first.
    ByIndex,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn DispatchingRule>,
    weight: f64,
}

/// A composable rule engine for job prioritization.
///
/// Supports sequential multi-layer evaluation (primary rule → tie-breaker)
/// and weighted combination modes.
///
/// # Example
/// ```
/// use u_sequencing::dispatching::{RuleEngine, SchedulingContext};
/// use u_sequencing::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Edd)
///     .with_tie_breaker(rules::Spt);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::NextRule,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1.0)
    }

    /// Adds a rule whose score is scaled by `weight` in weighted mode.
    pub fn with_weighted_rule<R: DispatchingRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a rule consulted only on ties (weight 0.0, so it has no
    /// effect in weighted mode).
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 0.0)
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Sorts all jobs by priority (highest priority first).
    ///
    /// Returns indices into `jobs`. The sort is stable.
    pub fn sort_indices(&self, jobs: &[Job], context: &SchedulingContext) -> Vec<usize> {
        let candidates: Vec<usize> = (0..jobs.len()).collect();
        self.sort_candidates(jobs, candidates, context)
    }

    /// Sorts the given job indices by priority (highest priority first).
    pub fn sort_candidates(
        &self,
        jobs: &[Job],
        mut candidates: Vec<usize>,
        context: &SchedulingContext,
    ) -> Vec<usize> {
        candidates.sort_by(|&a, &b| self.compare(jobs, a, b, context));
        candidates
    }

    /// Returns the index of the highest-priority job.
    pub fn select_best(&self, jobs: &[Job], context: &SchedulingContext) -> Option<usize> {
        self.select_best_among(jobs, &(0..jobs.len()).collect::<Vec<_>>(), context)
    }

    /// Returns the highest-priority job among `candidates`.
    ///
    /// On a full tie the candidate listed first wins.
    pub fn select_best_among(
        &self,
        jobs: &[Job],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.compare(jobs, a, b, context))
    }

    /// Per-rule scores of `job`, scaled by each rule's weight.
    pub fn evaluate(&self, job: &Job, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job, context) * wr.weight)
            .collect()
    }

    /// Orders jobs `a` and `b`; `Less` means `a` goes first.
    fn compare(&self, jobs: &[Job], a: usize, b: usize, context: &SchedulingContext) -> Ordering {
        let by_rules = match self.mode {
            EvaluationMode::Sequential => self.compare_sequential(&jobs[a], &jobs[b], context),
            EvaluationMode::Weighted => self
                .weighted_score(&jobs[a], context)
                .total_cmp(&self.weighted_score(&jobs[b], context)),
        };
        by_rules.then_with(|| match self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ByIndex => a.cmp(&b),
        })
    }

    /// First rule whose scores differ by more than epsilon decides.
    fn compare_sequential(&self, a: &Job, b: &Job, context: &SchedulingContext) -> Ordering {
        self.rules
            .iter()
            .map(|wr| (wr.rule.evaluate(a, context), wr.rule.evaluate(b, context)))
            .find(|(sa, sb)| (sa - sb).abs() > self.epsilon)
            .map_or(Ordering::Equal, |(sa, sb)| sa.total_cmp(&sb))
    }

    fn weighted_score(&self, job: &Job, context: &SchedulingContext) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job, context) * wr.weight)
            .sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    #[test]
    fn test_spt_ordering() {
        let jobs = vec![Job::new(0, 5, 1), Job::new(0, 1, 1), Job::new(0, 3, 1)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Spt);

        assert_eq!(engine.sort_indices(&jobs, &ctx), vec![1, 2, 0]);
    }

    #[test]
    fn test_edd_ordering() {
        let jobs = vec![Job::new(50, 1, 1), Job::new(10, 1, 1), Job::new(30, 1, 1)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Edd);

        assert_eq!(engine.sort_indices(&jobs, &ctx), vec![1, 2, 0]);
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let jobs = vec![
            Job::new(10, 2, 1),
            Job::new(10, 1, 1), // Same deadline, shorter
        ];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::Edd)
            .with_tie_breaker(rules::Spt);

        // EDD ties → SPT breaks it → job 1 first
        assert_eq!(engine.select_best(&jobs, &ctx), Some(1));
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let jobs = vec![Job::new(4, 2, 2); 4];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Edd);

        let candidates = vec![3, 1, 2, 0];
        assert_eq!(engine.sort_candidates(&jobs, candidates, &ctx), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_by_index_tie_breaker() {
        let jobs = vec![Job::new(4, 2, 2); 3];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::Spt)
            .with_final_tie_breaker(TieBreaker::ByIndex);

        assert_eq!(
            engine.sort_candidates(&jobs, vec![2, 0, 1], &ctx),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_weighted_mode() {
        let jobs = vec![Job::new(50, 1, 1), Job::new(10, 5, 1)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_mode(EvaluationMode::Weighted)
            .with_weighted_rule(rules::Edd, 0.5)
            .with_weighted_rule(rules::Spt, 0.5);

        // Job 0: 0.5*50 + 0.5*1 = 25.5
        // Job 1: 0.5*10 + 0.5*5 = 7.5
        assert_eq!(engine.sort_indices(&jobs, &ctx), vec![1, 0]);
    }

    #[test]
    fn test_select_best_among() {
        let jobs = vec![Job::new(1, 1, 1), Job::new(9, 1, 1), Job::new(5, 1, 1)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Edd);

        // Job 0 is excluded from the candidates
        assert_eq!(engine.select_best_among(&jobs, &[1, 2], &ctx), Some(2));
        assert_eq!(engine.select_best_among(&jobs, &[], &ctx), None);

        // Full tie → first listed candidate
        let same = vec![Job::new(3, 1, 1); 3];
        assert_eq!(engine.select_best_among(&same, &[2, 0, 1], &ctx), Some(2));
    }

    #[test]
    fn test_empty_jobs() {
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Spt);
        assert!(engine.sort_indices(&[], &ctx).is_empty());
        assert!(engine.select_best(&[], &ctx).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let job = Job::new(20, 3, 1);
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::Spt)
            .with_rule(rules::Edd);

        let scores = engine.evaluate(&job, &ctx);
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 3.0).abs() < 1e-10); // SPT score
        assert!((scores[1] - 20.0).abs() < 1e-10); // EDD score
        assert_eq!(engine.rule_names(), vec!["SPT", "EDD"]);
    }
}
