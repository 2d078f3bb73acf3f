//! Random instance generation.
//!
//! Draws job sets with independent uniform deadlines, durations and
//! weights. With a seeded RNG the output is reproducible, which is what
//! the solver cross-checks and the `generate` command rely on.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::{Job, JobSet, MAX_WEIGHT, MIN_WEIGHT};

/// Uniform job-set generator.
///
/// Defaults: deadline in `5..=20`, duration in `1..=5`, weight in `1..=4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceGenerator {
    deadline: RangeInclusive<i64>,
    duration: RangeInclusive<i64>,
    weight: RangeInclusive<u8>,
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self {
            deadline: 5..=20,
            duration: 1..=5,
            weight: MIN_WEIGHT..=MAX_WEIGHT,
        }
    }
}

impl InstanceGenerator {
    /// Creates a generator with the default ranges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deadline range.
    pub fn with_deadline_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.deadline = range;
        self
    }

    /// Sets the duration range.
    pub fn with_duration_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.duration = range;
        self
    }

    /// Sets the weight range.
    pub fn with_weight_range(mut self, range: RangeInclusive<u8>) -> Self {
        self.weight = range;
        self
    }

    /// Draws one job.
    ///
    /// # Panics
    /// If any configured range is empty.
    pub fn job<R: Rng>(&self, rng: &mut R) -> Job {
        Job::new(
            rng.random_range(self.deadline.clone()),
            rng.random_range(self.duration.clone()),
            rng.random_range(self.weight.clone()),
        )
    }

    /// Draws a job set of `n` jobs.
    pub fn generate<R: Rng>(&self, n: usize, rng: &mut R) -> JobSet {
        (0..n).map(|_| self.job(rng)).collect()
    }
}

/// Draws `n` jobs with the default ranges.
pub fn random_job_set<R: Rng>(n: usize, rng: &mut R) -> JobSet {
    InstanceGenerator::default().generate(n, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_jobs;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_ranges() {
        let mut rng = SmallRng::seed_from_u64(42);
        let jobs = random_job_set(200, &mut rng);
        assert_eq!(jobs.len(), 200);
        for job in jobs.iter() {
            assert!((5..=20).contains(&job.deadline));
            assert!((1..=5).contains(&job.duration));
            assert!((1..=4).contains(&job.weight));
        }
        assert!(validate_jobs(&jobs).is_ok());
    }

    #[test]
    fn test_seed_reproducible() {
        let a = random_job_set(10, &mut SmallRng::seed_from_u64(3));
        let b = random_job_set(10, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_ranges() {
        let generator = InstanceGenerator::new()
            .with_deadline_range(0..=0)
            .with_duration_range(7..=7)
            .with_weight_range(2..=2);
        let mut rng = SmallRng::seed_from_u64(1);
        let jobs = generator.generate(3, &mut rng);
        assert!(jobs.iter().all(|j| *j == Job::new(0, 7, 2)));
    }

    #[test]
    fn test_zero_jobs() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(random_job_set(0, &mut rng).is_empty());
    }
}
