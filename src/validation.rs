//! Input validation for sequencing problems.
//!
//! Checks domain constraints of jobs before solving and structural
//! integrity of externally supplied sequences. Detects:
//! - Weights outside `MIN_WEIGHT..=MAX_WEIGHT`
//! - Non-positive durations
//! - Negative deadlines
//! - Job sets whose worst-case cost overflows `i64`
//! - Sequences that are not permutations of the job indices

use thiserror::Error;

use crate::models::{Job, MAX_WEIGHT, MIN_WEIGHT};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Index of the offending job, when there is one.
    pub job: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Weight outside the accepted range.
    WeightOutOfRange,
    /// Duration is zero or negative.
    NonPositiveDuration,
    /// Deadline is negative.
    NegativeDeadline,
    /// Completion times or the cost would not fit in `i64`.
    CostOverflow,
    /// Sequence length differs from the job count.
    SequenceLength,
    /// Sequence references a job index that does not exist.
    UnknownJob,
    /// Sequence lists the same job twice.
    DuplicateJob,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, job: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            job,
            message: message.into(),
        }
    }

    /// Weight violation for a raw value that may not even fit a `u8`.
    pub fn weight_out_of_range(index: usize, weight: i64) -> Self {
        Self::new(
            ValidationErrorKind::WeightOutOfRange,
            Some(index),
            format!("job {index}: weight must be in {MIN_WEIGHT}..={MAX_WEIGHT}, got {weight}"),
        )
    }
}

/// Checks the domain constraints of a single job.
///
/// Returns every violated constraint; `index` is recorded in each error.
pub fn validate_job(index: usize, job: &Job) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&job.weight) {
        errors.push(ValidationError::weight_out_of_range(
            index,
            i64::from(job.weight),
        ));
    }
    if job.duration <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            Some(index),
            format!("job {index}: duration must be positive, got {}", job.duration),
        ));
    }
    if job.deadline < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeDeadline,
            Some(index),
            format!("job {index}: deadline must be non-negative, got {}", job.deadline),
        ));
    }

    errors
}

/// Validates every job of a job set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors: Vec<ValidationError> = jobs
        .iter()
        .enumerate()
        .flat_map(|(i, job)| validate_job(i, job))
        .collect();
    errors.extend(validate_cost_bounds(jobs).err());

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every completion time and the worst-case cost fit in `i64`.
///
/// The makespan bounds every completion time and every tardiness, so no
/// sequence costs more than `makespan · Σ weights`. Only that bound is
/// checked; a set may be rejected even if its actual optimum is small.
pub fn validate_cost_bounds(jobs: &[Job]) -> Result<(), ValidationError> {
    let makespan = jobs
        .iter()
        .try_fold(0i64, |total, job| total.checked_add(job.duration));
    let total_weight: i64 = jobs.iter().map(Job::weight_factor).sum();

    match makespan.and_then(|m| m.checked_mul(total_weight)) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(
            ValidationErrorKind::CostOverflow,
            None,
            "total duration times total weight exceeds the 64-bit cost range",
        )),
    }
}

/// Checks that `order` is a permutation of `0..n`.
///
/// Stops at the first problem found.
pub fn validate_sequence(order: &[usize], n: usize) -> Result<(), ValidationError> {
    if order.len() != n {
        return Err(ValidationError::new(
            ValidationErrorKind::SequenceLength,
            None,
            format!("sequence has {} entries, expected {n}", order.len()),
        ));
    }

    let mut seen = vec![false; n];
    for &i in order {
        if i >= n {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownJob,
                Some(i),
                format!("sequence references unknown job {i} (n = {n})"),
            ));
        }
        if seen[i] {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateJob,
                Some(i),
                format!("job {i} appears more than once in the sequence"),
            ));
        }
        seen[i] = true;
    }

    Ok(())
}
