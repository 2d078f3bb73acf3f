//! Sequence (solution) model.
//!
//! A sequence is the processing order of a job set on the single resource:
//! a permutation of job indices. A [`Solution`] pairs a sequence with the
//! cost the solver reported for it.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::validation::validate_sequence;
use crate::Cost;

/// Processing order of jobs, as job indices.
///
/// Valid when it is a bijection over `0..n` for a job set of size `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<usize>);

impl Sequence {
    /// Creates a sequence from job indices in processing order.
    pub fn new(order: Vec<usize>) -> Self {
        Self(order)
    }

    /// Identity order `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Whether every index in `0..n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        validate_sequence(&self.0, n).is_ok()
    }

    /// Position of job `index` in the order.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.0.iter().position(|&i| i == index)
    }

    /// Consumes the sequence and returns the indices.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Sequence {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}

/// A sequence together with its total weighted tardiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Processing order.
    pub sequence: Sequence,
    /// Total weighted tardiness of `sequence`.
    pub cost: Cost,
}

impl Solution {
    /// Creates a solution.
    pub fn new(sequence: impl Into<Sequence>, cost: Cost) -> Self {
        Self {
            sequence: sequence.into(),
            cost,
        }
    }

    /// Number of jobs sequenced.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the solution sequences no jobs.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
