//! Sequencing domain models.
//!
//! Provides the core data types for single-resource sequencing problems
//! and their solutions.
//!
//! # Domain Mappings
//!
//! | u-sequencing | Irrigation | Manufacturing | Computing |
//! |--------------|------------|---------------|-----------|
//! | Job | Field plot | Order | Batch task |
//! | Deadline | Survival time | Due date | SLA |
//! | Resource | Irrigation line | Bottleneck machine | Single worker |
//! | Sequence | Watering order | Dispatch list | Run queue |

mod job;
mod sequence;

pub use job::{Job, JobSet, MAX_WEIGHT, MIN_WEIGHT};
pub use sequence::{Sequence, Solution};
