//! Cost model, KPI evaluation and list scheduling.
//!
//! # Cost Model
//!
//! [`evaluate`] is the single source of truth for the objective: every
//! solver reports the cost of its sequence through it.
//!
//! # KPI
//!
//! `SequenceKpi` computes standard sequencing metrics: makespan, tardiness,
//! weighted tardiness, on-time rate and flow time.
//!
//! # Algorithm
//!
//! `DispatchScheduler` builds a sequence greedily, re-evaluating a rule
//! engine at every step. It is not optimal, but provides fast baselines.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod cost;
mod dispatch;
mod kpi;

pub(crate) use cost::weighted_tardiness;
pub use cost::{completion_profile, evaluate, tardiness_cost, try_evaluate, CompletionProfile};
pub use dispatch::DispatchScheduler;
pub use kpi::SequenceKpi;
