//! Greedy slot scheduling, home/away balancing and fairness reporting.
//!
//! # Algorithm
//!
//! `GreedyScheduler` walks slots × fields and commits, per field, the legal
//! pairing whose teams have waited longest, breaking ties by
//! `FairnessScorer` score and then generation order. Per-run state lives in
//! a `TeamTracker` owned by the run. `HomeAwayBalancer` then flips match
//! orientation without moving any match.
//!
//! # Fairness
//!
//! `FairnessReport` computes per-team rest, field and home/away figures and
//! the global rest spread of a finished schedule.
//!
//! # References
//!
//! - de Werra (1981), "Scheduling in sports"
//! - Rasmussen & Trick (2008), "Round robin scheduling – a survey"

mod balance;
mod fairness;
mod greedy;
mod scoring;
mod tracker;

pub use balance::{BalanceSummary, HomeAwayBalancer};
pub use fairness::{FairnessReport, TeamFairness};
pub use greedy::{CommitEvent, GreedyScheduler, NoopObserver, ScheduleObserver};
pub(crate) use scoring::{FairnessScorer, Score};
pub use tracker::{TeamState, TeamTracker};
