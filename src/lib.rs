//! Round-robin fixture scheduling with rest-time fairness.
//!
//! Assigns the pairings of one round robin per group to time slots and
//! fields, prioritizing even rest between matches, then field distribution,
//! then home/away balance.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Pairing`, `Match`, `Schedule`, `Violation`
//! - **`pairing`**: Circle-method pairing generation, per group or across all teams
//! - **`config`**: `SchedulerConfig` and scoring weights
//! - **`scheduler`**: Greedy slot scheduler, rest tracker, scorer, home/away
//!   balancer and fairness report
//! - **`validation`**: Input checks and schedule invariant checks
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_fixture::config::SchedulerConfig;
//! use u_fixture::models::Team;
//! use u_fixture::scheduler::{FairnessReport, GreedyScheduler};
//!
//! let teams: Vec<Team> = ["A", "B", "C", "D"].iter().map(|&id| Team::new(id)).collect();
//! let scheduler = GreedyScheduler::new(SchedulerConfig::default().with_fields(2));
//! let schedule = scheduler.schedule(&teams).unwrap();
//!
//! assert_eq!(schedule.match_count(), 6);
//! assert_eq!(schedule.slot_count(), 3);
//! let report = FairnessReport::calculate(&schedule);
//! assert!(report.max_home_away_imbalance() <= 1);
//! ```
//!
//! # Architecture
//!
//! A pure, synchronous computation library. Each run owns its tracker
//! state, so independent runs may execute in parallel. Storage, display and
//! wall-clock conversion belong to the caller.
//!
//! # References
//!
//! - Kirkman (1847), "On a problem in combinations"
//! - de Werra (1981), "Scheduling in sports"

pub mod config;
pub mod error;
pub mod models;
pub mod pairing;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
