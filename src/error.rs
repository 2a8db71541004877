//! Scheduling errors.

use thiserror::Error;

use crate::models::{Pairing, Schedule};
use crate::validation::ValidationError;

/// Errors returned by a scheduling run.
///
/// Both variants are recoverable at the call site: fix the input, or relax
/// the constraints (more fields, lower minimum rest, larger slot budget)
/// and run again.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The input was rejected before any scheduling was attempted.
    #[error("invalid scheduling input: {}", format_errors(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The slot budget ran out with pairings still unplaced.
    #[error("{} pairing(s) could not be placed within {slot_budget} slots", .unscheduled.len())]
    Infeasible {
        /// Matches placed before the budget ran out.
        partial: Schedule,
        /// Pairings left over, in generation order.
        unscheduled: Vec<Pairing>,
        /// The slot budget that was exhausted.
        slot_budget: usize,
    },
}

impl ScheduleError {
    /// Pairings left unplaced, if this is an infeasibility failure.
    pub fn unscheduled(&self) -> &[Pairing] {
        match self {
            Self::Infeasible { unscheduled, .. } => unscheduled,
            Self::InvalidInput(_) => &[],
        }
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
