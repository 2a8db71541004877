//! Schedule (solution) model.
//!
//! A schedule is the ordered list of matches produced by a scheduling
//! run: each pairing placed in a slot on a field with a home/away
//! orientation. Slots are ordinal; wall-clock times are derived by the
//! caller from a fixed slot duration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Pairing;

/// A pairing placed in a slot on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Generation index of the source pairing.
    pub pairing_index: usize,
    /// Home team ID.
    pub home: String,
    /// Away team ID.
    pub away: String,
    /// Slot index (0-based).
    pub slot: usize,
    /// Field identifier (1-based).
    pub field: u32,
    /// Group label of the pairing.
    pub group: Option<String>,
}

/// Classification of schedule invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A team plays more than one match in a slot.
    TeamDoubleBooked,
    /// A field hosts more than one match in a slot.
    FieldDoubleBooked,
    /// The same two teams meet more than once.
    DuplicatePairing,
    /// A team's consecutive matches are closer than the minimum rest allows.
    RestViolation,
    /// A match is placed on a field outside the configured range.
    UnknownField,
}

/// A schedule invariant violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (team or field).
    pub entity_id: String,
    /// Slot where the violation occurs.
    pub slot: usize,
    /// Human-readable description.
    pub message: String,
}

/// The ordered output of a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Matches, ordered by slot then field.
    pub matches: Vec<Match>,
}

impl Match {
    /// Creates a match from a pairing, with `team_a` at home.
    pub fn from_pairing(pairing: &Pairing, slot: usize, field: u32) -> Self {
        Self {
            pairing_index: pairing.index,
            home: pairing.team_a.clone(),
            away: pairing.team_b.clone(),
            slot,
            field,
            group: pairing.group.clone(),
        }
    }

    /// Swaps home and away. Slot and field are untouched.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.home, &mut self.away);
    }

    /// Whether the given team plays in this match.
    #[inline]
    pub fn involves(&self, team_id: &str) -> bool {
        self.home == team_id || self.away == team_id
    }

    /// Canonical (sorted) team key, independent of orientation.
    pub fn key(&self) -> (&str, &str) {
        if self.home <= self.away {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        }
    }

    /// Offset of this match's slot from the first slot, in minutes.
    pub fn start_offset_minutes(&self, slot_duration_minutes: u32) -> u64 {
        self.slot as u64 * u64::from(slot_duration_minutes)
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        slot: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            slot,
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates a schedule from matches, sorting them by slot then field.
    pub fn from_matches(mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(|m| (m.slot, m.field));
        Self { matches }
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Whether the schedule has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of slots spanned: last used slot + 1.
    pub fn slot_count(&self) -> usize {
        self.matches.iter().map(|m| m.slot + 1).max().unwrap_or(0)
    }

    /// All matches in a given slot.
    pub fn matches_in_slot(&self, slot: usize) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.slot == slot).collect()
    }

    /// All matches for a given team.
    pub fn matches_for_team(&self, team_id: &str) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(team_id)).collect()
    }

    /// Slots a team plays in, ascending.
    pub fn team_slots(&self, team_id: &str) -> Vec<usize> {
        let mut slots: Vec<usize> = self
            .matches
            .iter()
            .filter(|m| m.involves(team_id))
            .map(|m| m.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// (home, away) match counts for a team.
    pub fn home_away_counts(&self, team_id: &str) -> (usize, usize) {
        self.matches.iter().fold((0, 0), |(h, a), m| {
            if m.home == team_id {
                (h + 1, a)
            } else if m.away == team_id {
                (h, a + 1)
            } else {
                (h, a)
            }
        })
    }

    /// All team IDs appearing in the schedule, sorted.
    pub fn team_ids(&self) -> BTreeSet<&str> {
        self.matches
            .iter()
            .flat_map(|m| [m.home.as_str(), m.away.as_str()])
            .collect()
    }
}
