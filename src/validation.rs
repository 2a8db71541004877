//! Input and output validation for tournament scheduling.
//!
//! [`validate_input`] rejects configurations the scheduler cannot run on:
//! - Fewer than two teams
//! - Zero fields or a zero slot budget
//! - Duplicate or empty team IDs
//!
//! [`validate_pairings`] rejects caller-supplied pairing lists that name
//! unknown teams, pair a team with itself, or repeat a pairing.
//!
//! [`validate_schedule`] checks the invariants every produced schedule
//! must hold:
//! - No team plays twice in one slot
//! - No field hosts two matches in one slot
//! - No pairing is played twice
//! - Consecutive matches of a team respect the minimum rest

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::SchedulerConfig;
use crate::models::{Pairing, Schedule, Team, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Fewer than two teams were given.
    TooFewTeams,
    /// No fields are configured.
    NoFields,
    /// The slot budget is zero.
    NoSlots,
    /// Two teams share the same ID.
    DuplicateId,
    /// A team has an empty ID.
    EmptyId,
    /// A pairing references a team that was not given.
    UnknownTeam,
    /// A pairing has the same team on both sides.
    SelfPairing,
    /// The same two teams are paired more than once.
    DuplicatePairing,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates teams and configuration before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(teams: &[Team], config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if teams.len() < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewTeams,
            format!("At least 2 teams are required, got {}", teams.len()),
        ));
    }

    if config.fields == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoFields,
            "At least 1 field is required",
        ));
    }

    if config.max_slots == Some(0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoSlots,
            "Slot budget must be at least 1",
        ));
    }

    let mut ids = HashSet::new();
    for team in teams {
        if team.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Team with empty ID",
            ));
        } else if !ids.insert(team.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", team.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a pairing list against the teams it will be scheduled for.
pub fn validate_pairings(pairings: &[Pairing], teams: &[Team]) -> ValidationResult {
    let mut errors = Vec::new();
    let team_ids: HashSet<&str> = teams.iter().map(|t| t.id.as_str()).collect();
    let mut seen = HashSet::new();

    for p in pairings {
        for id in [&p.team_a, &p.team_b] {
            if !team_ids.contains(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeam,
                    format!("Pairing {} references unknown team '{id}'", p.index),
                ));
            }
        }
        if p.team_a == p.team_b {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPairing,
                format!("Pairing {} pairs '{}' with itself", p.index, p.team_a),
            ));
        } else if !seen.insert(p.key()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePairing,
                format!("'{}' and '{}' are paired more than once", p.team_a, p.team_b),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a schedule against the structural invariants.
///
/// `fields` bounds the valid field IDs (`1..=fields`); `min_rest_slots`
/// is the number of idle slots required between two matches of a team.
///
/// # Returns
/// `Ok(())` if the schedule is sound, `Err(violations)` otherwise.
pub fn validate_schedule(
    schedule: &Schedule,
    fields: u32,
    min_rest_slots: u32,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let mut team_slots: HashMap<(&str, usize), usize> = HashMap::new();
    let mut field_slots: HashMap<(u32, usize), usize> = HashMap::new();
    let mut pairings: HashSet<(&str, &str)> = HashSet::new();

    for m in &schedule.matches {
        if m.field == 0 || m.field > fields {
            violations.push(Violation::new(
                ViolationType::UnknownField,
                m.field.to_string(),
                m.slot,
                format!("Field {} is outside 1..={fields}", m.field),
            ));
        }

        for team in [m.home.as_str(), m.away.as_str()] {
            let count = team_slots.entry((team, m.slot)).or_insert(0);
            *count += 1;
            if *count == 2 {
                violations.push(Violation::new(
                    ViolationType::TeamDoubleBooked,
                    team,
                    m.slot,
                    format!("Team '{team}' plays twice in slot {}", m.slot),
                ));
            }
        }

        let count = field_slots.entry((m.field, m.slot)).or_insert(0);
        *count += 1;
        if *count == 2 {
            violations.push(Violation::new(
                ViolationType::FieldDoubleBooked,
                m.field.to_string(),
                m.slot,
                format!("Field {} hosts two matches in slot {}", m.field, m.slot),
            ));
        }

        let key = m.key();
        if !pairings.insert(key) {
            violations.push(Violation::new(
                ViolationType::DuplicatePairing,
                format!("{}-{}", key.0, key.1),
                m.slot,
                format!("'{}' and '{}' meet more than once", key.0, key.1),
            ));
        }
    }

    // Rest: consecutive distinct slots per team.
    let mut by_team: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &(team, slot) in team_slots.keys() {
        by_team.entry(team).or_default().push(slot);
    }
    for (team, mut slots) in by_team {
        slots.sort_unstable();
        for w in slots.windows(2) {
            let gap = w[1] - w[0];
            if gap <= min_rest_slots as usize {
                violations.push(Violation::new(
                    ViolationType::RestViolation,
                    team,
                    w[1],
                    format!(
                        "Team '{team}' plays in slots {} and {} (needs {min_rest_slots} idle slots)",
                        w[0], w[1]
                    ),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
