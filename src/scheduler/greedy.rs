//! Greedy slot/field scheduler.
//!
//! # Algorithm
//!
//! For each slot `0, 1, 2, ...` and each field in order:
//! 1. Score every unplaced pairing for this (slot, field); drop illegal ones.
//! 2. If nothing is legal, leave the field empty.
//! 3. Otherwise pick the best candidate by:
//!    a. longest wait since the last match among its two teams, descending
//!       (a team that has not played yet waits forever);
//!    b. fairness score, ascending;
//!    c. pairing generation index, ascending.
//! 4. Commit it and update the tracker.
//!
//! The run ends when every pairing is placed, or fails once the slot
//! budget is exhausted. A successful run is then passed through the
//! [`HomeAwayBalancer`] unless disabled.
//!
//! # Complexity
//! O(S * F * P * T) where S=slots, F=fields, P=pairings, T=teams
//! (the rest-spread term visits every team).

use std::cmp::Ordering;

use log::{debug, info, trace, warn};

use super::{FairnessScorer, HomeAwayBalancer, Score, TeamTracker};
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::models::{Match, Pairing, Schedule, Team};
use crate::pairing::generate_pairings;
use crate::validation::{
    validate_input, validate_pairings, ValidationError, ValidationErrorKind,
};

/// Scores within this distance are treated as tied.
const SCORE_EPSILON: f64 = 1e-9;

/// A committed placement, reported to a [`ScheduleObserver`].
#[derive(Debug, Clone, Copy)]
pub struct CommitEvent<'a> {
    /// Slot of the placement.
    pub slot: usize,
    /// Field of the placement.
    pub field: u32,
    /// The pairing placed. `team_a` is home until balancing.
    pub pairing: &'a Pairing,
    /// Fairness score the placement was chosen with.
    pub score: f64,
    /// Rest `team_a` gets before this match; `None` for its first match.
    pub rest_a: Option<usize>,
    /// Rest `team_b` gets before this match; `None` for its first match.
    pub rest_b: Option<usize>,
}

/// Hook invoked once per committed match.
///
/// Scheduling output does not depend on whether an observer is attached.
/// Closures taking `&CommitEvent` implement this trait.
pub trait ScheduleObserver {
    /// Called after a match is committed.
    fn on_commit(&mut self, event: &CommitEvent<'_>);
}

impl<F> ScheduleObserver for F
where
    F: FnMut(&CommitEvent<'_>),
{
    fn on_commit(&mut self, event: &CommitEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {
    fn on_commit(&mut self, _event: &CommitEvent<'_>) {}
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Position in the remaining list.
    position: usize,
    /// Longest wait of the two teams; `usize::MAX` if either has not played.
    wait: usize,
    score: Score,
    index: usize,
}

impl Candidate {
    fn priority_cmp(&self, other: &Candidate) -> Ordering {
        other
            .wait
            .cmp(&self.wait)
            .then_with(|| self.score.compare(&other.score, SCORE_EPSILON))
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Greedy round-robin scheduler with rest-time fairness.
///
/// # Example
///
/// ```
/// use u_fixture::config::SchedulerConfig;
/// use u_fixture::models::Team;
/// use u_fixture::scheduler::GreedyScheduler;
///
/// let teams: Vec<Team> = ["A", "B", "C", "D"].into_iter().map(Team::new).collect();
/// let scheduler = GreedyScheduler::new(SchedulerConfig::new().with_fields(2));
///
/// let schedule = scheduler.schedule(&teams).unwrap();
/// assert_eq!(schedule.match_count(), 6);
/// assert_eq!(schedule.slot_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    config: SchedulerConfig,
}

impl GreedyScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Generates round-robin pairings for `teams` and schedules them.
    pub fn schedule(&self, teams: &[Team]) -> Result<Schedule, ScheduleError> {
        self.schedule_with_observer(teams, &mut NoopObserver)
    }

    /// Like [`schedule`](Self::schedule), reporting each commit to `observer`.
    pub fn schedule_with_observer(
        &self,
        teams: &[Team],
        observer: &mut dyn ScheduleObserver,
    ) -> Result<Schedule, ScheduleError> {
        validate_input(teams, &self.config).map_err(ScheduleError::InvalidInput)?;
        let pairings = generate_pairings(teams, self.config.pairing_mode);
        self.place(teams, &pairings, observer)
    }

    /// Schedules a caller-supplied pairing list.
    ///
    /// Pairing indices are used as the final tie-break, so they should
    /// reflect the intended generation order.
    pub fn schedule_pairings(
        &self,
        teams: &[Team],
        pairings: &[Pairing],
        observer: &mut dyn ScheduleObserver,
    ) -> Result<Schedule, ScheduleError> {
        let mut errors = Vec::new();
        if let Err(e) = validate_input(teams, &self.config) {
            errors.extend(e);
        }
        if let Err(e) = validate_pairings(pairings, teams) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(ScheduleError::InvalidInput(errors));
        }
        self.place(teams, pairings, observer)
    }

    fn place(
        &self,
        teams: &[Team],
        pairings: &[Pairing],
        observer: &mut dyn ScheduleObserver,
    ) -> Result<Schedule, ScheduleError> {
        let config = &self.config;
        let mut tracker =
            TeamTracker::new(teams.iter().map(|t| t.id.as_str()), config.min_rest_slots);
        let scorer = FairnessScorer::new(config.weights, config.fields);

        let resolved: Option<Vec<(usize, usize)>> = pairings
            .iter()
            .map(|p| Some((tracker.index_of(&p.team_a)?, tracker.index_of(&p.team_b)?)))
            .collect();
        let Some(resolved) = resolved else {
            return Err(ScheduleError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::UnknownTeam,
                "Pairing references an unknown team",
            )]));
        };

        let budget = config.slot_budget(pairings.len());
        let mut remaining: Vec<usize> = (0..resolved.len()).collect();
        let mut matches = Vec::with_capacity(pairings.len());

        debug!(
            "scheduling {} pairings for {} teams on {} field(s), min rest {}, budget {budget} slots",
            pairings.len(),
            tracker.len(),
            config.fields,
            config.min_rest_slots
        );

        'slots: for slot in 0..budget {
            for field in config.field_ids() {
                if remaining.is_empty() {
                    break 'slots;
                }

                let best =
                    self.select(&scorer, &tracker, pairings, &resolved, &remaining, slot, field);
                let Some(best) = best else {
                    trace!("slot {slot} field {field}: no legal pairing");
                    continue;
                };

                let p = remaining.remove(best.position);
                let (a, b) = resolved[p];
                let pairing = &pairings[p];
                debug_assert!(tracker.can_play(a, slot) && tracker.can_play(b, slot));

                let event = CommitEvent {
                    slot,
                    field,
                    pairing,
                    score: best.score.value(),
                    rest_a: tracker.projected_rest_if_scheduled(a, slot),
                    rest_b: tracker.projected_rest_if_scheduled(b, slot),
                };
                tracker.record_match(a, slot, field, true);
                tracker.record_match(b, slot, field, false);
                matches.push(Match::from_pairing(pairing, slot, field));

                debug!(
                    "slot {slot} field {field}: {} vs {} (score {:.3})",
                    pairing.team_a, pairing.team_b, event.score
                );
                observer.on_commit(&event);
            }
        }

        if !remaining.is_empty() {
            let unscheduled: Vec<Pairing> =
                remaining.iter().map(|&p| pairings[p].clone()).collect();
            warn!(
                "{} of {} pairings unplaced after {budget} slots",
                unscheduled.len(),
                pairings.len()
            );
            return Err(ScheduleError::Infeasible {
                partial: Schedule::from_matches(matches),
                unscheduled,
                slot_budget: budget,
            });
        }

        let mut schedule = Schedule::from_matches(matches);
        if config.balance_home_away {
            HomeAwayBalancer::new()
                .with_repair(config.repair_home_away)
                .balance(&mut schedule);
        }
        debug_assert!(
            crate::validation::validate_schedule(&schedule, config.fields, config.min_rest_slots)
                .is_ok(),
            "scheduler produced an unsound schedule"
        );

        info!(
            "scheduled {} matches in {} slots",
            schedule.match_count(),
            schedule.slot_count()
        );
        Ok(schedule)
    }

    /// Best legal candidate for (slot, field), if any.
    #[allow(clippy::too_many_arguments)]
    fn select(
        &self,
        scorer: &FairnessScorer,
        tracker: &TeamTracker,
        pairings: &[Pairing],
        resolved: &[(usize, usize)],
        remaining: &[usize],
        slot: usize,
        field: u32,
    ) -> Option<Candidate> {
        remaining
            .iter()
            .enumerate()
            .filter_map(|(position, &p)| {
                let (a, b) = resolved[p];
                let score = scorer.score(tracker, a, b, slot, field);
                if !score.is_legal() {
                    return None;
                }
                let wait_a = tracker.state(a).idle_slots(slot).unwrap_or(usize::MAX);
                let wait_b = tracker.state(b).idle_slots(slot).unwrap_or(usize::MAX);
                Some(Candidate {
                    position,
                    wait: wait_a.max(wait_b),
                    score,
                    index: pairings[p].index,
                })
            })
            .min_by(|x, y| x.priority_cmp(y))
    }
}
