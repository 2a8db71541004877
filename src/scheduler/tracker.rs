//! Per-team rest and usage state for a scheduling run.
//!
//! A [`TeamTracker`] is a derived index over the matches committed so
//! far: it is built empty, updated once per team per committed match,
//! and dropped when the run ends. One tracker belongs to exactly one run.

use std::collections::{BTreeMap, HashMap};

use crate::models::Schedule;

/// Scheduling state of a single team.
///
/// Invariant: `slots.len()` equals the number of committed matches
/// involving this team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamState {
    slots: Vec<usize>,
    home_count: usize,
    away_count: usize,
    field_usage: BTreeMap<u32, usize>,
}

impl TeamState {
    /// Whether the team may play in `slot`.
    ///
    /// False if the team already plays in `slot`, or if any of its slots
    /// lies within `min_rest_slots` of it on either side.
    pub fn can_play(&self, slot: usize, min_rest_slots: u32) -> bool {
        let min_gap = min_rest_slots as usize;
        self.slots.iter().all(|&s| s.abs_diff(slot) > min_gap)
    }

    /// Rest before a match in `slot`, if it were scheduled now.
    ///
    /// `None` when the team has no earlier match (unbounded rest).
    pub fn projected_rest_if_scheduled(&self, slot: usize) -> Option<usize> {
        self.slots
            .iter()
            .filter(|&&s| s < slot)
            .max()
            .map(|&prev| slot - prev)
    }

    /// Slots waited since the team's last match, seen from `slot`.
    ///
    /// `None` when the team has not played yet.
    pub fn idle_slots(&self, slot: usize) -> Option<usize> {
        self.last_slot().map(|last| slot.saturating_sub(last))
    }

    /// Average rest if the team were also scheduled in `slot`.
    pub fn projected_avg_rest(&self, slot: usize) -> Option<f64> {
        let first = self.first_slot().map_or(slot, |s| s.min(slot));
        let last = self.last_slot().map_or(slot, |s| s.max(slot));
        Self::avg_span(first, last, self.slots.len() + 1)
    }

    /// Records a committed match. The only mutator.
    pub fn record_match(&mut self, slot: usize, field: u32, was_home: bool) {
        let pos = self.slots.partition_point(|&s| s < slot);
        self.slots.insert(pos, slot);
        if was_home {
            self.home_count += 1;
        } else {
            self.away_count += 1;
        }
        *self.field_usage.entry(field).or_insert(0) += 1;
    }

    /// Slots played, ascending.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Number of matches played.
    pub fn match_count(&self) -> usize {
        self.slots.len()
    }

    /// First slot played.
    pub fn first_slot(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    /// Most recent slot played.
    pub fn last_slot(&self) -> Option<usize> {
        self.slots.last().copied()
    }

    /// Rests between consecutive matches, in slots.
    pub fn rests(&self) -> Vec<usize> {
        self.slots.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Average rest. `None` with fewer than two matches.
    ///
    /// Consecutive gaps telescope, so this is `(last - first) / (n - 1)`.
    pub fn avg_rest(&self) -> Option<f64> {
        match (self.first_slot(), self.last_slot()) {
            (Some(first), Some(last)) => Self::avg_span(first, last, self.slots.len()),
            _ => None,
        }
    }

    /// Shortest rest. `None` with fewer than two matches.
    pub fn min_rest(&self) -> Option<usize> {
        self.rests().into_iter().min()
    }

    /// Longest rest. `None` with fewer than two matches.
    pub fn max_rest(&self) -> Option<usize> {
        self.rests().into_iter().max()
    }

    /// Population variance of rests. Zero with fewer than two rests.
    pub fn rest_variance(&self) -> f64 {
        let rests = self.rests();
        if rests.len() < 2 {
            return 0.0;
        }
        let n = rests.len() as f64;
        let mean = rests.iter().sum::<usize>() as f64 / n;
        rests
            .iter()
            .map(|&r| (r as f64 - mean).powi(2))
            .sum::<f64>()
            / n
    }

    /// Home matches played.
    pub fn home_count(&self) -> usize {
        self.home_count
    }

    /// Away matches played.
    pub fn away_count(&self) -> usize {
        self.away_count
    }

    /// `home - away`. Positive means more home matches.
    pub fn home_away_diff(&self) -> i64 {
        self.home_count as i64 - self.away_count as i64
    }

    /// Matches played on `field`.
    pub fn field_count(&self, field: u32) -> usize {
        self.field_usage.get(&field).copied().unwrap_or(0)
    }

    /// Matches per field (only fields used at least once).
    pub fn field_usage(&self) -> &BTreeMap<u32, usize> {
        &self.field_usage
    }

    fn avg_span(first: usize, last: usize, matches: usize) -> Option<f64> {
        if matches < 2 {
            None
        } else {
            Some((last - first) as f64 / (matches - 1) as f64)
        }
    }
}

/// Per-run state for every team, indexed densely.
#[derive(Debug, Clone)]
pub struct TeamTracker {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    states: Vec<TeamState>,
    min_rest_slots: u32,
}

impl TeamTracker {
    /// Creates a tracker with empty state for each team.
    ///
    /// Duplicate IDs share one entry.
    pub fn new<'a>(team_ids: impl IntoIterator<Item = &'a str>, min_rest_slots: u32) -> Self {
        let mut tracker = Self {
            ids: Vec::new(),
            index: HashMap::new(),
            states: Vec::new(),
            min_rest_slots,
        };
        for id in team_ids {
            tracker.ensure_team(id);
        }
        tracker
    }

    /// Rebuilds tracker state by replaying a schedule.
    ///
    /// Teams are registered in sorted ID order.
    pub fn from_schedule(schedule: &Schedule, min_rest_slots: u32) -> Self {
        let mut tracker = Self::new(schedule.team_ids(), min_rest_slots);
        for m in &schedule.matches {
            let home = tracker.ensure_team(&m.home);
            let away = tracker.ensure_team(&m.away);
            tracker.record_match(home, m.slot, m.field, true);
            tracker.record_match(away, m.slot, m.field, false);
        }
        tracker
    }

    fn ensure_team(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.states.push(TeamState::default());
        idx
    }

    /// Dense index of a team.
    pub fn index_of(&self, team_id: &str) -> Option<usize> {
        self.index.get(team_id).copied()
    }

    /// State of the team at a dense index.
    pub(crate) fn state(&self, idx: usize) -> &TeamState {
        &self.states[idx]
    }

    /// State of a team by ID.
    pub fn state_of(&self, team_id: &str) -> Option<&TeamState> {
        self.index_of(team_id).map(|idx| &self.states[idx])
    }

    /// Number of teams tracked.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no teams are tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether the team at `idx` may play in `slot`.
    pub(crate) fn can_play(&self, idx: usize, slot: usize) -> bool {
        self.states[idx].can_play(slot, self.min_rest_slots)
    }

    /// See [`TeamState::projected_rest_if_scheduled`].
    pub(crate) fn projected_rest_if_scheduled(&self, idx: usize, slot: usize) -> Option<usize> {
        self.states[idx].projected_rest_if_scheduled(slot)
    }

    /// Records a committed match for one team.
    pub(crate) fn record_match(&mut self, idx: usize, slot: usize, field: u32, was_home: bool) {
        self.states[idx].record_match(slot, field, was_home);
    }

    /// `(team_id, state)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamState)> {
        self.ids.iter().map(String::as_str).zip(self.states.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, Pairing};

    fn state_with(slots: &[usize]) -> TeamState {
        let mut s = TeamState::default();
        for &slot in slots {
            s.record_match(slot, 1, true);
        }
        s
    }

    #[test]
    fn test_can_play_same_slot() {
        let s = state_with(&[3]);
        assert!(!s.can_play(3, 0));
        assert!(s.can_play(2, 0));
        assert!(s.can_play(4, 0));
    }

    #[test]
    fn test_can_play_min_rest() {
        let s = state_with(&[5]);
        // One idle slot required: 4 and 6 are adjacent.
        assert!(!s.can_play(4, 1));
        assert!(!s.can_play(6, 1));
        assert!(s.can_play(3, 1));
        assert!(s.can_play(7, 1));
        // Two idle slots required.
        assert!(!s.can_play(7, 2));
        assert!(s.can_play(8, 2));
        assert!(s.can_play(2, 2));
    }

    #[test]
    fn test_fresh_team_can_always_play() {
        let s = TeamState::default();
        assert!(s.can_play(0, 10));
        assert_eq!(s.idle_slots(7), None);
        assert_eq!(s.projected_rest_if_scheduled(7), None);
        assert_eq!(s.avg_rest(), None);
        assert_eq!(s.projected_avg_rest(7), None);
    }

    #[test]
    fn test_rest_stats() {
        let s = state_with(&[0, 2, 7]);
        assert_eq!(s.rests(), vec![2, 5]);
        assert_eq!(s.min_rest(), Some(2));
        assert_eq!(s.max_rest(), Some(5));
        assert!((s.avg_rest().unwrap() - 3.5).abs() < 1e-10);
        // mean 3.5, deviations ±1.5
        assert!((s.rest_variance() - 2.25).abs() < 1e-10);
        assert_eq!(s.idle_slots(9), Some(2));
    }

    #[test]
    fn test_projections() {
        let s = state_with(&[0, 2]);
        assert_eq!(s.projected_rest_if_scheduled(6), Some(4));
        // rests would be [2, 4]
        assert!((s.projected_avg_rest(6).unwrap() - 3.0).abs() < 1e-10);
        // projection does not mutate
        assert_eq!(s.match_count(), 2);

        let single = state_with(&[4]);
        assert!((single.projected_avg_rest(1).unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_record_keeps_slots_sorted() {
        let s = state_with(&[6, 1, 3]);
        assert_eq!(s.slots(), &[1, 3, 6]);
        assert_eq!(s.first_slot(), Some(1));
        assert_eq!(s.last_slot(), Some(6));
    }

    #[test]
    fn test_home_away_and_fields() {
        let mut s = TeamState::default();
        s.record_match(0, 1, true);
        s.record_match(2, 2, true);
        s.record_match(4, 2, false);
        assert_eq!(s.home_count(), 2);
        assert_eq!(s.away_count(), 1);
        assert_eq!(s.home_away_diff(), 1);
        assert_eq!(s.field_count(1), 1);
        assert_eq!(s.field_count(2), 2);
        assert_eq!(s.field_count(3), 0);
        assert_eq!(s.match_count(), 3);
    }

    #[test]
    fn test_tracker_indexing() {
        let mut t = TeamTracker::new(["A", "B", "C", "A"], 1);
        assert_eq!(t.len(), 3);
        assert_eq!(t.index_of("B"), Some(1));
        assert_eq!(t.index_of("Z"), None);
        assert_eq!(t.index_of("C"), Some(2));

        t.record_match(0, 0, 1, true);
        assert!(!t.can_play(0, 1));
        assert!(t.can_play(0, 2));
        assert!(t.can_play(1, 1));
        assert_eq!(t.projected_rest_if_scheduled(0, 2), Some(2));
        assert_eq!(t.state_of("A").unwrap().match_count(), 1);
        assert!(t.state_of("Z").is_none());
    }

    #[test]
    fn test_from_schedule() {
        let s = Schedule::from_matches(vec![
            Match::from_pairing(&Pairing::new(0, "B", "A"), 0, 1),
            Match::from_pairing(&Pairing::new(1, "A", "C"), 3, 2),
        ]);
        let t = TeamTracker::from_schedule(&s, 0);
        let a = t.state_of("A").unwrap();
        assert_eq!(a.slots(), &[0, 3]);
        assert_eq!(a.home_count(), 1);
        assert_eq!(a.away_count(), 1);
        assert_eq!(t.index_of("A"), Some(0));
        assert_eq!(t.iter().count(), 3);
    }
}
