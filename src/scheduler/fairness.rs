//! Fairness metrics of a finished schedule.
//!
//! Read-only: the report is rebuilt from the match list alone and never
//! touches scheduling state.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rest | Slot gap between consecutive matches of a team |
//! | Avg rest | `(last - first) / (matches - 1)` per team |
//! | Rest spread | max − min avg rest across teams with at least one rest |
//! | Field distribution | Matches per field, per team |
//! | Home/away balance | `home - away` per team |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TeamTracker;
use crate::models::Schedule;

/// Fairness figures of a single team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFairness {
    /// Slots played, ascending.
    pub match_slots: Vec<usize>,
    /// Rests between consecutive matches, in slots.
    pub rests: Vec<usize>,
    /// Shortest rest.
    pub min_rest: Option<usize>,
    /// Longest rest.
    pub max_rest: Option<usize>,
    /// Average rest.
    pub avg_rest: Option<f64>,
    /// Population variance of rests.
    pub rest_variance: f64,
    /// Matches per field.
    pub field_distribution: BTreeMap<u32, usize>,
    /// Home matches.
    pub home_count: usize,
    /// Away matches.
    pub away_count: usize,
    /// `home - away`.
    pub home_away_balance: i64,
}

impl TeamFairness {
    /// Average rest in minutes for a given slot duration.
    pub fn avg_rest_minutes(&self, slot_duration_minutes: u32) -> Option<f64> {
        self.avg_rest.map(|r| r * f64::from(slot_duration_minutes))
    }

    /// Rests in minutes for a given slot duration.
    pub fn rests_minutes(&self, slot_duration_minutes: u32) -> Vec<u64> {
        self.rests
            .iter()
            .map(|&r| r as u64 * u64::from(slot_duration_minutes))
            .collect()
    }
}

/// Per-team and global fairness of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    /// Per-team figures keyed by team ID.
    pub teams: BTreeMap<String, TeamFairness>,
    /// Largest average rest across teams.
    pub max_avg_rest: Option<f64>,
    /// Smallest average rest across teams.
    pub min_avg_rest: Option<f64>,
    /// `max_avg_rest - min_avg_rest`; zero when no team has a rest.
    pub rest_spread: f64,
    /// Slots spanned by the schedule.
    pub slot_count: usize,
    /// Matches in the schedule.
    pub match_count: usize,
}

impl FairnessReport {
    /// Computes the report for a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let tracker = TeamTracker::from_schedule(schedule, 0);

        let teams: BTreeMap<String, TeamFairness> = tracker
            .iter()
            .map(|(id, state)| {
                let fairness = TeamFairness {
                    match_slots: state.slots().to_vec(),
                    rests: state.rests(),
                    min_rest: state.min_rest(),
                    max_rest: state.max_rest(),
                    avg_rest: state.avg_rest(),
                    rest_variance: state.rest_variance(),
                    field_distribution: state.field_usage().clone(),
                    home_count: state.home_count(),
                    away_count: state.away_count(),
                    home_away_balance: state.home_away_diff(),
                };
                (id.to_string(), fairness)
            })
            .collect();

        let averages: Vec<f64> = teams.values().filter_map(|t| t.avg_rest).collect();
        let max_avg_rest = averages.iter().copied().reduce(f64::max);
        let min_avg_rest = averages.iter().copied().reduce(f64::min);
        let rest_spread = match (max_avg_rest, min_avg_rest) {
            (Some(max), Some(min)) => max - min,
            _ => 0.0,
        };

        Self {
            teams,
            max_avg_rest,
            min_avg_rest,
            rest_spread,
            slot_count: schedule.slot_count(),
            match_count: schedule.match_count(),
        }
    }

    /// Largest `|home - away|` of any team.
    pub fn max_home_away_imbalance(&self) -> u64 {
        self.teams
            .values()
            .map(|t| t.home_away_balance.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Figures of one team.
    pub fn team(&self, team_id: &str) -> Option<&TeamFairness> {
        self.teams.get(team_id)
    }

    /// Whether the schedule meets the given fairness thresholds.
    pub fn meets_thresholds(&self, max_rest_spread: f64, max_home_away: u64) -> bool {
        self.rest_spread <= max_rest_spread && self.max_home_away_imbalance() <= max_home_away
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, Pairing};

    fn sample() -> Schedule {
        // A: slots 0, 2, 6  B: 0, 3  C: 2, 3, 6
        Schedule::from_matches(vec![
            Match::from_pairing(&Pairing::new(0, "A", "B"), 0, 1),
            Match::from_pairing(&Pairing::new(1, "A", "C"), 2, 2),
            Match::from_pairing(&Pairing::new(2, "C", "B"), 3, 1),
            Match::from_pairing(&Pairing::new(3, "C", "A"), 6, 1),
        ])
    }

    #[test]
    fn test_per_team_figures() {
        let report = FairnessReport::calculate(&sample());
        let a = report.team("A").unwrap();
        assert_eq!(a.match_slots, vec![0, 2, 6]);
        assert_eq!(a.rests, vec![2, 4]);
        assert_eq!(a.min_rest, Some(2));
        assert_eq!(a.max_rest, Some(4));
        assert!((a.avg_rest.unwrap() - 3.0).abs() < 1e-10);
        assert!((a.rest_variance - 1.0).abs() < 1e-10);
        assert_eq!(a.field_distribution.get(&1), Some(&2));
        assert_eq!(a.field_distribution.get(&2), Some(&1));
        assert_eq!(a.home_count, 2);
        assert_eq!(a.away_count, 1);
        assert_eq!(a.home_away_balance, 1);
    }

    #[test]
    fn test_global_spread() {
        let report = FairnessReport::calculate(&sample());
        // avg rest: A 3, B 3, C 2
        assert!((report.max_avg_rest.unwrap() - 3.0).abs() < 1e-10);
        assert!((report.min_avg_rest.unwrap() - 2.0).abs() < 1e-10);
        assert!((report.rest_spread - 1.0).abs() < 1e-10);
        assert_eq!(report.slot_count, 7);
        assert_eq!(report.match_count, 4);
    }

    #[test]
    fn test_minutes_conversion() {
        let report = FairnessReport::calculate(&sample());
        let a = report.team("A").unwrap();
        assert!((a.avg_rest_minutes(20).unwrap() - 60.0).abs() < 1e-10);
        assert_eq!(a.rests_minutes(20), vec![40, 80]);
    }

    #[test]
    fn test_thresholds() {
        let report = FairnessReport::calculate(&sample());
        // C: home twice, away once. B: away twice.
        assert_eq!(report.max_home_away_imbalance(), 2);
        assert!(report.meets_thresholds(1.0, 2));
        assert!(!report.meets_thresholds(0.5, 2));
        assert!(!report.meets_thresholds(1.0, 1));
    }

    #[test]
    fn test_single_match_teams_have_no_rest() {
        let s = Schedule::from_matches(vec![Match::from_pairing(&Pairing::new(0, "A", "B"), 4, 1)]);
        let report = FairnessReport::calculate(&s);
        assert_eq!(report.team("A").unwrap().avg_rest, None);
        assert_eq!(report.max_avg_rest, None);
        assert!((report.rest_spread - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule() {
        let report = FairnessReport::calculate(&Schedule::default());
        assert!(report.teams.is_empty());
        assert_eq!(report.match_count, 0);
        assert_eq!(report.max_home_away_imbalance(), 0);
    }
}
