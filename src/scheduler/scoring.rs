//! Fairness scoring of a candidate placement.
//!
//! # Score Convention
//! **Lower score = better placement.** An [`Score::Illegal`] placement
//! must never be committed.
//!
//! # Terms
//!
//! | Term | Definition | Default weight |
//! |------|-----------|----------------|
//! | Rest spread | max − min average rest across teams, both teams placed hypothetically | 100 |
//! | Field variance | variance of each team's per-field counts after the placement | 10 |
//! | Home/away | \|home − away\| of each team, with team A tentatively at home | 5 |

use std::cmp::Ordering;

use super::TeamTracker;
use crate::config::ScoreWeights;

/// Result of scoring a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Placement is allowed; lower is better.
    Legal(f64),
    /// Placement breaks a hard constraint.
    Illegal,
}

impl Score {
    /// Whether the placement is allowed.
    pub fn is_legal(&self) -> bool {
        matches!(self, Score::Legal(_))
    }

    /// Numeric value; `+inf` when illegal.
    pub fn value(&self) -> f64 {
        match self {
            Score::Legal(v) => *v,
            Score::Illegal => f64::INFINITY,
        }
    }

    /// Orders scores ascending, treating values within `epsilon` as equal.
    /// Illegal sorts last.
    pub fn compare(&self, other: &Score, epsilon: f64) -> Ordering {
        match (self, other) {
            (Score::Illegal, Score::Illegal) => Ordering::Equal,
            (Score::Illegal, _) => Ordering::Greater,
            (_, Score::Illegal) => Ordering::Less,
            (Score::Legal(a), Score::Legal(b)) => {
                if (a - b).abs() <= epsilon {
                    Ordering::Equal
                } else {
                    a.partial_cmp(b).unwrap_or(Ordering::Equal)
                }
            }
        }
    }
}

/// Unweighted penalty terms of a legal placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Spread of average rest across teams, in slots.
    pub rest_spread: f64,
    /// Sum of both teams' field-usage variance.
    pub field_variance: f64,
    /// Sum of both teams' `|home - away|`.
    pub home_away_imbalance: f64,
}

impl ScoreBreakdown {
    /// Weighted total.
    pub fn total(&self, weights: &ScoreWeights) -> f64 {
        weights.rest * self.rest_spread
            + weights.field * self.field_variance
            + weights.home_away * self.home_away_imbalance
    }
}

/// Scores candidate (pairing, slot, field) placements against tracker state.
#[derive(Debug, Clone)]
pub struct FairnessScorer {
    weights: ScoreWeights,
    fields: u32,
}

impl FairnessScorer {
    /// Creates a scorer for `fields` fields (IDs `1..=fields`).
    pub fn new(weights: ScoreWeights, fields: u32) -> Self {
        Self { weights, fields }
    }

    /// Scores placing teams `a` (tentatively home) and `b` in `slot` on `field`.
    ///
    /// `a` and `b` are dense tracker indices.
    pub(crate) fn score(
        &self,
        tracker: &TeamTracker,
        a: usize,
        b: usize,
        slot: usize,
        field: u32,
    ) -> Score {
        match self.breakdown(tracker, a, b, slot, field) {
            Some(parts) => Score::Legal(parts.total(&self.weights)),
            None => Score::Illegal,
        }
    }

    /// Penalty terms of a placement, or `None` if it is illegal.
    pub(crate) fn breakdown(
        &self,
        tracker: &TeamTracker,
        a: usize,
        b: usize,
        slot: usize,
        field: u32,
    ) -> Option<ScoreBreakdown> {
        if a == b || !tracker.can_play(a, slot) || !tracker.can_play(b, slot) {
            return None;
        }

        Some(ScoreBreakdown {
            rest_spread: self.projected_rest_spread(tracker, a, b, slot),
            field_variance: self.field_variance(tracker, a, field)
                + self.field_variance(tracker, b, field),
            home_away_imbalance: self.home_away_imbalance(tracker, a, b),
        })
    }

    /// max − min of per-team average rest, with `a` and `b` placed in `slot`.
    /// Teams without a rest value yet are left out.
    fn projected_rest_spread(&self, tracker: &TeamTracker, a: usize, b: usize, slot: usize) -> f64 {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for idx in 0..tracker.len() {
            let state = tracker.state(idx);
            let avg = if idx == a || idx == b {
                state.projected_avg_rest(slot)
            } else {
                state.avg_rest()
            };
            if let Some(avg) = avg {
                min = min.min(avg);
                max = max.max(avg);
            }
        }

        if max >= min {
            max - min
        } else {
            0.0
        }
    }

    /// Population variance of a team's per-field counts after one more
    /// match on `field`.
    fn field_variance(&self, tracker: &TeamTracker, idx: usize, field: u32) -> f64 {
        if self.fields <= 1 {
            return 0.0;
        }
        let state = tracker.state(idx);
        let counts: Vec<f64> = (1..=self.fields)
            .map(|f| (state.field_count(f) + usize::from(f == field)) as f64)
            .collect();
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<f64>() / n;
        counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n
    }

    fn home_away_imbalance(&self, tracker: &TeamTracker, a: usize, b: usize) -> f64 {
        let home = tracker.state(a).home_away_diff() + 1;
        let away = tracker.state(b).home_away_diff() - 1;
        (home.abs() + away.abs()) as f64
    }
}
