//! Scheduler configuration.
//!
//! All settings are plain data, serializable so the surrounding
//! application can persist them alongside the tournament.

use serde::{Deserialize, Serialize};

/// How teams are split into round robins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// One round robin per group label. Ungrouped teams form their own pool.
    #[default]
    WithinGroups,
    /// A single round robin across all teams, ignoring group labels.
    SingleGroup,
}

/// Weights of the three fairness penalties.
///
/// The defaults encode the priority order rest ≫ field > home/away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the global average-rest spread.
    pub rest: f64,
    /// Weight of per-team field usage variance.
    pub field: f64,
    /// Weight of per-team home/away imbalance.
    pub home_away: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rest: 100.0,
            field: 10.0,
            home_away: 5.0,
        }
    }
}

/// Settings for a scheduling run.
///
/// # Example
/// ```
/// use u_fixture::config::SchedulerConfig;
///
/// let config = SchedulerConfig::new()
///     .with_fields(2)
///     .with_min_rest_slots(1)
///     .with_max_slots(40);
/// assert_eq!(config.fields, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of parallel fields. Field IDs are `1..=fields`.
    pub fields: u32,
    /// Idle slots a team must sit out between two of its matches.
    /// `0` only forbids playing twice in one slot.
    pub min_rest_slots: u32,
    /// Slot budget. `None` derives a budget that is always sufficient.
    pub max_slots: Option<usize>,
    /// Length of one slot in minutes. Not used by the scheduler itself.
    pub slot_duration_minutes: u32,
    /// How teams are split into round robins.
    pub pairing_mode: PairingMode,
    /// Penalty weights for the fairness score.
    pub weights: ScoreWeights,
    /// Whether to run the home/away balancing pass.
    pub balance_home_away: bool,
    /// Whether balancing follows its forward pass with the repair step
    /// that brings every team to `|home - away| <= 1`.
    pub repair_home_away: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fields: 1,
            min_rest_slots: 0,
            max_slots: None,
            slot_duration_minutes: 0,
            pairing_mode: PairingMode::WithinGroups,
            weights: ScoreWeights::default(),
            balance_home_away: true,
            repair_home_away: true,
        }
    }
}

impl SchedulerConfig {
    /// Creates a configuration with one field and no rest constraint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of fields.
    pub fn with_fields(mut self, fields: u32) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the minimum number of idle slots between a team's matches.
    pub fn with_min_rest_slots(mut self, min_rest_slots: u32) -> Self {
        self.min_rest_slots = min_rest_slots;
        self
    }

    /// Caps the number of slots the scheduler may use.
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = Some(max_slots);
        self
    }

    /// Sets the slot duration in minutes.
    pub fn with_slot_duration(mut self, minutes: u32) -> Self {
        self.slot_duration_minutes = minutes;
        self
    }

    /// Sets the pairing mode.
    pub fn with_pairing_mode(mut self, mode: PairingMode) -> Self {
        self.pairing_mode = mode;
        self
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enables or disables the home/away balancing pass.
    pub fn with_home_away_balancing(mut self, enabled: bool) -> Self {
        self.balance_home_away = enabled;
        self
    }

    /// Enables or disables the repair step of home/away balancing.
    pub fn with_home_away_repair(mut self, enabled: bool) -> Self {
        self.repair_home_away = enabled;
        self
    }

    /// Field IDs in iteration order.
    pub fn field_ids(&self) -> impl Iterator<Item = u32> {
        1..=self.fields
    }

    /// The slot budget for a run with `pairing_count` pairings.
    ///
    /// Without an explicit cap, every window of `min_rest_slots + 1`
    /// consecutive slots places at least one match, so
    /// `pairing_count * (min_rest_slots + 1)` slots always suffice.
    pub fn slot_budget(&self, pairing_count: usize) -> usize {
        self.max_slots
            .unwrap_or_else(|| pairing_count.saturating_mul(self.min_rest_slots as usize + 1))
    }
}
