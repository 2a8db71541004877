//! Round-robin pairing generation.
//!
//! # Algorithm (circle method)
//!
//! Fix the first team and arrange the others around a circle, padding
//! with a bye when the count is odd. Each of the `n - 1` rounds pairs
//! position `i` with position `n - 1 - i`, then rotates every position
//! except the fixed one by one step. Pairings against the bye are dropped.
//!
//! Round structure is not kept: the output is a flat list in generation
//! order. Slot assignment happens in the scheduler.
//!
//! # Reference
//! Kirkman (1847); Lucas (1883), "Récréations mathématiques", Vol. 2

use crate::config::PairingMode;
use crate::models::{Pairing, Team};

/// Generates all `n * (n - 1) / 2` pairings for one round robin over `team_ids`.
///
/// Indices start at `first_index` and increase in generation order.
/// Fewer than two teams yields no pairings.
pub fn circle_method(team_ids: &[&str], first_index: usize) -> Vec<Pairing> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    let mut ring: Vec<Option<&str>> = team_ids.iter().copied().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None); // bye
    }
    let n = ring.len();

    let mut pairings = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1) / 2);
    for _round in 0..n - 1 {
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[n - 1 - i]) {
                pairings.push(Pairing::new(first_index + pairings.len(), a, b));
            }
        }
        ring[1..].rotate_right(1);
    }

    pairings
}

/// Generates the pairings for a set of teams.
///
/// With [`PairingMode::WithinGroups`], teams are split by group label (in
/// order of first appearance; ungrouped teams form one pool) and each group
/// gets its own round robin. The group lists are concatenated, with indices
/// running on across groups. [`PairingMode::SingleGroup`] ignores labels.
pub fn generate_pairings(teams: &[Team], mode: PairingMode) -> Vec<Pairing> {
    match mode {
        PairingMode::SingleGroup => {
            let ids: Vec<&str> = teams.iter().map(|t| t.id.as_str()).collect();
            circle_method(&ids, 0)
        }
        PairingMode::WithinGroups => {
            let mut groups: Vec<(Option<&str>, Vec<&str>)> = Vec::new();
            for team in teams {
                let label = team.group.as_deref();
                match groups.iter_mut().find(|(g, _)| *g == label) {
                    Some((_, members)) => members.push(team.id.as_str()),
                    None => groups.push((label, vec![team.id.as_str()])),
                }
            }

            let mut pairings = Vec::new();
            for (label, members) in groups {
                let group = label.map(str::to_string);
                let generated = circle_method(&members, pairings.len());
                pairings.extend(generated.into_iter().map(|p| p.with_group(group.clone())));
            }
            pairings
        }
    }
}
